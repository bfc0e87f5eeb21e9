pub(crate) mod hessenberg;
pub(crate) mod lu;
pub(crate) mod qr;
pub(crate) mod rref;
pub(crate) mod schur;

pub use hessenberg::Hessenberg;
pub use lu::Lu;
pub use qr::Qr;
pub use rref::{null_space, rref};
pub use schur::{Schur, DEFAULT_SCHUR_ITERATIONS};

/// Errors from linear algebra operations.
///
/// Only structural or algebraic invalidity is an error. Numerical
/// non-convergence never raises one: the iterative solvers return their
/// best-effort estimate when the iteration budget runs out, and the
/// eigenpair assembly falls back to deflation when a Schur form fails to
/// validate.
///
/// ```
/// use spectralis::{Matrix, Lu, LinalgError};
///
/// let singular = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// assert_eq!(Lu::new(&singular).unwrap_err(), LinalgError::Singular);
///
/// let rect = Matrix::<f64>::zeros(2, 3);
/// assert_eq!(Lu::new(&rect).unwrap_err(), LinalgError::InvalidInput);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinalgError {
    /// Structurally invalid input: a non-square matrix where squareness is
    /// required, or a size mismatch between operands.
    InvalidInput,
    /// A starting vector for an iterative method is numerically zero.
    DegenerateVector,
    /// A required matrix inverse does not exist.
    Singular,
    /// An eigenvector basis could not be completed for a requested
    /// diagonalization.
    NotDiagonalizable,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::InvalidInput => write!(f, "structurally invalid input"),
            LinalgError::DegenerateVector => write!(f, "starting vector is numerically zero"),
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::NotDiagonalizable => write!(f, "matrix is not diagonalizable"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}
