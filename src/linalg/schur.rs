use alloc::vec::Vec;
use num_complex::Complex;

use crate::linalg::hessenberg::Hessenberg;
use crate::linalg::qr::Qr;
use crate::linalg::LinalgError;
use crate::matrix::Matrix;
use crate::traits::{FloatScalar, LinalgScalar};

/// Default per-index iteration budget for the shifted QR loop.
pub const DEFAULT_SCHUR_ITERATIONS: usize = 100;

/// Eigenvalues of a 2x2 complex matrix `[[a, b], [c, d]]` in closed form:
/// `(tr ± sqrt(tr^2 - 4 det)) / 2`.
pub(crate) fn eig2x2<R: FloatScalar>(
    a: Complex<R>,
    b: Complex<R>,
    c: Complex<R>,
    d: Complex<R>,
) -> (Complex<R>, Complex<R>) {
    let two = R::one() + R::one();
    let tr = a + d;
    let det = a * d - b * c;
    let disc = tr * tr - Complex::from_real(two * two) * det;
    let root = disc.sqrt();
    let half = Complex::from_real(R::one() / two);
    ((tr + root) * half, (tr - root) * half)
}

/// Schur decomposition by shifted QR iteration: `A = Q U Q^H` with Q
/// unitary and U (approximately) quasi-upper-triangular.
///
/// The input is first reduced to upper Hessenberg form unless it already is
/// Hessenberg. Then, for each trailing index, the single-shift QR step
/// `U - sigma*I = Q_k R_k`, `U <- R_k Q_k + sigma*I` (sigma the trailing
/// diagonal entry) runs until the subdiagonal entry deflates or the
/// per-index budget is exhausted.
///
/// Convergence is best-effort, never an error: a real conjugate-pair
/// eigenvalue keeps its 2x2 diagonal block because the shift stays real,
/// and a stubborn subdiagonal entry is simply left in U. Consumers that
/// need a clean eigenvalue read-out must validate the block structure and
/// fall back to another method when it is violated.
///
/// # Example
///
/// ```
/// use spectralis::{Matrix, Schur};
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]).to_complex();
/// let schur = Schur::new(&a).unwrap();
/// let rebuilt = &(schur.q() * schur.u()) * &schur.qh();
/// assert!((&rebuilt - &a).frobenius_norm() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Schur<R: FloatScalar> {
    q: Matrix<Complex<R>>,
    u: Matrix<Complex<R>>,
}

impl<R: FloatScalar> Schur<R> {
    /// Decompose with the default per-index iteration budget.
    pub fn new(a: &Matrix<Complex<R>>) -> Result<Self, LinalgError> {
        Self::with_max_iter(a, DEFAULT_SCHUR_ITERATIONS)
    }

    /// Decompose with an explicit per-index iteration budget.
    ///
    /// Fails with `InvalidInput` for non-square input; never fails on
    /// non-convergence.
    pub fn with_max_iter(a: &Matrix<Complex<R>>, max_iter: usize) -> Result<Self, LinalgError> {
        if !a.is_square() {
            return Err(LinalgError::InvalidInput);
        }
        let n = a.nrows();

        let (mut q, mut u) = if a.is_upper_hessenberg() {
            (Matrix::eye(n), a.clone())
        } else {
            Hessenberg::new(a)?.into_parts()
        };

        let tol = R::ltol();
        let eye = Matrix::<Complex<R>>::eye(n);

        for i in (1..n).rev() {
            let mut iters = 0;
            while u[(i, i - 1)].modulus() > tol && iters < max_iter {
                // A decoupled trailing 2x2 block holding a conjugate pair
                // cannot be split while the shift stays real; stop burning
                // budget and leave the block for the diagonal walk.
                let decoupled = i == 1 || u[(i - 1, i - 2)].modulus() <= tol;
                if decoupled && u[(i, i)].im.abs() <= tol {
                    let (l1, _) = eig2x2(
                        u[(i - 1, i - 1)],
                        u[(i - 1, i)],
                        u[(i, i - 1)],
                        u[(i, i)],
                    );
                    if l1.im.abs() > tol {
                        break;
                    }
                }

                let sigma = u[(i, i)];
                let shift = &eye * sigma;
                let qr = Qr::new(&(&u - &shift))?;
                let qk = qr.q();
                u = &(&qr.r() * &qk) + &shift;
                q = &q * &qk;
                iters += 1;
            }
        }

        Ok(Self { q, u })
    }

    /// The unitary Schur vectors Q.
    #[inline]
    pub fn q(&self) -> &Matrix<Complex<R>> {
        &self.q
    }

    /// The quasi-upper-triangular Schur form U.
    #[inline]
    pub fn u(&self) -> &Matrix<Complex<R>> {
        &self.u
    }

    /// The conjugate transpose of Q, so that `A = Q U Q^H`.
    pub fn qh(&self) -> Matrix<Complex<R>> {
        self.q.conjugate_transpose()
    }

    /// Read eigenvalues off the diagonal blocks of U: a 1x1 block when the
    /// subdiagonal entry below it is negligible, a 2x2 block (solved in
    /// closed form) otherwise.
    ///
    /// No validation of the block structure is performed; use the eigenpair
    /// assembly when an unconverged U must be detected.
    pub fn eigenvalues(&self) -> Vec<Complex<R>> {
        let n = self.u.nrows();
        let tol = R::ltol();
        let mut values = Vec::with_capacity(n);

        let mut i = 0;
        while i < n {
            if i + 1 < n && self.u[(i + 1, i)].modulus() > tol {
                let (l1, l2) = eig2x2(
                    self.u[(i, i)],
                    self.u[(i, i + 1)],
                    self.u[(i + 1, i)],
                    self.u[(i + 1, i + 1)],
                );
                values.push(l1);
                values.push(l2);
                i += 2;
            } else {
                values.push(self.u[(i, i)]);
                i += 1;
            }
        }

        values
    }
}

/// Convenience method on square matrices (real input is promoted).
impl<T: LinalgScalar> Matrix<T> {
    /// Schur decomposition: `A = Q U Q^H`.
    pub fn schur(&self) -> Result<Schur<T::Real>, LinalgError> {
        Schur::new(&self.to_complex())
    }
}
