use alloc::vec;
use alloc::vec::Vec;
use num_traits::Zero;

use crate::linalg::LinalgError;
use crate::matrix::Matrix;
use crate::traits::{LinalgScalar, MatrixMut};

/// QR decomposition in place using Householder reflections.
///
/// On return, `a` contains the packed QR factorization:
/// - Upper triangle (including diagonal): R
/// - Lower triangle (excluding diagonal): Householder vectors (scaled)
///
/// `tau` is filled with the Householder scalar factors (length min(M,N)).
///
/// A numerically zero sub-column gets `tau = 0` (the reflection is the
/// identity) rather than raising an error: the shifted Schur step
/// factorizes `U - sigma*I`, which is singular by construction whenever the
/// shift has converged onto an eigenvalue.
pub(crate) fn qr_in_place<T: LinalgScalar>(a: &mut impl MatrixMut<T>, tau: &mut [T]) {
    let m = a.nrows();
    let n = a.ncols();
    let k = m.min(n);
    debug_assert!(m >= n, "QR requires M >= N");
    debug_assert_eq!(tau.len(), k);

    for col in 0..k {
        // Squared norm of the sub-column a[col:m, col]
        let mut norm_sq = <T::Real as Zero>::zero();
        for i in col..m {
            let v = *a.get(i, col);
            norm_sq = norm_sq + (v * v.conj()).re();
        }

        if norm_sq <= T::lepsilon() * T::lepsilon() {
            tau[col] = T::zero();
            continue;
        }

        let norm = norm_sq.lsqrt();
        let a_col_col = *a.get(col, col);

        // sigma carries the phase of a[col,col] so v0 = a + sigma avoids
        // cancellation; it also makes tau real.
        let alpha = a_col_col.modulus();
        let sigma = if alpha < T::lepsilon() {
            T::from_real(norm)
        } else {
            T::from_real(norm) * (a_col_col / T::from_real(alpha))
        };

        let v0 = a_col_col + sigma;
        let tau_val = v0 / sigma;
        tau[col] = tau_val;

        // Scale the sub-diagonal entries by 1/v0 for storage (v[0] = 1 implicit)
        for i in (col + 1)..m {
            let val = *a.get(i, col) / v0;
            *a.get_mut(i, col) = val;
        }

        // Apply H to trailing columns: A[col:m, j] -= tau * v * (v^H A[col:m, j])
        for j in (col + 1)..n {
            let mut dot = *a.get(col, j);
            for i in (col + 1)..m {
                dot = dot + (*a.get(i, col)).conj() * *a.get(i, j);
            }
            dot = dot * tau_val;

            *a.get_mut(col, j) = *a.get(col, j) - dot;
            for i in (col + 1)..m {
                let vi = *a.get(i, col);
                *a.get_mut(i, j) = *a.get(i, j) - dot * vi;
            }
        }

        // R diagonal entry
        *a.get_mut(col, col) = T::zero() - sigma;
    }
}

/// QR decomposition of an M×N matrix (M >= N) via Householder reflections.
///
/// Rank-deficient columns are tolerated: the corresponding diagonal entry
/// of R is (numerically) zero instead of an error being raised.
///
/// # Example
///
/// ```
/// use spectralis::{Matrix, Qr};
///
/// let a = Matrix::from_rows(3, 3, &[
///     12.0_f64, -51.0, 4.0,
///     6.0, 167.0, -68.0,
///     -4.0, 24.0, -41.0,
/// ]);
/// let qr = Qr::new(&a).unwrap();
/// let prod = &qr.q() * &qr.r();
/// assert!((&prod - &a).frobenius_norm() < 1e-10);
/// ```
#[derive(Debug)]
pub struct Qr<T> {
    qr: Matrix<T>,
    tau: Vec<T>,
}

impl<T: LinalgScalar> Qr<T> {
    /// Decompose a matrix. Fails with `InvalidInput` when M < N.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        let m = a.nrows();
        let n = a.ncols();
        if m < n {
            return Err(LinalgError::InvalidInput);
        }
        let mut qr = a.clone();
        let mut tau = vec![T::zero(); n];
        qr_in_place(&mut qr, &mut tau);
        Ok(Self { qr, tau })
    }

    /// Extract the upper-triangular R factor (N × N).
    pub fn r(&self) -> Matrix<T> {
        let n = self.qr.ncols();
        let mut r = Matrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                r[(i, j)] = self.qr[(i, j)];
            }
        }
        r
    }

    /// Compute the thin Q factor (M × N, orthonormal columns).
    ///
    /// Full and square when the input is square, which is how the Schur
    /// iteration consumes it.
    pub fn q(&self) -> Matrix<T> {
        let m = self.qr.nrows();
        let n = self.qr.ncols();

        let mut q = Matrix::zeros(m, n);
        for i in 0..n {
            q[(i, i)] = T::one();
        }

        // Apply reflections in reverse order
        for col in (0..n).rev() {
            let tau_val = self.tau[col];

            for j in col..n {
                let mut dot = q[(col, j)];
                for i in (col + 1)..m {
                    dot = dot + self.qr[(i, col)].conj() * q[(i, j)];
                }
                dot = dot * tau_val;

                q[(col, j)] = q[(col, j)] - dot;
                for i in (col + 1)..m {
                    q[(i, j)] = q[(i, j)] - dot * self.qr[(i, col)];
                }
            }
        }

        q
    }
}

/// Convenience method on matrices with at least as many rows as columns.
impl<T: LinalgScalar> Matrix<T> {
    /// QR decomposition using Householder reflections.
    pub fn qr(&self) -> Result<Qr<T>, LinalgError> {
        Qr::new(self)
    }
}
