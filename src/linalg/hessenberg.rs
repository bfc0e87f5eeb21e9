use alloc::vec;
use num_complex::Complex;
use num_traits::{One, Zero};

use crate::linalg::LinalgError;
use crate::matrix::Matrix;
use crate::traits::{FloatScalar, LinalgScalar};

/// Reduce a square complex matrix to upper Hessenberg form via Householder
/// similarity transforms, in place.
///
/// On return:
/// - `a` is overwritten with the upper Hessenberg matrix H
/// - `q` holds the accumulated unitary transform Q
///
/// The result satisfies `A = Q H Q^H`. The sigma phase convention keeps
/// tau real, so each reflector is Hermitian and H A H is a similarity.
pub(crate) fn hessenberg_in_place<R: FloatScalar>(
    a: &mut Matrix<Complex<R>>,
    q: &mut Matrix<Complex<R>>,
) {
    let n = a.nrows();
    debug_assert_eq!(n, a.ncols());

    *q = Matrix::eye(n);

    for k in 0..n.saturating_sub(2) {
        // Nothing to annihilate below the first subdiagonal entry? Skip the
        // column so an already-Hessenberg input passes through unchanged.
        let mut tail_sq = R::zero();
        for i in (k + 2)..n {
            tail_sq = tail_sq + a[(i, k)].norm_sqr();
        }
        if tail_sq <= R::epsilon() * R::epsilon() {
            continue;
        }

        let norm_sq = tail_sq + a[(k + 1, k)].norm_sqr();
        let norm = norm_sq.sqrt();
        let ak1k = a[(k + 1, k)];
        let alpha = ak1k.modulus();

        let sigma = if alpha < R::epsilon() {
            Complex::from_real(norm)
        } else {
            Complex::from_real(norm) * (ak1k / Complex::from_real(alpha))
        };

        let v0 = ak1k + sigma;
        let tau = v0 / sigma;

        // Householder vector over rows k+1..n, normalized so v[0] = 1
        let mut v = vec![Complex::<R>::one(); n - k - 1];
        for i in (k + 2)..n {
            v[i - k - 1] = a[(i, k)] / v0;
        }

        // Left: A[k+1:n, k+1:n] = (I - tau v v^H) A[k+1:n, k+1:n].
        // Column k is set explicitly below.
        for j in (k + 1)..n {
            let mut dot = Complex::<R>::zero();
            for (idx, vi) in v.iter().enumerate() {
                dot = dot + vi.conj() * a[(k + 1 + idx, j)];
            }
            dot = dot * tau;
            for (idx, vi) in v.iter().enumerate() {
                a[(k + 1 + idx, j)] = a[(k + 1 + idx, j)] - dot * *vi;
            }
        }

        // Right: A[0:n, k+1:n] = A[0:n, k+1:n] (I - tau v v^H)
        for i in 0..n {
            let mut dot = Complex::<R>::zero();
            for (idx, vi) in v.iter().enumerate() {
                dot = dot + a[(i, k + 1 + idx)] * *vi;
            }
            dot = dot * tau;
            for (idx, vi) in v.iter().enumerate() {
                a[(i, k + 1 + idx)] = a[(i, k + 1 + idx)] - dot * vi.conj();
            }
        }

        // Accumulate Q = Q (I - tau v v^H)
        for i in 0..n {
            let mut dot = Complex::<R>::zero();
            for (idx, vi) in v.iter().enumerate() {
                dot = dot + q[(i, k + 1 + idx)] * *vi;
            }
            dot = dot * tau;
            for (idx, vi) in v.iter().enumerate() {
                q[(i, k + 1 + idx)] = q[(i, k + 1 + idx)] - dot * vi.conj();
            }
        }

        // Annihilated column, set exactly
        a[(k + 1, k)] = -sigma;
        for i in (k + 2)..n {
            a[(i, k)] = Complex::zero();
        }
    }
}

/// Hessenberg reduction of a square matrix: `A = Q H Q^H` with H upper
/// Hessenberg and Q unitary.
///
/// Matrices of size 2 or smaller are already Hessenberg and pass through
/// with `Q = I`, as does any input whose below-subdiagonal entries are
/// already negligible.
///
/// # Example
///
/// ```
/// use spectralis::{Hessenberg, Matrix};
///
/// let a = Matrix::from_rows(3, 3, &[
///     4.0_f64, 1.0, -2.0,
///     1.0, 2.0, 0.0,
///     -2.0, 0.0, 3.0,
/// ]);
/// let hess = Hessenberg::new(&a.to_complex()).unwrap();
/// assert!(hess.h()[(2, 0)].norm() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Hessenberg<R: FloatScalar> {
    q: Matrix<Complex<R>>,
    h: Matrix<Complex<R>>,
}

impl<R: FloatScalar> Hessenberg<R> {
    /// Reduce a square matrix. Fails with `InvalidInput` otherwise.
    pub fn new(a: &Matrix<Complex<R>>) -> Result<Self, LinalgError> {
        if !a.is_square() {
            return Err(LinalgError::InvalidInput);
        }
        let mut h = a.clone();
        let mut q = Matrix::eye(a.nrows());
        hessenberg_in_place(&mut h, &mut q);
        Ok(Self { q, h })
    }

    /// The unitary transform Q.
    #[inline]
    pub fn q(&self) -> &Matrix<Complex<R>> {
        &self.q
    }

    /// The upper Hessenberg form H.
    #[inline]
    pub fn h(&self) -> &Matrix<Complex<R>> {
        &self.h
    }

    /// The conjugate transpose of Q, so that `A = Q H Q^H`.
    pub fn qh(&self) -> Matrix<Complex<R>> {
        self.q.conjugate_transpose()
    }

    pub(crate) fn into_parts(self) -> (Matrix<Complex<R>>, Matrix<Complex<R>>) {
        (self.q, self.h)
    }
}

/// Convenience method on square matrices (real input is promoted).
impl<T: LinalgScalar> Matrix<T> {
    /// Hessenberg reduction: `A = Q H Q^H`.
    pub fn hessenberg(&self) -> Result<Hessenberg<T::Real>, LinalgError> {
        Hessenberg::new(&self.to_complex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn check_similarity(a: &Matrix<Complex<f64>>, hess: &Hessenberg<f64>) {
        // Q H Q^H == A
        let rebuilt = &(hess.q() * hess.h()) * &hess.qh();
        assert!(
            (&rebuilt - a).frobenius_norm() < TOL,
            "Q H Q^H should reproduce A"
        );

        // Q^H Q == I
        let qhq = &hess.qh() * hess.q();
        assert!((&qhq - &Matrix::eye(a.nrows())).frobenius_norm() < TOL);

        // H upper Hessenberg
        assert!(hess.h().is_upper_hessenberg());
    }

    #[test]
    fn reduce_3x3() {
        let a = Matrix::from_rows(
            3,
            3,
            &[4.0_f64, 1.0, -2.0, 1.0, 2.0, 0.0, -2.0, 0.0, 3.0],
        )
        .to_complex();
        let hess = Hessenberg::new(&a).unwrap();
        check_similarity(&a, &hess);
    }

    #[test]
    fn reduce_4x4() {
        let a = Matrix::from_rows(
            4,
            4,
            &[
                1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0,
                15.0, 16.0,
            ],
        )
        .to_complex();
        let hess = Hessenberg::new(&a).unwrap();
        check_similarity(&a, &hess);
    }

    #[test]
    fn already_hessenberg_is_fixed_point() {
        let a = Matrix::from_rows(
            3,
            3,
            &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 7.0, 8.0],
        )
        .to_complex();
        let hess = Hessenberg::new(&a).unwrap();
        assert!((hess.h() - &a).frobenius_norm() < TOL, "H should equal A");
        assert!(
            (hess.q() - &Matrix::eye(3)).frobenius_norm() < TOL,
            "Q should be the identity"
        );
    }

    #[test]
    fn small_sizes_pass_through() {
        for n in 0..3 {
            let a = Matrix::from_fn(n, n, |i, j| Complex::new((i + 2 * j) as f64, 0.0));
            let hess = Hessenberg::new(&a).unwrap();
            assert_eq!(hess.h(), &a);
            assert_eq!(hess.q(), &Matrix::eye(n));
        }
    }

    #[test]
    fn non_square_rejected() {
        let a = Matrix::<f64>::zeros(2, 3).to_complex();
        assert_eq!(Hessenberg::new(&a).unwrap_err(), LinalgError::InvalidInput);
    }

    #[test]
    fn complex_input() {
        let a = Matrix::from_rows(
            3,
            3,
            &[
                Complex::new(1.0_f64, 1.0),
                Complex::new(2.0, 0.0),
                Complex::new(0.0, -1.0),
                Complex::new(3.0, 2.0),
                Complex::new(0.0, 0.0),
                Complex::new(1.0, 0.0),
                Complex::new(1.0, -2.0),
                Complex::new(2.0, 2.0),
                Complex::new(4.0, 0.0),
            ],
        );
        let hess = Hessenberg::new(&a).unwrap();
        check_similarity(&a, &hess);
    }
}
