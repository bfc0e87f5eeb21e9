use num_complex::Complex;
use num_traits::Zero;

use crate::eigen::Eigenpair;
use crate::linalg::{LinalgError, Lu};
use crate::matrix::{Matrix, Vector};
use crate::traits::{FloatScalar, LinalgScalar};

/// Power iteration: best-effort dominant eigenpair of a square matrix.
///
/// Starting from `b0`, repeatedly applies `a` and renormalizes; the
/// eigenvalue estimate is the Rayleigh quotient of the current iterate. A
/// left iterate (driven by the plain transpose) runs alongside: when the
/// cosine of the angle between left and right iterates collapses, the
/// dominant eigenvalue is defective or repeated with opposing left/right
/// structure and the loop stops early rather than stall.
///
/// Iteration ends when `‖a q − λ q‖ / cos` drops below tolerance or the
/// budget runs out. Exhausting the budget is NOT an error — the caller
/// receives the current estimate and must treat it as approximate.
///
/// Fails with `InvalidInput` for a non-square matrix or a length mismatch,
/// and `DegenerateVector` when `b0` is numerically zero.
///
/// # Example
///
/// ```
/// use spectralis::{power_iteration, Matrix, Vector};
///
/// let a = Matrix::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, 1.0]).to_complex();
/// let b0 = Vector::from_slice(&[1.0_f64, 1.0]).to_complex();
/// let pair = power_iteration(&a, &b0, 100).unwrap();
/// assert!((pair.value.re - 3.0).abs() < 1e-8);
/// ```
pub fn power_iteration<R: FloatScalar>(
    a: &Matrix<Complex<R>>,
    b0: &Vector<Complex<R>>,
    max_iter: usize,
) -> Result<Eigenpair<R>, LinalgError> {
    if !a.is_square() || a.nrows() != b0.len() {
        return Err(LinalgError::InvalidInput);
    }
    let tol = R::ltol();
    if b0.norm() <= tol {
        return Err(LinalgError::DegenerateVector);
    }

    let at = a.transpose();
    let mut q = b0.normalize();
    let mut w = q.clone();
    let mut lambda = Complex::<R>::zero();

    for _ in 0..max_iter {
        let b = a * &q;
        lambda = q.dotc(&b); // Rayleigh quotient, ‖q‖ = 1

        // Left iterate for the multiplicity guard
        let wn = &at * &w;
        let wn_norm = wn.norm();
        if wn_norm <= tol {
            break;
        }
        w = &wn / Complex::from_real(wn_norm);

        let b_norm = b.norm();
        if b_norm <= tol {
            // a q ≈ 0: the dominant eigenvalue estimate is zero and the
            // current iterate is as good as it gets
            break;
        }
        q = &b / Complex::from_real(b_norm);

        let cos = w.dotc(&q).modulus();
        if cos <= tol {
            break;
        }

        let residual = (&(a * &q) - &(&q * lambda)).norm() / cos;
        if residual <= tol {
            break;
        }
    }

    Ok(Eigenpair {
        value: lambda,
        vector: q,
    })
}

/// Inverse iteration: eigenvector whose eigenvalue is closest to `mu`.
///
/// Computes `B = (a - mu I)^{-1}` once, then applies and renormalizes a
/// fixed `max_iter` times with no convergence test. The convergence rate
/// depends on the eigenvalue gap around `mu`.
///
/// Fails with `InvalidInput` / `DegenerateVector` as
/// [`power_iteration`] does, and with `Singular` when `a - mu I` is not
/// invertible.
pub fn inverse_iteration<R: FloatScalar>(
    a: &Matrix<Complex<R>>,
    b0: &Vector<Complex<R>>,
    mu: Complex<R>,
    max_iter: usize,
) -> Result<Vector<Complex<R>>, LinalgError> {
    if !a.is_square() || a.nrows() != b0.len() {
        return Err(LinalgError::InvalidInput);
    }
    if b0.norm() <= R::ltol() {
        return Err(LinalgError::DegenerateVector);
    }

    let shifted = a - &(&Matrix::eye(a.nrows()) * mu);
    let binv = Lu::new(&shifted)?.inverse();

    let mut b = b0.normalize();
    for _ in 0..max_iter {
        b = (&binv * &b).normalize();
    }

    Ok(b)
}
