use alloc::vec::Vec;
use num_complex::Complex;

use crate::eigen::{eigen, Eigenpair};
use crate::linalg::LinalgError;
use crate::matrix::Matrix;
use crate::random::Rng;
use crate::traits::{FloatScalar, LinalgScalar};

/// Index of the largest-magnitude eigenvalue. Strict comparison keeps the
/// earliest index on ties.
fn largest_magnitude<R: FloatScalar>(pairs: &[Eigenpair<R>]) -> usize {
    let mut best = 0;
    let mut best_val = pairs[0].value.modulus();
    for (i, pair) in pairs.iter().enumerate().skip(1) {
        let val = pair.value.modulus();
        if val > best_val {
            best_val = val;
            best = i;
        }
    }
    best
}

/// Index of the eigenvalue closest to `target` (smallest modulus of the
/// difference). Strict comparison keeps the earliest index on ties.
fn closest_to<R: FloatScalar>(pairs: &[Eigenpair<R>], target: Complex<R>) -> usize {
    let mut best = 0;
    let mut best_val = (target - pairs[0].value).modulus();
    for (i, pair) in pairs.iter().enumerate().skip(1) {
        let val = (target - pair.value).modulus();
        if val < best_val {
            best_val = val;
            best = i;
        }
    }
    best
}

/// Singular value decomposition `A = U S V^H` assembled from the
/// eigenpairs of the two Gram matrices.
///
/// `A A^H` (size M) and `A^H A` (size N) are eigen-solved independently;
/// their eigenvalue lists share the squared singular values but arrive
/// unaligned. A greedy pass matches them: take the largest-magnitude
/// remaining eigenvalue from whichever side has fewer candidates left,
/// find its closest counterpart on the other side, and emit the matched
/// (left vector, √eigenvalue, right vector) triple. Matching stops when
/// one side runs dry; unconsumed eigenvectors on the longer side complete
/// the columns of that factor, so U and V stay square with (approximately)
/// orthonormal columns.
///
/// S is M×N rectangular-diagonal with non-negative real entries in
/// descending order. Works for any shape, square or not.
///
/// # Example
///
/// ```
/// use spectralis::{Matrix, Rng, Svd};
///
/// let a = Matrix::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, -2.0]).to_complex();
/// let mut rng = Rng::new(1);
/// let svd = Svd::new(&a, &mut rng).unwrap();
/// let sv = svd.singular_values();
/// assert!((sv[0] - 3.0).abs() < 1e-8);
/// assert!((sv[1] - 2.0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct Svd<R: FloatScalar> {
    u: Matrix<Complex<R>>,
    s: Matrix<Complex<R>>,
    vh: Matrix<Complex<R>>,
}

impl<R: FloatScalar> Svd<R> {
    /// Decompose an M×N matrix.
    pub fn new(a: &Matrix<Complex<R>>, rng: &mut Rng) -> Result<Self, LinalgError> {
        let m = a.nrows();
        let n = a.ncols();
        let ah = a.conjugate_transpose();

        let mut left = eigen(&(a * &ah), rng)?;
        let mut right = eigen(&(&ah * a), rng)?;

        let mut u = Matrix::zeros(m, m);
        let mut s = Matrix::zeros(m, n);
        let mut v = Matrix::zeros(n, n);
        let tol = R::ltol();

        let mut col = 0;
        while !left.is_empty() && !right.is_empty() {
            // Largest remaining eigenvalue from the shorter side, closest
            // counterpart from the other.
            let (ileft, iright, sval);
            if left.len() <= right.len() {
                ileft = largest_magnitude(&left);
                sval = left[ileft].value;
                iright = closest_to(&right, sval);
            } else {
                iright = largest_magnitude(&right);
                sval = right[iright].value;
                ileft = closest_to(&left, sval);
            }

            // Gram eigenvalues are non-negative up to floating error; the
            // modulus absorbs a tiny negative drift.
            let sigma = sval.modulus().sqrt();
            let mut uvec = left[ileft].vector.normalize();
            let vvec = right[iright].vector.normalize();

            // The two eigen-computations fix phases independently. Rotate
            // the left vector so u^H A v comes out real positive, which is
            // what lets U S V^H reproduce A.
            if sigma > tol {
                let c = uvec.dotc(&(a * &vvec));
                if c.modulus() > tol {
                    uvec = &uvec * (c / Complex::from_real(c.modulus()));
                }
            }

            u.set_column(col, &uvec);
            v.set_column(col, &vvec);
            s[(col, col)] = Complex::from_real(sigma);
            left.remove(ileft);
            right.remove(iright);
            col += 1;
        }

        // The longer side still holds eigenvectors of its Gram matrix;
        // they complete that factor's basis.
        let mut ucol = col;
        for pair in &left {
            u.set_column(ucol, &pair.vector.normalize());
            ucol += 1;
        }
        let mut vcol = col;
        for pair in &right {
            v.set_column(vcol, &pair.vector.normalize());
            vcol += 1;
        }

        Ok(Self {
            u,
            s,
            vh: v.conjugate_transpose(),
        })
    }

    /// The left singular vectors U (M×M).
    #[inline]
    pub fn u(&self) -> &Matrix<Complex<R>> {
        &self.u
    }

    /// The rectangular-diagonal singular value matrix S (M×N).
    #[inline]
    pub fn s(&self) -> &Matrix<Complex<R>> {
        &self.s
    }

    /// The conjugate-transposed right singular vectors V^H (N×N).
    #[inline]
    pub fn vh(&self) -> &Matrix<Complex<R>> {
        &self.vh
    }

    /// The singular values (diagonal of S), descending, length min(M, N).
    pub fn singular_values(&self) -> Vec<R> {
        let k = self.s.nrows().min(self.s.ncols());
        (0..k).map(|i| self.s[(i, i)].re).collect()
    }

    /// Numerical rank: number of singular values above `tol`.
    pub fn rank(&self, tol: R) -> usize {
        self.singular_values().into_iter().filter(|&s| s > tol).count()
    }
}

/// Convenience method (real input is promoted).
impl<T: LinalgScalar> Matrix<T> {
    /// Singular value decomposition `A = U S V^H`; see [`Svd`].
    pub fn svd(&self, rng: &mut Rng) -> Result<Svd<T::Real>, LinalgError> {
        Svd::new(&self.to_complex(), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    fn check_reconstruction(a: &Matrix<Complex<f64>>, svd: &Svd<f64>) {
        let rebuilt = &(svd.u() * svd.s()) * svd.vh();
        assert!(
            (&rebuilt - a).frobenius_norm() < TOL,
            "U S V^H should reproduce A (diff {})",
            (&rebuilt - a).frobenius_norm()
        );
    }

    fn check_descending(svd: &Svd<f64>) {
        let sv = svd.singular_values();
        for i in 1..sv.len() {
            assert!(
                sv[i - 1] >= sv[i] - 1e-10,
                "singular values not descending: {:?}",
                sv
            );
            assert!(sv[i] >= -1e-10, "negative singular value");
        }
    }

    #[test]
    fn identity() {
        let a = Matrix::<f64>::eye(3).to_complex();
        let mut rng = Rng::new(0);
        let svd = Svd::new(&a, &mut rng).unwrap();
        for &s in &svd.singular_values() {
            assert!((s - 1.0).abs() < TOL);
        }
        check_reconstruction(&a, &svd);
    }

    #[test]
    fn diagonal_with_negative_entry() {
        let a = Matrix::from_rows(2, 2, &[-3.0_f64, 0.0, 0.0, 2.0]).to_complex();
        let mut rng = Rng::new(1);
        let svd = Svd::new(&a, &mut rng).unwrap();
        let sv = svd.singular_values();
        assert!((sv[0] - 3.0).abs() < TOL);
        assert!((sv[1] - 2.0).abs() < TOL);
        check_reconstruction(&a, &svd);
        check_descending(&svd);
    }

    #[test]
    fn known_2x2() {
        // A^T A has eigenvalues 25 and 1 -> singular values 5 and 1
        let a = Matrix::from_rows(2, 2, &[3.0_f64, 2.0, 2.0, 3.0]).to_complex();
        let mut rng = Rng::new(2);
        let svd = Svd::new(&a, &mut rng).unwrap();
        let sv = svd.singular_values();
        assert!((sv[0] - 5.0).abs() < TOL);
        assert!((sv[1] - 1.0).abs() < TOL);
        check_reconstruction(&a, &svd);
    }

    #[test]
    fn square_3x3_reconstruction() {
        let a = Matrix::from_rows(
            3,
            3,
            &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 0.0],
        )
        .to_complex();
        let mut rng = Rng::new(3);
        let svd = Svd::new(&a, &mut rng).unwrap();
        check_reconstruction(&a, &svd);
        check_descending(&svd);

        let qhq = &svd.u().conjugate_transpose() * svd.u();
        assert!((&qhq - &Matrix::eye(3)).frobenius_norm() < TOL);
    }

    #[test]
    fn wide_matrix() {
        let a = Matrix::from_rows(2, 3, &[1.0_f64, 0.0, 1.0, 0.0, 2.0, 0.0]).to_complex();
        let mut rng = Rng::new(4);
        let svd = Svd::new(&a, &mut rng).unwrap();
        assert_eq!(svd.u().nrows(), 2);
        assert_eq!(svd.s().nrows(), 2);
        assert_eq!(svd.s().ncols(), 3);
        assert_eq!(svd.vh().nrows(), 3);
        check_reconstruction(&a, &svd);
        check_descending(&svd);
    }

    #[test]
    fn tall_matrix() {
        let a = Matrix::from_rows(3, 2, &[1.0_f64, 0.0, 0.0, 2.0, 0.0, 0.0]).to_complex();
        let mut rng = Rng::new(5);
        let svd = Svd::new(&a, &mut rng).unwrap();
        let sv = svd.singular_values();
        assert!((sv[0] - 2.0).abs() < TOL);
        assert!((sv[1] - 1.0).abs() < TOL);
        check_reconstruction(&a, &svd);
    }

    #[test]
    fn rank_counts_nonzero_singular_values() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]).to_complex();
        let mut rng = Rng::new(6);
        let svd = Svd::new(&a, &mut rng).unwrap();
        assert_eq!(svd.rank(1e-8), 1);
        check_reconstruction(&a, &svd);
    }

    #[test]
    fn empty_dimension() {
        let a = Matrix::<f64>::zeros(0, 0).to_complex();
        let mut rng = Rng::new(7);
        let svd = Svd::new(&a, &mut rng).unwrap();
        assert!(svd.singular_values().is_empty());
    }
}
