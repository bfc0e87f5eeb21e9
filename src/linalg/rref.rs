use alloc::vec::Vec;
use num_complex::Complex;
use num_traits::One;

use crate::matrix::{Matrix, Vector};
use crate::traits::{FloatScalar, LinalgScalar};

/// Reduce a matrix to reduced row-echelon form in place (Gauss-Jordan with
/// partial pivoting). Pivot candidates with modulus below the scalar
/// tolerance count as zero, so near-singular systems reduce to genuinely
/// rank-deficient echelon forms instead of dividing by noise.
pub fn rref<T: LinalgScalar>(m: &mut Matrix<T>) {
    let nrows = m.nrows();
    let ncols = m.ncols();
    let tol = T::ltol();

    let mut pivot_row = 0;
    for col in 0..ncols {
        if pivot_row >= nrows {
            break;
        }

        // Largest-modulus pivot in this column at or below pivot_row
        let mut best = pivot_row;
        let mut best_val = m[(pivot_row, col)].modulus();
        for row in (pivot_row + 1)..nrows {
            let val = m[(row, col)].modulus();
            if val > best_val {
                best_val = val;
                best = row;
            }
        }

        if best_val <= tol {
            for row in pivot_row..nrows {
                m[(row, col)] = T::zero();
            }
            continue;
        }

        m.swap_rows(pivot_row, best);

        // Scale the pivot row so the pivot becomes 1
        let inv_pivot = T::one() / m[(pivot_row, col)];
        for j in col..ncols {
            m[(pivot_row, j)] = m[(pivot_row, j)] * inv_pivot;
        }
        m[(pivot_row, col)] = T::one();

        // Eliminate the column from every other row
        for row in 0..nrows {
            if row == pivot_row {
                continue;
            }
            let factor = m[(row, col)];
            if factor.modulus() <= T::lepsilon() {
                continue;
            }
            for j in col..ncols {
                m[(row, j)] = m[(row, j)] - factor * m[(pivot_row, j)];
            }
            m[(row, col)] = T::zero();
        }

        pivot_row += 1;
    }
}

/// Basis of the null space of an M×N matrix.
///
/// Column-reduces the stacked system `[M; I]`: wherever the reduced upper
/// block vanishes, the lower block holds a null-space vector. Returned
/// vectors are not normalized. An empty result means the matrix has full
/// column rank (within tolerance).
///
/// # Example
///
/// ```
/// use spectralis::{null_space, Matrix};
/// use num_complex::Complex;
///
/// // Rank-1 projector: null space is one-dimensional
/// let m = Matrix::from_rows(2, 2, &[1.0_f64, 1.0, 1.0, 1.0]).to_complex();
/// let basis = null_space(&m);
/// assert_eq!(basis.len(), 1);
/// let v = &basis[0];
/// assert!((v[0] + v[1]).norm() < 1e-10);
/// ```
pub fn null_space<R: FloatScalar>(m: &Matrix<Complex<R>>) -> Vec<Vector<Complex<R>>> {
    let nrows = m.nrows();
    let ncols = m.ncols();

    // Work on the transpose of [M; I], so column operations become row
    // operations: t = [M^T | I], N x (M+N).
    let mut t = Matrix::zeros(ncols, nrows + ncols);
    for i in 0..ncols {
        for j in 0..nrows {
            t[(i, j)] = m[(j, i)];
        }
        t[(i, nrows + i)] = Complex::one();
    }

    rref(&mut t);

    let tol = R::ltol();
    let mut basis = Vec::new();
    for i in 0..ncols {
        let left_vanished = (0..nrows).all(|j| t[(i, j)].modulus() <= tol);
        if left_vanished {
            let mut v = Vector::zeros(ncols);
            for j in 0..ncols {
                v[j] = t[(i, nrows + j)];
            }
            basis.push(v);
        }
    }
    basis
}
