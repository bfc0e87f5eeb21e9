mod block;
mod norm;
mod ops;
mod structure;
pub mod vector;

pub use vector::Vector;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use num_complex::Complex;

use crate::traits::{LinalgScalar, MatrixMut, MatrixRef, Scalar};

/// Heap-allocated matrix with runtime dimensions.
///
/// Row-major `Vec<T>` storage. Dimensions are set at construction and an
/// `nrows * ncols` block is always allocated. Copied by value via `Clone`;
/// no shared ownership. Implements [`MatrixRef`] and [`MatrixMut`], so the
/// generic linalg free functions work with `Matrix` out of the box.
///
/// # Examples
///
/// ```
/// use spectralis::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
///
/// let id = Matrix::<f64>::eye(3);
/// assert_eq!(id[(0, 0)], 1.0);
/// assert_eq!(id[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    pub(crate) data: Vec<T>,
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Create an `nrows x ncols` matrix of zeros.
    ///
    /// ```
    /// use spectralis::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.nrows(), 2);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create a matrix filled with a given value.
    pub fn fill(nrows: usize, ncols: usize, value: T) -> Self {
        Self {
            data: vec![value; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create an `n x n` identity matrix.
    ///
    /// ```
    /// use spectralis::Matrix;
    /// let id = Matrix::<f64>::eye(3);
    /// assert_eq!(id[(1, 1)], 1.0);
    /// assert_eq!(id[(1, 2)], 0.0);
    /// ```
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `slice.len() != nrows * ncols`.
    ///
    /// ```
    /// use spectralis::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, slice: &[T]) -> Self {
        assert_eq!(
            slice.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            slice.len(),
            nrows,
            ncols,
        );
        Self {
            data: slice.to_vec(),
            nrows,
            ncols,
        }
    }

    /// Create a matrix from an owned `Vec<T>` in row-major order.
    ///
    /// Panics if `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "vec length {} does not match {}x{} matrix",
            data.len(),
            nrows,
            ncols,
        );
        Self { data, nrows, ncols }
    }

    /// Companion matrix of a monic polynomial.
    ///
    /// `coeffs` holds the polynomial coefficients in ascending order,
    /// `c[0] + c[1] x + ... + c[n] x^n`, with `c[n]` nonzero. The result is
    /// the `n x n` matrix with ones on the subdiagonal and `-c[i] / c[n]`
    /// down the last column, whose eigenvalues are the polynomial's roots.
    ///
    /// Panics if fewer than two coefficients are given.
    ///
    /// ```
    /// use spectralis::Matrix;
    /// // p(x) = (x - 1)(x - 2) = 2 - 3x + x^2
    /// let c = Matrix::companion(&[2.0_f64, -3.0, 1.0]);
    /// assert_eq!(c.nrows(), 2);
    /// assert_eq!(c[(1, 0)], 1.0);
    /// assert_eq!(c[(0, 1)], -2.0);
    /// assert_eq!(c[(1, 1)], 3.0);
    /// ```
    pub fn companion(coeffs: &[T]) -> Self {
        assert!(
            coeffs.len() >= 2,
            "companion matrix requires a polynomial of degree >= 1"
        );
        let n = coeffs.len() - 1;
        let lead = coeffs[n];
        let mut m = Self::zeros(n, n);
        for i in 1..n {
            m[(i, i - 1)] = T::one();
        }
        for i in 0..n {
            m[(i, n - 1)] = T::zero() - coeffs[i] / lead;
        }
        m
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Apply a function to every element, producing a new matrix.
    pub fn map<U: Scalar>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl<T> Matrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// View the row-major data as a flat slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

// ── Row / column access ─────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Extract row `i` as a vector.
    pub fn row(&self, i: usize) -> Vector<T> {
        assert!(i < self.nrows, "row index {} out of bounds", i);
        Vector::from_slice(&self.data[i * self.ncols..(i + 1) * self.ncols])
    }

    /// Extract column `j` as a vector.
    pub fn column(&self, j: usize) -> Vector<T> {
        assert!(j < self.ncols, "column index {} out of bounds", j);
        let mut v = Vector::zeros(self.nrows);
        for i in 0..self.nrows {
            v[i] = self[(i, j)];
        }
        v
    }

    /// Overwrite column `j` with the entries of `v`.
    pub fn set_column(&mut self, j: usize, v: &Vector<T>) {
        assert_eq!(v.len(), self.nrows, "column length mismatch");
        for i in 0..self.nrows {
            self[(i, j)] = v[i];
        }
    }

    /// Swap rows `a` and `b` in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.ncols {
            self.data.swap(a * self.ncols + j, b * self.ncols + j);
        }
    }
}

// ── Complex promotion ───────────────────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// Promote every entry into the complex plane.
    ///
    /// Identity (a copy) when `T` is already complex. The eigen engine
    /// works over complex matrices throughout, so real input passes
    /// through here exactly once.
    pub fn to_complex(&self) -> Matrix<Complex<T::Real>> {
        self.map(|x| x.to_complex())
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for Matrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[row * self.ncols + col]
    }
}

impl<T> MatrixMut<T> for Matrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[row * self.ncols + col]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.ncols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row * self.ncols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros() {
        let m = Matrix::<f64>::zeros(3, 4);
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 4);
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(m[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn fill() {
        let m = Matrix::fill(2, 3, 7.0_f64);
        assert_eq!(m[(0, 0)], 7.0);
        assert_eq!(m[(1, 2)], 7.0);
    }

    #[test]
    fn eye() {
        let m = Matrix::<f64>::eye(3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(m[(i, j)], expected);
            }
        }
    }

    #[test]
    fn from_rows() {
        let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m[(1, 2)], 6.0);
    }

    #[test]
    #[should_panic(expected = "slice length")]
    fn from_rows_wrong_length() {
        let _ = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn companion_from_coefficients() {
        // p(x) = x^3 - 6x^2 + 11x - 6 = (x-1)(x-2)(x-3)
        let c = Matrix::companion(&[-6.0_f64, 11.0, -6.0, 1.0]);
        assert_eq!(c.nrows(), 3);
        assert_eq!(c[(1, 0)], 1.0);
        assert_eq!(c[(2, 1)], 1.0);
        assert_eq!(c[(0, 2)], 6.0);
        assert_eq!(c[(1, 2)], -11.0);
        assert_eq!(c[(2, 2)], 6.0);
        assert_eq!(c[(0, 0)], 0.0);
    }

    #[test]
    fn row_column_access() {
        let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let r = m.row(1);
        assert_eq!(r.len(), 3);
        assert_eq!(r[0], 4.0);
        assert_eq!(r[2], 6.0);
        let c = m.column(2);
        assert_eq!(c.len(), 2);
        assert_eq!(c[0], 3.0);
        assert_eq!(c[1], 6.0);
    }

    #[test]
    fn set_column() {
        let mut m = Matrix::<f64>::zeros(2, 2);
        m.set_column(1, &Vector::from_slice(&[5.0, 6.0]));
        assert_eq!(m[(0, 1)], 5.0);
        assert_eq!(m[(1, 1)], 6.0);
        assert_eq!(m[(0, 0)], 0.0);
    }

    #[test]
    fn swap_rows() {
        let mut m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        m.swap_rows(0, 1);
        assert_eq!(m[(0, 0)], 3.0);
        assert_eq!(m[(1, 1)], 2.0);
    }

    #[test]
    fn promotion_round_trip() {
        let m = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        let z = m.to_complex();
        assert_eq!(z[(0, 1)].re, 2.0);
        assert_eq!(z[(0, 1)].im, 0.0);
    }

    #[test]
    fn empty_matrix() {
        let m = Matrix::<f64>::zeros(0, 0);
        assert!(m.is_square());
        assert_eq!(m.nrows(), 0);
    }

    #[test]
    fn is_square() {
        assert!(Matrix::<f64>::zeros(3, 3).is_square());
        assert!(!Matrix::<f64>::zeros(2, 3).is_square());
    }
}
