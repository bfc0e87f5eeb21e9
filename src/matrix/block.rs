use crate::traits::Scalar;

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Copy out the `nrows x ncols` block with top-left corner at `(i, j)`.
    ///
    /// Panics if the block extends past the matrix bounds.
    pub fn submatrix(&self, i: usize, j: usize, nrows: usize, ncols: usize) -> Self {
        assert!(
            i + nrows <= self.nrows && j + ncols <= self.ncols,
            "submatrix ({}..{}, {}..{}) out of bounds for {}x{}",
            i,
            i + nrows,
            j,
            j + ncols,
            self.nrows,
            self.ncols,
        );
        Matrix::from_fn(nrows, ncols, |r, c| self[(i + r, j + c)])
    }

    /// Copy of the matrix with row `i` deleted.
    ///
    /// Panics when called on a single-row matrix.
    pub fn remove_row(&self, i: usize) -> Self {
        assert!(self.nrows > 1, "cannot create a 0xN matrix");
        assert!(i < self.nrows, "row index {} out of bounds", i);
        Matrix::from_fn(self.nrows - 1, self.ncols, |r, c| {
            if r < i {
                self[(r, c)]
            } else {
                self[(r + 1, c)]
            }
        })
    }

    /// Copy of the matrix with column `j` deleted.
    ///
    /// Panics when called on a single-column matrix.
    pub fn remove_column(&self, j: usize) -> Self {
        assert!(self.ncols > 1, "cannot create an Mx0 matrix");
        assert!(j < self.ncols, "column index {} out of bounds", j);
        Matrix::from_fn(self.nrows, self.ncols - 1, |r, c| {
            if c < j {
                self[(r, c)]
            } else {
                self[(r, c + 1)]
            }
        })
    }

    /// Copy of the matrix with row `i` and column `j` deleted.
    ///
    /// The deflation step uses this to shrink the working matrix by one.
    pub fn remove_row_and_column(&self, i: usize, j: usize) -> Self {
        self.remove_row(i).remove_column(j)
    }

    /// Stack `self` on top of `other` (matching column counts).
    pub fn vstack(&self, other: &Self) -> Self {
        assert_eq!(
            self.ncols, other.ncols,
            "vstack requires matching column counts"
        );
        Matrix::from_fn(self.nrows + other.nrows, self.ncols, |r, c| {
            if r < self.nrows {
                self[(r, c)]
            } else {
                other[(r - self.nrows, c)]
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submatrix() {
        let m = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let s = m.submatrix(1, 1, 2, 2);
        assert_eq!(s[(0, 0)], 5.0);
        assert_eq!(s[(1, 1)], 9.0);
    }

    #[test]
    fn remove_row_and_column() {
        let m = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let r = m.remove_row_and_column(1, 1);
        assert_eq!(r.nrows(), 2);
        assert_eq!(r.ncols(), 2);
        assert_eq!(r[(0, 0)], 1.0);
        assert_eq!(r[(0, 1)], 3.0);
        assert_eq!(r[(1, 0)], 7.0);
        assert_eq!(r[(1, 1)], 9.0);
    }

    #[test]
    #[should_panic(expected = "0xN")]
    fn remove_last_row_panics() {
        let m = Matrix::from_rows(1, 2, &[1.0, 2.0]);
        let _ = m.remove_row(0);
    }

    #[test]
    fn vstack() {
        let a = Matrix::from_rows(1, 2, &[1.0, 2.0]);
        let b = Matrix::from_rows(2, 2, &[3.0, 4.0, 5.0, 6.0]);
        let s = a.vstack(&b);
        assert_eq!(s.nrows(), 3);
        assert_eq!(s[(0, 1)], 2.0);
        assert_eq!(s[(2, 0)], 5.0);
    }
}
