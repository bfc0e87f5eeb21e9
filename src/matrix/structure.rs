//! Tolerance-based structural predicates.
//!
//! Entries with modulus below [`LinalgScalar::ltol`] count as zero, so the
//! predicates classify the output of iterative algorithms (a numerically
//! converged Schur form, say) the same way they classify exact input.

use crate::traits::LinalgScalar;

use super::Matrix;

impl<T: LinalgScalar> Matrix<T> {
    /// Whether all entries below the diagonal are negligible.
    ///
    /// Always false for non-square matrices.
    pub fn is_upper_triangular(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let tol = T::ltol();
        for i in 1..self.nrows {
            for j in 0..i {
                if self[(i, j)].modulus() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Whether all entries above the diagonal are negligible.
    ///
    /// Always false for non-square matrices.
    pub fn is_lower_triangular(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let tol = T::ltol();
        for i in 0..self.nrows {
            for j in (i + 1)..self.ncols {
                if self[(i, j)].modulus() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the matrix is upper or lower triangular.
    pub fn is_triangular(&self) -> bool {
        self.is_upper_triangular() || self.is_lower_triangular()
    }

    /// Whether all off-diagonal entries are negligible.
    pub fn is_diagonal(&self) -> bool {
        self.is_upper_triangular() && self.is_lower_triangular()
    }

    /// Whether all entries below the first subdiagonal are negligible.
    ///
    /// Always false for non-square matrices.
    pub fn is_upper_hessenberg(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let tol = T::ltol();
        for i in 2..self.nrows {
            for j in 0..(i - 1) {
                if self[(i, j)].modulus() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Whether all entries above the first superdiagonal are negligible.
    pub fn is_lower_hessenberg(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let tol = T::ltol();
        for i in 0..self.nrows {
            for j in (i + 2)..self.ncols {
                if self[(i, j)].modulus() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the matrix is upper or lower Hessenberg.
    pub fn is_hessenberg(&self) -> bool {
        self.is_upper_hessenberg() || self.is_lower_hessenberg()
    }

    /// Whether every entry has negligible imaginary part.
    pub fn is_real(&self) -> bool {
        let tol = T::ltol();
        self.data.iter().all(|x| x.im().modulus() <= tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn triangular_classification() {
        let upper = Matrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 0.0, 4.0, 5.0, 0.0, 0.0, 6.0]);
        assert!(upper.is_upper_triangular());
        assert!(!upper.is_lower_triangular());
        assert!(upper.is_triangular());
        assert!(!upper.is_diagonal());

        let lower = upper.transpose();
        assert!(lower.is_lower_triangular());
        assert!(lower.is_triangular());
    }

    #[test]
    fn diagonal() {
        let d = Matrix::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, -1.0]);
        assert!(d.is_diagonal());
        assert!(d.is_triangular());
    }

    #[test]
    fn tolerance_absorbs_noise() {
        let almost = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 1e-12, 3.0]);
        assert!(almost.is_upper_triangular());
    }

    #[test]
    fn hessenberg_classification() {
        let h = Matrix::from_rows(
            3,
            3,
            &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 7.0, 8.0],
        );
        assert!(h.is_upper_hessenberg());
        assert!(!h.is_upper_triangular());

        let full = Matrix::from_rows(
            3,
            3,
            &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
        );
        assert!(!full.is_upper_hessenberg());
        assert!(!full.is_hessenberg());
    }

    #[test]
    fn non_square_is_never_structured() {
        let m = Matrix::<f64>::zeros(2, 3);
        assert!(!m.is_upper_triangular());
        assert!(!m.is_hessenberg());
    }

    #[test]
    fn realness() {
        let r = Matrix::from_rows(1, 2, &[Complex::new(1.0_f64, 0.0), Complex::new(2.0, 1e-12)]);
        assert!(r.is_real());
        let c = Matrix::from_rows(1, 1, &[Complex::new(1.0_f64, 0.5)]);
        assert!(!c.is_real());
    }
}
