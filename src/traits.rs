use core::fmt::Debug;
use num_complex::Complex;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, integers, and `Complex<f32>` / `Complex<f64>`.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by operations that need `sqrt`, `abs`, ordered comparison, etc.
/// Implies `LinalgScalar<Real = Self>` since real floats are their own real type.
pub trait FloatScalar: Scalar + Float + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// Trait for matrix elements that support linear algebra operations.
///
/// Covers both real floats (`f32`, `f64`) and complex numbers (`Complex<f32>`,
/// `Complex<f64>`). The eigen engine promotes every input into the complex
/// plane via [`LinalgScalar::to_complex`], because even a real matrix has
/// complex eigenvalues in general.
pub trait LinalgScalar: Scalar {
    /// The real component type (`Self` for reals, `T` for `Complex<T>`).
    type Real: FloatScalar;

    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> Self::Real;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Self::Real;

    /// Imaginary part (zero for reals).
    fn im(self) -> Self::Real;

    /// Square root.
    fn lsqrt(self) -> Self;

    /// Machine epsilon of the underlying real type.
    fn lepsilon() -> Self::Real;

    /// Default numeric tolerance: quantities below this are treated as zero
    /// by the structural predicates, the convergence tests, and the
    /// eigenvalue grouping. Roughly the square root of machine epsilon.
    fn ltol() -> Self::Real;

    /// Promote a real value into `Self`.
    fn from_real(r: Self::Real) -> Self;

    /// Promote into the complex plane (identity for complex values).
    fn to_complex(self) -> Complex<Self::Real>;
}

/// Concrete impls for real floats — trivial delegation.
macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline] fn modulus(self) -> $t { Float::abs(self) }
                #[inline] fn conj(self) -> $t { self }
                #[inline] fn re(self) -> $t { self }
                #[inline] fn im(self) -> $t { 0.0 }
                #[inline] fn lsqrt(self) -> $t { Float::sqrt(self) }
                #[inline] fn lepsilon() -> $t { <$t as Float>::epsilon() }
                #[inline] fn ltol() -> $t { Float::sqrt(<$t as Float>::epsilon()) }
                #[inline] fn from_real(r: $t) -> $t { r }
                #[inline] fn to_complex(self) -> Complex<$t> { Complex::new(self, 0.0) }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

impl<T: FloatScalar> LinalgScalar for Complex<T> {
    type Real = T;

    #[inline]
    fn modulus(self) -> T {
        self.norm()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn re(self) -> T {
        self.re
    }

    #[inline]
    fn im(self) -> T {
        self.im
    }

    #[inline]
    fn lsqrt(self) -> Self {
        self.sqrt()
    }

    #[inline]
    fn lepsilon() -> T {
        T::epsilon()
    }

    #[inline]
    fn ltol() -> T {
        T::epsilon().sqrt()
    }

    #[inline]
    fn from_real(r: T) -> Self {
        Complex::new(r, T::zero())
    }

    #[inline]
    fn to_complex(self) -> Complex<T> {
        self
    }
}

/// Read-only access to a matrix-like type.
///
/// Allows algorithms to operate generically over anything with
/// matrix shape and element access.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling
/// in-place algorithms (LU, QR, Hessenberg) to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_scalar_ops() {
        assert_eq!((-3.0_f64).modulus(), 3.0);
        assert_eq!(2.0_f64.conj(), 2.0);
        assert_eq!(5.0_f64.re(), 5.0);
        assert_eq!(5.0_f64.im(), 0.0);
        assert!((4.0_f64.lsqrt() - 2.0).abs() < 1e-15);
    }

    #[test]
    fn complex_scalar_ops() {
        let z = Complex::new(3.0_f64, 4.0);
        assert!((z.modulus() - 5.0).abs() < 1e-15);
        assert_eq!(z.conj(), Complex::new(3.0, -4.0));
        assert_eq!(z.re(), 3.0);
        assert_eq!(z.im(), 4.0);
    }

    #[test]
    fn promotion() {
        let z = 2.5_f64.to_complex();
        assert_eq!(z, Complex::new(2.5, 0.0));
        let w = Complex::new(1.0_f32, -1.0);
        assert_eq!(w.to_complex(), w);
    }

    #[test]
    fn tolerance_order_of_magnitude() {
        assert!(f64::ltol() > f64::lepsilon());
        assert!(f64::ltol() < 1e-6);
        assert!(f32::ltol() < 1e-2);
    }
}
