//! # spectralis
//!
//! Dense eigenvalue and decomposition toolkit over real and complex
//! scalars, no-std compatible (requires `alloc`). The core is an iterative
//! eigen engine: power and inverse iteration, Wielandt deflation,
//! Householder Hessenberg reduction, shifted-QR Schur iteration, and an
//! SVD assembled by matching the eigenpairs of the two Gram matrices.
//!
//! ## Quick start
//!
//! ```
//! use spectralis::{Matrix, Rng};
//!
//! let a = Matrix::from_rows(3, 3, &[
//!     1.0_f64, 0.0, 0.0,
//!     2.0, 3.0, 0.0,
//!     4.0, 5.0, 6.0,
//! ]);
//! let mut rng = Rng::new(42);
//! let pairs = a.eigen(&mut rng).unwrap();
//!
//! // Every eigenpair satisfies A v ≈ λ v
//! let ac = a.to_complex();
//! for pair in &pairs {
//!     let residual = &(&ac * &pair.vector) - &(&pair.vector * pair.value);
//!     assert!(residual.norm() < 1e-8);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — Heap-allocated `Matrix<T>` with runtime dimensions,
//!   row-major storage, value semantics. [`Vector<T>`] is an N×1 column
//!   newtype. Builders (identity, basis, companion), block extraction,
//!   norms, and tolerance-based structural predicates
//!   (`is_triangular`, `is_hessenberg`, ...).
//!
//! - [`linalg`] — Direct decompositions: LU with partial pivoting
//!   ([`Lu`]), Householder QR ([`Qr`]), reduced row-echelon form and
//!   null-space extraction, Hessenberg reduction ([`Hessenberg`]), and
//!   the shifted-QR Schur iteration ([`Schur`]).
//!
//! - [`eigen`] — The iterative engine: [`power_iteration`],
//!   [`inverse_iteration`], [`wielandt_deflation`], the structural
//!   eigenpair assembly ([`eigen()`](eigen()), [`eigenvalues()`](eigenvalues())),
//!   characteristic polynomials via Vieta's formulas ([`char_poly`]),
//!   diagonalization ([`Eigendecomposition`]), and the Gram-matrix SVD
//!   ([`Svd`]).
//!
//! - [`random`] — Explicit-state xoshiro256\*\* generator ([`Rng`]) for
//!   the solvers' random starting vectors. Nothing in the crate touches
//!   hidden global state: seed an `Rng`, pass it in, get reproducible
//!   runs.
//!
//! - [`traits`] — Element trait hierarchy: [`Scalar`] (all matrix
//!   elements), [`FloatScalar`] (real floats), [`LinalgScalar`] (real
//!   floats and complex numbers, with conjugation, modulus, tolerance,
//!   and promotion into the complex plane).
//!
//! ## Real input, complex spectra
//!
//! Every eigen entry point promotes its input into `Complex<T>` once
//! (real matrices have complex eigenvalues in general) and works over the
//! complex plane from then on. Because the Schur shift is taken from the
//! diagonal, a real matrix keeps real arithmetic throughout the
//! iteration, and a complex-conjugate eigenvalue pair surfaces as a
//! validated 2×2 block instead of converging to the diagonal.
//!
//! ## Error model
//!
//! Structural and algebraic invalidity — non-square input, size
//! mismatches, a zero starting vector, a singular shift or eigenbasis —
//! fail fast with a [`LinalgError`]. Numerical non-convergence never
//! does: power iteration returns its best estimate when the budget runs
//! out, the Schur form may keep unconverged subdiagonal entries, and the
//! assembly layer detects that and falls back to deflation.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Hardware FPU via the system libm |
//! | `libm`  | no      | Pure-Rust software float fallback for no-std targets |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod eigen;
pub mod linalg;
pub mod matrix;
pub mod random;
pub mod traits;

pub use eigen::{
    char_poly, eigen, eigen_with_max_iter, eigenvalues, eigenvalues_with_max_iter,
    inverse_iteration, power_iteration, wielandt_deflation, Eigendecomposition, Eigenpair, Svd,
    DEFAULT_ITERATIONS,
};
pub use linalg::{
    null_space, rref, Hessenberg, LinalgError, Lu, Qr, Schur,
};
pub use matrix::{Matrix, Vector};
pub use random::Rng;
pub use traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};

pub use num_complex::Complex;
