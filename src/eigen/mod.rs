pub(crate) mod deflation;
pub(crate) mod power;
pub(crate) mod svd;

pub use deflation::wielandt_deflation;
pub use power::{inverse_iteration, power_iteration};
pub use svd::Svd;

use alloc::vec;
use alloc::vec::Vec;
use num_complex::Complex;
use num_traits::{One, Zero};

use crate::linalg::schur::eig2x2;
use crate::linalg::{null_space, LinalgError, Lu, Schur};
use crate::matrix::{Matrix, Vector};
use crate::random::Rng;
use crate::traits::{FloatScalar, LinalgScalar};

/// Default iteration budget for the iterative eigen paths (power and
/// inverse iteration, deflation).
pub const DEFAULT_ITERATIONS: usize = 50;

/// An eigenvalue together with an eigenvector for it.
///
/// Satisfies `A v ≈ λ v` up to the numeric tolerance, except for
/// non-diagonalizable input where the vector is a best-effort substitute.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigenpair<R: FloatScalar> {
    /// The eigenvalue.
    pub value: Complex<R>,
    /// A corresponding eigenvector (length = matrix size).
    pub vector: Vector<Complex<R>>,
}

/// Eigenvalues read off a Schur form, validated block by block.
///
/// Walks the diagonal: a 1x1 block when the subdiagonal entry below it is
/// negligible, a 2x2 block (closed form) otherwise. Every entry strictly
/// below an accepted block must be negligible; any violation means the QR
/// iteration left unconverged structure behind and the walk reports
/// failure so the caller can fall back to deflation.
fn validated_schur_eigenvalues<R: FloatScalar>(
    u: &Matrix<Complex<R>>,
) -> Option<Vec<Complex<R>>> {
    let n = u.nrows();
    let tol = R::ltol();
    let mut values = Vec::with_capacity(n);

    let mut i = 0;
    while i < n {
        let two_block = i + 1 < n && u[(i + 1, i)].modulus() > tol;
        let end = if two_block { i + 2 } else { i + 1 };

        for r in end..n {
            for c in i..end {
                if u[(r, c)].modulus() > tol {
                    return None;
                }
            }
        }

        if two_block {
            let (l1, l2) = eig2x2(u[(i, i)], u[(i, i + 1)], u[(i + 1, i)], u[(i + 1, i + 1)]);
            values.push(l1);
            values.push(l2);
        } else {
            values.push(u[(i, i)]);
        }
        i = end;
    }

    Some(values)
}

/// Resolve an eigenvector for every eigenvalue in `values`.
///
/// Equal eigenvalues are grouped first so a multiplicity-m group can draw
/// m vectors from the null space of `A - λI`. When the null-space basis
/// is too small (algebraic multiplicity above geometric), inverse
/// iteration from a random start near the eigenvalue supplies a
/// best-effort vector; the start is real-valued only when both the matrix
/// and the eigenvalue are real.
fn resolve_eigenvectors<R: FloatScalar>(
    a: &Matrix<Complex<R>>,
    values: Vec<Complex<R>>,
    rng: &mut Rng,
    max_iter: usize,
) -> Result<Vec<Eigenpair<R>>, LinalgError> {
    let n = a.nrows();
    let tol = R::ltol();

    let mut groups: Vec<(Complex<R>, Vec<usize>)> = Vec::new();
    for (idx, &v) in values.iter().enumerate() {
        match groups.iter().position(|(rep, _)| (*rep - v).modulus() <= tol) {
            Some(g) => groups[g].1.push(idx),
            None => groups.push((v, vec![idx])),
        }
    }

    let eye = Matrix::<Complex<R>>::eye(n);
    let real_matrix = a.is_real();
    let mut out: Vec<Option<Eigenpair<R>>> = vec![None; n];

    for (rep, idxs) in groups {
        let shifted = a - &(&eye * rep);
        let basis = null_space(&shifted);

        for (slot, &idx) in idxs.iter().enumerate() {
            let vector = if slot < basis.len() {
                basis[slot].normalize()
            } else {
                // Perturb the shift so A - mu I stays invertible
                let mu = rep + Complex::from_real(tol * (R::one() + rep.modulus()));
                let b0 = if real_matrix && rep.im.abs() <= tol {
                    rng.real_vector::<R>(n)
                } else {
                    rng.complex_vector::<R>(n)
                };
                inverse_iteration(a, &b0, mu, max_iter)?
            };
            out[idx] = Some(Eigenpair {
                value: values[idx],
                vector,
            });
        }
    }

    Ok(out
        .into_iter()
        .map(|p| p.expect("every eigenvalue index belongs to exactly one group"))
        .collect())
}

/// All eigenpairs of a square matrix, with the default iteration budget.
///
/// Dispatches on structure, first applicable wins:
/// 1. triangular (or diagonal): eigenvalues are the diagonal entries;
/// 2. 2x2: closed-form eigenvalues;
/// 3. otherwise: Schur iteration, with Wielandt deflation as the fallback
///    when the computed Schur form fails block validation.
///
/// An empty matrix yields an empty list; a non-square matrix fails with
/// `InvalidInput`.
///
/// # Example
///
/// ```
/// use spectralis::{eigen, Matrix, Rng};
///
/// let a = Matrix::from_rows(3, 3, &[
///     1.0_f64, 0.0, 0.0,
///     2.0, 3.0, 0.0,
///     4.0, 5.0, 6.0,
/// ]).to_complex();
/// let mut rng = Rng::new(0);
/// let pairs = eigen(&a, &mut rng).unwrap();
/// let mut values: Vec<f64> = pairs.iter().map(|p| p.value.re).collect();
/// values.sort_by(|x, y| x.partial_cmp(y).unwrap());
/// assert!((values[0] - 1.0).abs() < 1e-10);
/// assert!((values[1] - 3.0).abs() < 1e-10);
/// assert!((values[2] - 6.0).abs() < 1e-10);
/// ```
pub fn eigen<R: FloatScalar>(
    a: &Matrix<Complex<R>>,
    rng: &mut Rng,
) -> Result<Vec<Eigenpair<R>>, LinalgError> {
    eigen_with_max_iter(a, rng, DEFAULT_ITERATIONS)
}

/// All eigenpairs of a square matrix, with an explicit iteration budget
/// for the iterative paths.
pub fn eigen_with_max_iter<R: FloatScalar>(
    a: &Matrix<Complex<R>>,
    rng: &mut Rng,
    max_iter: usize,
) -> Result<Vec<Eigenpair<R>>, LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::InvalidInput);
    }
    let n = a.nrows();
    if n == 0 {
        return Ok(Vec::new());
    }

    if a.is_triangular() {
        let values = (0..n).map(|i| a[(i, i)]).collect();
        return resolve_eigenvectors(a, values, rng, max_iter);
    }

    if n == 2 {
        let (l1, l2) = eig2x2(a[(0, 0)], a[(0, 1)], a[(1, 0)], a[(1, 1)]);
        return resolve_eigenvectors(a, vec![l1, l2], rng, max_iter);
    }

    let schur = Schur::new(a)?;
    if let Some(values) = validated_schur_eigenvalues(schur.u()) {
        return resolve_eigenvectors(a, values, rng, max_iter);
    }

    wielandt_deflation(a, rng, max_iter)
}

/// Eigenvalues only (no eigenvector resolution).
///
/// Same dispatch and failure semantics as [`eigen`]; the random source is
/// touched only on the deflation fallback.
pub fn eigenvalues<R: FloatScalar>(
    a: &Matrix<Complex<R>>,
    rng: &mut Rng,
) -> Result<Vec<Complex<R>>, LinalgError> {
    eigenvalues_with_max_iter(a, rng, DEFAULT_ITERATIONS)
}

/// Eigenvalues only, with an explicit iteration budget.
pub fn eigenvalues_with_max_iter<R: FloatScalar>(
    a: &Matrix<Complex<R>>,
    rng: &mut Rng,
    max_iter: usize,
) -> Result<Vec<Complex<R>>, LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::InvalidInput);
    }
    let n = a.nrows();
    if n == 0 {
        return Ok(Vec::new());
    }

    if a.is_triangular() {
        return Ok((0..n).map(|i| a[(i, i)]).collect());
    }

    if n == 2 {
        let (l1, l2) = eig2x2(a[(0, 0)], a[(0, 1)], a[(1, 0)], a[(1, 1)]);
        return Ok(vec![l1, l2]);
    }

    let schur = Schur::new(a)?;
    if let Some(values) = validated_schur_eigenvalues(schur.u()) {
        return Ok(values);
    }

    let pairs = wielandt_deflation(a, rng, max_iter)?;
    Ok(pairs.into_iter().map(|p| p.value).collect())
}

/// Characteristic-polynomial coefficients via Vieta's formulas.
///
/// Expands `∏ (x - λᵢ)` over the computed eigenvalues and returns the
/// coefficients in ascending order, `c[0] + c[1] x + ... + c[n] x^n`, with
/// `c[n] = 1`. Round-trips with [`Matrix::companion`] up to tolerance.
///
/// ```
/// use spectralis::{char_poly, Matrix, Rng};
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 0.0, 0.0, 2.0]).to_complex();
/// let mut rng = Rng::new(0);
/// let c = char_poly(&a, &mut rng).unwrap();
/// // (x-1)(x-2) = 2 - 3x + x^2
/// assert!((c[0].re - 2.0).abs() < 1e-10);
/// assert!((c[1].re + 3.0).abs() < 1e-10);
/// assert!((c[2].re - 1.0).abs() < 1e-10);
/// ```
pub fn char_poly<R: FloatScalar>(
    a: &Matrix<Complex<R>>,
    rng: &mut Rng,
) -> Result<Vec<Complex<R>>, LinalgError> {
    let values = eigenvalues(a, rng)?;

    let mut coeffs = vec![Complex::<R>::one()];
    for &lambda in &values {
        let mut next = vec![Complex::<R>::zero(); coeffs.len() + 1];
        for (k, &c) in coeffs.iter().enumerate() {
            next[k + 1] = next[k + 1] + c;
            next[k] = next[k] - lambda * c;
        }
        coeffs = next;
    }
    Ok(coeffs)
}

/// Diagonalization `A = Q D Q⁻¹` built from the eigenpair list.
///
/// Columns of Q are the eigenvectors, D carries the eigenvalues on its
/// diagonal. Fails with `NotDiagonalizable` when the eigenvector matrix is
/// singular (a defective matrix has no eigenvector basis).
///
/// # Example
///
/// ```
/// use spectralis::{Eigendecomposition, Matrix, Rng};
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 0.0, 1.0, 3.0]).to_complex();
/// let mut rng = Rng::new(0);
/// let eig = Eigendecomposition::new(&a, &mut rng).unwrap();
/// let rebuilt = &(eig.q() * eig.d()) * eig.q_inv();
/// assert!((&rebuilt - &a).frobenius_norm() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct Eigendecomposition<R: FloatScalar> {
    q: Matrix<Complex<R>>,
    d: Matrix<Complex<R>>,
    q_inv: Matrix<Complex<R>>,
}

impl<R: FloatScalar> Eigendecomposition<R> {
    /// Diagonalize a square matrix.
    pub fn new(a: &Matrix<Complex<R>>, rng: &mut Rng) -> Result<Self, LinalgError> {
        let pairs = eigen(a, rng)?;
        let n = a.nrows();

        let mut q = Matrix::zeros(n, n);
        let mut d = Matrix::zeros(n, n);
        for (i, pair) in pairs.iter().enumerate() {
            q.set_column(i, &pair.vector);
            d[(i, i)] = pair.value;
        }

        let lu = match Lu::new(&q) {
            Ok(lu) => lu,
            Err(LinalgError::Singular) => return Err(LinalgError::NotDiagonalizable),
            Err(e) => return Err(e),
        };
        // Columns of Q are unit vectors, so |det Q| measures how far the
        // eigenbasis is from collapsing. A defective matrix reaches here
        // with a fallback vector nearly parallel to a null-space one.
        if lu.det().modulus() <= R::ltol().sqrt() {
            return Err(LinalgError::NotDiagonalizable);
        }
        let q_inv = lu.inverse();

        Ok(Self { q, d, q_inv })
    }

    /// The eigenvector matrix Q (eigenvectors as columns).
    #[inline]
    pub fn q(&self) -> &Matrix<Complex<R>> {
        &self.q
    }

    /// The diagonal eigenvalue matrix D.
    #[inline]
    pub fn d(&self) -> &Matrix<Complex<R>> {
        &self.d
    }

    /// The inverse of the eigenvector matrix.
    #[inline]
    pub fn q_inv(&self) -> &Matrix<Complex<R>> {
        &self.q_inv
    }
}

// ── Convenience methods (real input is promoted) ────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// All eigenpairs; see [`eigen`].
    pub fn eigen(&self, rng: &mut Rng) -> Result<Vec<Eigenpair<T::Real>>, LinalgError> {
        eigen(&self.to_complex(), rng)
    }

    /// Eigenvalues only; see [`eigenvalues`].
    pub fn eigenvalues(&self, rng: &mut Rng) -> Result<Vec<Complex<T::Real>>, LinalgError> {
        eigenvalues(&self.to_complex(), rng)
    }

    /// Characteristic-polynomial coefficients; see [`char_poly`].
    pub fn char_poly(&self, rng: &mut Rng) -> Result<Vec<Complex<T::Real>>, LinalgError> {
        char_poly(&self.to_complex(), rng)
    }

    /// Diagonalization `A = Q D Q⁻¹`; see [`Eigendecomposition`].
    pub fn eigendecomposition(
        &self,
        rng: &mut Rng,
    ) -> Result<Eigendecomposition<T::Real>, LinalgError> {
        Eigendecomposition::new(&self.to_complex(), rng)
    }
}
