use alloc::vec;
use alloc::vec::Vec;
use num_complex::Complex;
use num_traits::One;

use crate::eigen::power::power_iteration;
use crate::eigen::Eigenpair;
use crate::linalg::LinalgError;
use crate::matrix::{Matrix, Vector};
use crate::random::Rng;
use crate::traits::{FloatScalar, LinalgScalar};

/// One extraction step, recorded for the backward reconstruction pass.
struct Frame<R: FloatScalar> {
    lambda: Complex<R>,
    x: Vector<Complex<R>>,
    p: usize,
    ap: Vector<Complex<R>>,
}

/// Wielandt deflation: all eigenpairs of a square matrix by repeated
/// dominant-eigenpair extraction.
///
/// The forward pass shrinks the working matrix one row/column at a time:
/// power iteration (from a random starting vector) yields the dominant
/// pair `(λ₁, x₁)`; `x₁` is rescaled so its largest-magnitude entry
/// (index p) equals one; subtracting the outer product `x₁ · (row p)` and
/// deleting row/column p deflates the problem. The backward pass rebuilds
/// full-length eigenvectors by re-inserting a zero at each deleted index
/// and adding the correction `(apᵀ·y / (λᵢ - λ₁)) x₁`. The correction is
/// skipped when `λᵢ ≈ λ₁`, where its denominator vanishes.
///
/// Eigenpairs come back dominant-first per deflation level, not in any
/// canonical sorted order, and are best-effort: power iteration that did
/// not converge within `max_iter` contaminates the deflated problem, so
/// results degrade gracefully rather than fail.
///
/// Fails with `InvalidInput` for non-square input; an empty matrix yields
/// an empty list.
///
/// # Example
///
/// ```
/// use spectralis::{wielandt_deflation, Matrix, Rng};
///
/// let a = Matrix::from_rows(2, 2, &[6.0_f64, 0.0, 0.0, 2.0]).to_complex();
/// let mut rng = Rng::new(1);
/// let pairs = wielandt_deflation(&a, &mut rng, 200).unwrap();
/// assert_eq!(pairs.len(), 2);
/// assert!((pairs[0].value.re - 6.0).abs() < 1e-6);
/// ```
pub fn wielandt_deflation<R: FloatScalar>(
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

    let tol = R::ltol();
    let complex_start = !a.is_real();

    // Forward pass: extract and shrink
    let mut frames: Vec<Frame<R>> = Vec::with_capacity(n - 1);
    let mut work = a.clone();
    while work.nrows() > 1 {
        let k = work.nrows();
        let b0 = if complex_start {
            rng.complex_vector::<R>(k)
        } else {
            rng.real_vector::<R>(k)
        };
        let pair = power_iteration(&work, &b0, max_iter)?;
        let lambda1 = pair.value;
        let mut x1 = pair.vector;

        // Index of the largest-magnitude entry
        let mut p = 0;
        let mut max = R::zero();
        for i in 0..k {
            let m = x1[i].modulus();
            if m > max {
                max = m;
                p = i;
            }
        }
        // Rescale so x1[p] = 1, unless the vector is degenerate
        if max > tol {
            x1 = &x1 / x1[p];
        }

        let ap = work.row(p);
        let deflated = (&work - &x1.outer(&ap)).remove_row_and_column(p, p);
        frames.push(Frame {
            lambda: lambda1,
            x: x1,
            p,
            ap,
        });
        work = deflated;
    }

    // Base case: the 1x1 remainder
    let mut pairs = vec![Eigenpair {
        value: work[(0, 0)],
        vector: Vector::from_slice(&[Complex::<R>::one()]),
    }];

    // Backward pass: re-insert deleted indices and correct
    for frame in frames.iter().rev() {
        let k = frame.x.len();
        let mut rebuilt = Vec::with_capacity(pairs.len() + 1);
        rebuilt.push(Eigenpair {
            value: frame.lambda,
            vector: frame.x.clone(),
        });
        for pair in &pairs {
            let mut y = Vector::zeros(k);
            for j in 0..k {
                if j < frame.p {
                    y[j] = pair.vector[j];
                } else if j > frame.p {
                    y[j] = pair.vector[j - 1];
                }
            }
            let denom = pair.value - frame.lambda;
            if denom.modulus() > tol {
                let corr = frame.ap.dot(&y) / denom;
                y = &y + &(&frame.x * corr);
            }
            rebuilt.push(Eigenpair {
                value: pair.value,
                vector: y,
            });
        }
        pairs = rebuilt;
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruction_error(a: &Matrix<Complex<f64>>, pair: &Eigenpair<f64>) -> f64 {
        let av = a * &pair.vector;
        let lv = &pair.vector * pair.value;
        (&av - &lv).norm() / pair.vector.norm()
    }

    #[test]
    fn one_by_one_base_case() {
        let a = Matrix::from_rows(1, 1, &[7.0_f64]).to_complex();
        let mut rng = Rng::new(0);
        let pairs = wielandt_deflation(&a, &mut rng, 50).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].value, Complex::new(7.0, 0.0));
        assert_eq!(pairs[0].vector[0], Complex::new(1.0, 0.0));
    }

    #[test]
    fn diagonal_spectrum() {
        let a = Matrix::from_rows(3, 3, &[9.0_f64, 0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 1.0])
            .to_complex();
        let mut rng = Rng::new(42);
        let pairs = wielandt_deflation(&a, &mut rng, 500).unwrap();
        assert_eq!(pairs.len(), 3);

        let mut values: Vec<f64> = pairs.iter().map(|p| p.value.re).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((values[0] - 1.0).abs() < 1e-6);
        assert!((values[1] - 4.0).abs() < 1e-6);
        assert!((values[2] - 9.0).abs() < 1e-6);

        // dominant eigenpair comes first
        assert!((pairs[0].value.re - 9.0).abs() < 1e-6);

        for pair in &pairs {
            assert!(reconstruction_error(&a, pair) < 1e-6);
        }
    }

    #[test]
    fn well_separated_symmetric() {
        // Eigenvalues 1 and 11, strongly separated
        let a = Matrix::from_rows(2, 2, &[6.0_f64, 5.0, 5.0, 6.0]).to_complex();
        let mut rng = Rng::new(7);
        let pairs = wielandt_deflation(&a, &mut rng, 500).unwrap();
        assert_eq!(pairs.len(), 2);
        assert!((pairs[0].value.re - 11.0).abs() < 1e-6);
        for pair in &pairs {
            assert!(reconstruction_error(&a, pair) < 1e-5);
        }
    }

    #[test]
    fn empty_and_non_square() {
        let mut rng = Rng::new(0);
        let empty = Matrix::<f64>::zeros(0, 0).to_complex();
        assert!(wielandt_deflation(&empty, &mut rng, 10).unwrap().is_empty());

        let rect = Matrix::<f64>::zeros(2, 3).to_complex();
        assert_eq!(
            wielandt_deflation(&rect, &mut rng, 10).unwrap_err(),
            LinalgError::InvalidInput
        );
    }

    #[test]
    fn deterministic_under_seed() {
        let a = Matrix::from_rows(2, 2, &[6.0_f64, 5.0, 5.0, 6.0]).to_complex();
        let mut rng1 = Rng::new(3);
        let mut rng2 = Rng::new(3);
        let p1 = wielandt_deflation(&a, &mut rng1, 100).unwrap();
        let p2 = wielandt_deflation(&a, &mut rng2, 100).unwrap();
        assert_eq!(p1[0].value, p2[0].value);
        assert_eq!(p1[1].vector, p2[1].vector);
    }
}
