use nalgebra::{linalg::Schur, DMatrix, DVector};
use nanorand::{Rng, WyRand};

/// Strategy for determining the spectral radius (largest eigenvalue magnitude)
/// of a square, generally non-symmetric matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpectralRadius {
    /// All eigenvalues from a real Schur decomposition.
    /// Falls back to power iteration if the decomposition doesn't converge
    /// within `max_iterations` (0 means no limit).
    Schur {
        /// Iteration limit of the decomposition
        max_iterations: usize,
    },
    /// Two term power iteration, which also converges when the dominant
    /// eigenvalues form a complex conjugate pair.
    /// Stops once the relative change of the estimate is below `tolerance`.
    PowerIteration {
        /// Upper bound on matrix-vector products
        max_iterations: usize,
        /// Relative convergence tolerance
        tolerance: f64,
    },
}

impl Default for SpectralRadius {
    fn default() -> Self {
        SpectralRadius::Schur {
            max_iterations: 10_000,
        }
    }
}

impl SpectralRadius {
    /// Estimate the spectral radius of the square matrix `m`.
    /// The rng provides the starting vector of power iteration.
    pub fn estimate(&self, m: &DMatrix<f64>, rng: &mut WyRand) -> f64 {
        debug_assert!(m.is_square());
        if m.nrows() == 1 {
            return m[(0, 0)].abs();
        }

        match *self {
            SpectralRadius::Schur { max_iterations } => {
                match Schur::try_new(m.clone(), f64::EPSILON, max_iterations) {
                    Some(schur) => schur
                        .complex_eigenvalues()
                        .iter()
                        .map(|c| c.norm_sqr().sqrt())
                        .fold(0.0, f64::max),
                    None => {
                        warn!(
                            "schur decomposition did not converge in {} iterations, using power iteration",
                            max_iterations
                        );
                        power_iteration(m, 100 * m.nrows().max(100), 1e-12, rng)
                    }
                }
            }
            SpectralRadius::PowerIteration {
                max_iterations,
                tolerance,
            } => power_iteration(m, max_iterations, tolerance, rng),
        }
    }
}

/// Tracks the two dimensional Krylov space `v, Av, A^2 v`, so a dominant
/// complex pair `r e^{+-i phi}` shows up as roots of `t^2 - a t - b`.
fn power_iteration(m: &DMatrix<f64>, max_iterations: usize, tolerance: f64, rng: &mut WyRand) -> f64 {
    let mut v0: DVector<f64> = DVector::from_fn(m.nrows(), |_, _| rng.generate::<f64>() - 0.5);
    let norm = v0.norm();
    if norm == 0.0 {
        v0.fill(1.0);
    }
    v0.normalize_mut();
    let mut v1 = m * &v0;

    let mut estimate = f64::NAN;
    for i in 0..max_iterations {
        let v2 = m * &v1;
        let next = dominant_modulus(&v0, &v1, &v2);

        let scale = v1.norm();
        if scale == 0.0 || !scale.is_finite() {
            return if scale == 0.0 { 0.0 } else { f64::INFINITY };
        }
        v0 = v1 / scale;
        v1 = v2 / scale;

        if (next - estimate).abs() <= tolerance * next.abs() {
            debug!("power iteration converged after {} iterations: {}", i + 1, next);
            return next;
        }
        estimate = next;
    }
    warn!(
        "power iteration did not converge within {} iterations, last estimate: {}",
        max_iterations, estimate
    );

    estimate
}

/// Fit `v2 = a * v1 + b * v0` in the least squares sense and return the
/// largest modulus of the roots of `t^2 - a t - b`
fn dominant_modulus(v0: &DVector<f64>, v1: &DVector<f64>, v2: &DVector<f64>) -> f64 {
    let g00 = v1.dot(v1);
    let g01 = v1.dot(v0);
    let g11 = v0.dot(v0);
    let r0 = v1.dot(v2);
    let r1 = v0.dot(v2);

    if g00 == 0.0 {
        return 0.0;
    }
    let det = g00 * g11 - g01 * g01;
    if det <= 1e-12 * g00 * g11 {
        // v1 is parallel to v0, a single real eigenvalue dominates
        return (r0 / g00).abs();
    }

    let a = (r0 * g11 - g01 * r1) / det;
    let b = (g00 * r1 - g01 * r0) / det;
    let disc = a * a + 4.0 * b;
    if disc >= 0.0 {
        let s = disc.sqrt();
        ((a + s) / 2.0).abs().max(((a - s) / 2.0).abs())
    } else {
        (-b).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POWER: SpectralRadius = SpectralRadius::PowerIteration {
        max_iterations: 10_000,
        tolerance: 1e-12,
    };

    #[test]
    fn diagonal() {
        let m = DMatrix::from_diagonal(&DVector::from_vec(vec![3.0, -1.0, 0.5]));
        let mut rng = WyRand::new_seed(0);

        assert!((SpectralRadius::default().estimate(&m, &mut rng) - 3.0).abs() < 1e-10);
        assert!((POWER.estimate(&m, &mut rng) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn complex_pair() {
        // eigenvalues are +-2i
        let m = DMatrix::from_row_slice(2, 2, &[0.0, -2.0, 2.0, 0.0]);
        let mut rng = WyRand::new_seed(0);

        assert!((SpectralRadius::default().estimate(&m, &mut rng) - 2.0).abs() < 1e-10);
        assert!((POWER.estimate(&m, &mut rng) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn complex_pair_off_axis() {
        // eigenvalues are 1 +- i
        let m = DMatrix::from_row_slice(2, 2, &[1.0, -1.0, 1.0, 1.0]);
        let mut rng = WyRand::new_seed(0);

        let expected = 2.0_f64.sqrt();
        assert!((SpectralRadius::default().estimate(&m, &mut rng) - expected).abs() < 1e-10);
        assert!((POWER.estimate(&m, &mut rng) - expected).abs() < 1e-6);
    }

    #[test]
    fn rotation_with_decaying_part() {
        // dominant pair 0.8 e^{+-i pi/2} plus a real eigenvalue 0.3
        let m = DMatrix::from_row_slice(3, 3, &[0.0, -0.8, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 0.3]);
        let mut rng = WyRand::new_seed(1);

        assert!((SpectralRadius::default().estimate(&m, &mut rng) - 0.8).abs() < 1e-10);
        assert!((POWER.estimate(&m, &mut rng) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn zero_and_nilpotent() {
        let mut rng = WyRand::new_seed(0);
        let zero = DMatrix::<f64>::zeros(4, 4);
        assert_eq!(SpectralRadius::default().estimate(&zero, &mut rng), 0.0);
        assert_eq!(POWER.estimate(&zero, &mut rng), 0.0);

        let nilpotent = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(SpectralRadius::default().estimate(&nilpotent, &mut rng), 0.0);
        assert_eq!(POWER.estimate(&nilpotent, &mut rng), 0.0);
    }

    #[test]
    fn single_element() {
        let m = DMatrix::from_element(1, 1, -0.25);
        let mut rng = WyRand::new_seed(0);

        assert_eq!(SpectralRadius::default().estimate(&m, &mut rng), 0.25);
    }
}
