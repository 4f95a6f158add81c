use common::{Error, Result};
use nalgebra::{DMatrix, DVector};
use nanorand::{Rng, WyRand};

use crate::{Params, ReservoirConstructor, SpectralRadius};

/// Constructs the weights of a classic Echo State Network
pub struct ESNConstructor {
    /// Controls the retention of information from previous time steps.
    /// The spectral radius determines how fast the influence of an input
    /// dies out in a reservoir with time, and how stable the reservoir
    /// activations are. The spectral radius should be greater in tasks
    /// requiring longer memory of the input.
    spectral_radius: f64,

    /// How the spectral radius of the unscaled reservoir is found
    estimator: SpectralRadius,

    /// The number of nodes in the reservoir
    reservoir_size: usize,

    /// How densely connected the reservoir will be
    reservoir_density: f64,

    input_dim: usize,
    output_dim: usize,

    /// Constant initial state value, random if `None`
    initial_state_value: Option<f64>,

    rng: WyRand,
}

impl ESNConstructor {
    pub fn new(
        seed: Option<u64>,
        reservoir_size: usize,
        input_dim: usize,
        output_dim: usize,
        spectral_radius: f64,
        estimator: SpectralRadius,
        reservoir_density: f64,
        initial_state_value: Option<f64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new(),
        };

        Self {
            spectral_radius,
            estimator,
            reservoir_size,
            reservoir_density,
            input_dim,
            output_dim,
            initial_state_value,
            rng,
        }
    }

    pub fn from_params(params: &Params) -> Self {
        Self::new(
            params.seed,
            params.reservoir_size,
            params.input_dim,
            params.output_dim,
            params.spectral_radius,
            params.spectral_radius_estimator,
            params.reservoir_density,
            params.initial_state_value,
        )
    }

    /// uniform in [-0.5, 0.5)
    #[inline(always)]
    fn centered(rng: &mut WyRand) -> f64 {
        rng.generate::<f64>() - 0.5
    }
}

impl ReservoirConstructor for ESNConstructor {
    fn construct_input_weight_matrix(&mut self) -> DMatrix<f64> {
        DMatrix::from_fn(self.reservoir_size, self.input_dim, |_, _| Self::centered(&mut self.rng))
    }

    fn construct_readout_matrix(&mut self) -> DMatrix<f64> {
        DMatrix::from_fn(self.output_dim, self.reservoir_size, |_, _| Self::centered(&mut self.rng))
    }

    fn construct_reservoir_weights(&mut self) -> Result<DMatrix<f64>> {
        let n = self.reservoir_size;
        let mut reservoir_matrix = DMatrix::from_fn(n, n, |_, _| Self::centered(&mut self.rng));
        let connectivity = DMatrix::from_fn(n, n, |_, _| {
            if self.rng.generate::<f64>() < self.reservoir_density {
                1.0
            } else {
                0.0
            }
        });
        reservoir_matrix.component_mul_assign(&connectivity);

        let spec_rad = self.estimator.estimate(&reservoir_matrix, &mut self.rng);
        debug!("unscaled spectral radius: {}", spec_rad);
        if !(spec_rad.is_finite() && spec_rad > f64::EPSILON) {
            return Err(Error::DegenerateMatrix {
                spectral_radius: spec_rad,
            });
        }
        reservoir_matrix *= self.spectral_radius / spec_rad;

        Ok(reservoir_matrix)
    }

    fn construct_initial_state(&mut self) -> DVector<f64> {
        match self.initial_state_value {
            Some(v) => DVector::from_element(self.reservoir_size, v),
            None => DVector::from_fn(self.reservoir_size, |_, _| {
                self.rng.generate::<f64>() * 2.0 - 1.0
            }),
        }
    }
}
