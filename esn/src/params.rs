use common::{Activation, Error, RCParams, Result};

use crate::SpectralRadius;

/// The parameters of the Echo State Network
#[derive(Debug, Clone)]
pub struct Params {
    /// Number of nodes in the reservoir, the first one serves as bias unit
    pub reservoir_size: usize,
    /// Dimensionality of each input sample, must equal `output_dim`
    pub input_dim: usize,
    /// Dimensionality of each readout, must equal `input_dim` as outputs are fed back as inputs
    pub output_dim: usize,

    /// Controls the retention of information from previous time steps.
    /// The spectral radius determines how fast the influence of an input
    /// dies out in a reservoir with time, and how stable the reservoir
    /// activations are. The spectral radius should be greater in tasks
    /// requiring longer memory of the input.
    pub spectral_radius: f64,
    /// How the spectral radius of the random reservoir is determined before rescaling
    pub spectral_radius_estimator: SpectralRadius,
    /// Connection probability within the reservoir
    pub reservoir_density: f64,
    /// Activation function of reservoir state transition
    pub reservoir_activation: Activation,

    /// Tunes the decay time of internal activity of the network.
    /// The new state is `(1 - a) * x + a * x_candidate`, so 1.0 means no leak.
    pub leaking_rate: f64,
    /// Number of initial state transitions to disregard in training
    pub warmup: usize,
    /// Ridge regression regulazation applied in training
    pub regularization_coeff: f64,
    /// Initial value of every state node, or uniform random draws in [-1, 1) if `None`
    pub initial_state_value: Option<f64>,
    /// Optional seed for Rng
    pub seed: Option<u64>,
}

impl Params {
    /// Default parameters for the given dimensions, failing if they are inconsistent
    pub fn new(reservoir_size: usize, output_dim: usize, input_dim: usize) -> Result<Self> {
        let params = Self {
            reservoir_size,
            input_dim,
            output_dim,
            spectral_radius: 1.25,
            spectral_radius_estimator: SpectralRadius::default(),
            reservoir_density: 1.0,
            reservoir_activation: Activation::Tanh,
            leaking_rate: 0.5,
            warmup: 100,
            regularization_coeff: 1e-8,
            initial_state_value: None,
            seed: None,
        };
        params.validate()?;

        Ok(params)
    }

    /// Check the invariants the network relies on
    pub fn validate(&self) -> Result<()> {
        if self.output_dim != self.input_dim {
            return Err(Error::Configuration(format!(
                "output_dim ({}) has to be equal to input_dim ({})",
                self.output_dim, self.input_dim
            )));
        }
        if self.input_dim == 0 {
            return Err(Error::Configuration("input_dim must be at least 1".to_string()));
        }
        if self.reservoir_size == 0 {
            return Err(Error::Configuration(
                "reservoir_size must be at least 1 to hold the bias unit".to_string(),
            ));
        }
        if !(self.leaking_rate > 0.0 && self.leaking_rate <= 1.0) {
            return Err(Error::Configuration(format!(
                "leaking_rate {} must lie in (0, 1]",
                self.leaking_rate
            )));
        }
        if !(self.spectral_radius.is_finite() && self.spectral_radius > 0.0) {
            return Err(Error::Configuration(format!(
                "spectral_radius {} must be positive and finite",
                self.spectral_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.reservoir_density) {
            return Err(Error::Configuration(format!(
                "reservoir_density {} must lie in [0, 1]",
                self.reservoir_density
            )));
        }
        if !(self.regularization_coeff.is_finite() && self.regularization_coeff >= 0.0) {
            return Err(Error::Configuration(format!(
                "regularization_coeff {} must be non-negative",
                self.regularization_coeff
            )));
        }
        if let SpectralRadius::PowerIteration {
            max_iterations,
            tolerance,
        } = self.spectral_radius_estimator
        {
            if max_iterations == 0 {
                return Err(Error::Configuration(
                    "power iteration needs at least one iteration".to_string(),
                ));
            }
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(Error::Configuration(format!(
                    "power iteration tolerance {} must be positive and finite",
                    tolerance
                )));
            }
        }

        Ok(())
    }
}

impl RCParams for Params {
    #[inline(always)]
    fn reservoir_size(&self) -> usize {
        self.reservoir_size
    }

    #[inline(always)]
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    #[inline(always)]
    fn output_dim(&self) -> usize {
        self.output_dim
    }
}
