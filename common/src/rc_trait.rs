use nalgebra::{DMatrix, DVector};

use crate::Result;

/// The ReservoirComputer trait
pub trait ReservoirComputer {
    /// The reservoir parameters
    fn params(&self) -> &dyn RCParams;

    /// Train the readout layer using the given inputs and targets
    ///
    /// # Arguments:
    /// inputs: A Matrix where there are N rows corresponding to the datapoints,
    /// fed to the reservoir one row at a time (teacher forcing)
    /// targets: A Matrix with N rows, aligned with the inputs
    fn train(&mut self, inputs: &DMatrix<f64>, targets: &DMatrix<f64>) -> Result<()>;

    /// Update the reservoir computer state with the newest observed input
    fn update_state(&mut self, input: &DVector<f64>) -> Result<()>;

    /// Performs a readout of the current reservoir state
    fn readout(&self) -> Result<DVector<f64>>;

    /// The current internal state
    fn state(&self) -> &DVector<f64>;

    /// Sets the internal state vector
    fn set_state(&mut self, state: DVector<f64>) -> Result<()>;

    /// Get a reference to the readout matrix
    fn readout_matrix(&self) -> &DMatrix<f64>;
}

/// Any reservoir computer parameter struct must implement this.
pub trait RCParams {
    /// The number of inner nodes (`neurons`) in the network
    fn reservoir_size(&self) -> usize;

    /// Dimensionality of each input sample
    fn input_dim(&self) -> usize;

    /// Dimensionality of each readout
    fn output_dim(&self) -> usize;
}
