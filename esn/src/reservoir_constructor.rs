use common::Result;
use nalgebra::{DMatrix, DVector};

use crate::WeightSet;

/// Provides the abstraction needed for custom implementations of the reservoir generation process
pub trait ReservoirConstructor {
    fn construct_input_weight_matrix(&mut self) -> DMatrix<f64>;

    fn construct_readout_matrix(&mut self) -> DMatrix<f64>;

    fn construct_reservoir_weights(&mut self) -> Result<DMatrix<f64>>;

    fn construct_initial_state(&mut self) -> DVector<f64>;

    /// Construct all weights, in the order input, readout, reservoir
    fn construct_weights(&mut self) -> Result<WeightSet> {
        let input = self.construct_input_weight_matrix();
        let readout = self.construct_readout_matrix();
        let reservoir = self.construct_reservoir_weights()?;

        WeightSet::new(input, reservoir, readout)
    }
}
