//! The state update engine: one step of leaky integrated reservoir dynamics
//! and the linear readout

use common::{Activation, Error, Result};
use nalgebra::{DMatrix, DVector};

use crate::WeightSet;

/// Everything that changes while the reservoir is being driven
#[derive(Debug, Clone, PartialEq)]
pub struct ReservoirState {
    /// Activations of the reservoir nodes, x
    pub internal: DVector<f64>,
    /// The input fed in the last step, u
    pub input: DVector<f64>,
    /// The last readout, y
    pub output: DVector<f64>,
}

impl ReservoirState {
    pub fn new(internal: DVector<f64>, input_dim: usize, output_dim: usize) -> Self {
        Self {
            internal,
            input: DVector::zeros(input_dim),
            output: DVector::zeros(output_dim),
        }
    }
}

/// Compute `(1 - a) * x + a * f(W_in * u + W * x)`
///
/// # Arguments:
/// weights: the input and reservoir weights being used
/// prev: the previous internal state x
/// input: the current input u
/// leaking_rate: a
/// activation: f
pub fn next_internal_state(
    weights: &WeightSet,
    prev: &DVector<f64>,
    input: &DVector<f64>,
    leaking_rate: f64,
    activation: Activation,
) -> Result<DVector<f64>> {
    if input.len() != weights.input.ncols() {
        return Err(Error::ShapeMismatch {
            context: "state update input",
            expected: (weights.input.ncols(), 1),
            actual: input.shape(),
        });
    }
    if prev.len() != weights.reservoir.ncols() {
        return Err(Error::ShapeMismatch {
            context: "state update state",
            expected: (weights.reservoir.ncols(), 1),
            actual: prev.shape(),
        });
    }

    let mut candidate: DVector<f64> = &weights.input * input + &weights.reservoir * prev;
    activation.activate(candidate.as_mut_slice());

    Ok((1.0 - leaking_rate) * prev + leaking_rate * candidate)
}

/// The readout `W_out * x`
pub fn project_readout(readout: &DMatrix<f64>, internal: &DVector<f64>) -> Result<DVector<f64>> {
    if readout.ncols() != internal.len() {
        return Err(Error::ShapeMismatch {
            context: "readout",
            expected: (readout.ncols(), 1),
            actual: internal.shape(),
        });
    }

    Ok(readout * internal)
}
