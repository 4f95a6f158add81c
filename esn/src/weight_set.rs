use common::{Error, Result};
use nalgebra::DMatrix;

/// The three weight matrices of an Echo State Network.
/// Input and reservoir weights are fixed after construction,
/// only the readout gets replaced by training.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSet {
    pub(crate) input: DMatrix<f64>,
    pub(crate) reservoir: DMatrix<f64>,
    pub(crate) readout: DMatrix<f64>,
}

impl WeightSet {
    /// Bundle the matrices, making sure their shapes fit together
    ///
    /// # Arguments:
    /// input: reservoir_size x input_dim
    /// reservoir: reservoir_size x reservoir_size
    /// readout: output_dim x reservoir_size
    pub fn new(input: DMatrix<f64>, reservoir: DMatrix<f64>, readout: DMatrix<f64>) -> Result<Self> {
        let n = reservoir.nrows();
        if reservoir.ncols() != n {
            return Err(Error::ShapeMismatch {
                context: "reservoir weights",
                expected: (n, n),
                actual: reservoir.shape(),
            });
        }
        if input.nrows() != n {
            return Err(Error::ShapeMismatch {
                context: "input weights",
                expected: (n, input.ncols()),
                actual: input.shape(),
            });
        }
        if readout.ncols() != n {
            return Err(Error::ShapeMismatch {
                context: "readout weights",
                expected: (readout.nrows(), n),
                actual: readout.shape(),
            });
        }

        Ok(Self {
            input,
            reservoir,
            readout,
        })
    }

    /// W_in
    #[inline(always)]
    pub fn input_weight_matrix(&self) -> &DMatrix<f64> {
        &self.input
    }

    /// W
    #[inline(always)]
    pub fn reservoir_matrix(&self) -> &DMatrix<f64> {
        &self.reservoir
    }

    /// W_out
    #[inline(always)]
    pub fn readout_matrix(&self) -> &DMatrix<f64> {
        &self.readout
    }
}
