#[macro_use]
extern crate log;

use nalgebra::DMatrix;

mod error;
mod tikhonov_regularization;

pub use error::LinRegError;
pub use tikhonov_regularization::TikhonovRegularization;

/// Generic way of performing linear regression and fitting the readout matrix
pub trait LinReg: Clone {
    /// Fit a readout matrix, mapping recorded states to targets
    ///
    /// # Parameters
    /// states: Recorded states with one column per timestep (dim_x x T)
    /// targets: Target data with one column per timestep (dim_y x T)
    ///
    /// # Returns
    /// The readout matrix (dim_y x dim_x)
    fn fit_readout(
        &self,
        states: &DMatrix<f64>,
        targets: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>, LinRegError>;
}
