use nalgebra::DMatrix;

use super::{LinReg, LinRegError};

/// Tikhonov regularization aka ridge regression
/// It is particularly useful to mitigate the problem of multicollinearity in
/// linear regression
///
/// Computes `W_out = (Y X^T) (X X^T + eps I)^-1` as a linear solve of the
/// symmetric positive definite system `(X X^T + eps I) W_out^T = X Y^T`,
/// so no explicit inverse is ever formed.
#[derive(Debug, Clone)]
pub struct TikhonovRegularization {
    /// Ridge parameter
    pub regularization_coeff: f64,
}

impl Default for TikhonovRegularization {
    fn default() -> Self {
        Self {
            regularization_coeff: 1e-8,
        }
    }
}

impl LinReg for TikhonovRegularization {
    fn fit_readout(
        &self,
        states: &DMatrix<f64>,
        targets: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>, LinRegError> {
        if states.ncols() != targets.ncols() {
            return Err(LinRegError::SampleCountMismatch {
                states: states.ncols(),
                targets: targets.ncols(),
            });
        }
        if states.ncols() == 0 || states.nrows() == 0 {
            return Err(LinRegError::EmptyTrace);
        }

        let dim = states.nrows();
        let reg_m = DMatrix::from_diagonal_element(dim, dim, self.regularization_coeff);
        let gram = states * states.transpose() + reg_m;
        let rhs = states * targets.transpose();
        debug!(
            "fit_readout: states: ({}, {}), targets: ({}, {})",
            states.nrows(),
            states.ncols(),
            targets.nrows(),
            targets.ncols()
        );

        let solution = match gram.clone().cholesky() {
            Some(chol) => chol.solve(&rhs),
            None => {
                warn!("gram matrix is not positive definite, falling back to LU decomposition");
                gram.lu().solve(&rhs).ok_or(LinRegError::SingularMatrix { dim })?
            }
        };
        if solution.iter().any(|v| !v.is_finite()) {
            return Err(LinRegError::SingularMatrix { dim });
        }

        Ok(solution.transpose())
    }
}
