use thiserror::Error;

/// Failures of the readout solvers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinRegError {
    /// States and targets disagree in their number of samples
    #[error("states have {states} samples but targets have {targets}")]
    SampleCountMismatch { states: usize, targets: usize },

    /// There is nothing to fit
    #[error("cannot fit a readout on an empty trace")]
    EmptyTrace,

    /// The regularized gram matrix could not be solved
    #[error("regularized gram matrix of dimension {dim} is singular")]
    SingularMatrix { dim: usize },
}
