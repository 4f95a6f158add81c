use lin_reg::LinRegError;
use thiserror::Error;

/// Convenience alias used throughout the reservoir computing crates
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building, training or running a reservoir computer
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameter or dimension relationship at construction
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The recurrent matrix has a zero spectral radius, so it can't be rescaled
    #[error("reservoir matrix is degenerate (spectral radius {spectral_radius}), cannot rescale")]
    DegenerateMatrix {
        /// The estimated spectral radius before rescaling
        spectral_radius: f64,
    },

    /// Matrix or vector dimensions don't line up
    #[error("shape mismatch in {context}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Where the mismatch was detected
        context: &'static str,
        /// Expected (rows, cols)
        expected: (usize, usize),
        /// Observed (rows, cols)
        actual: (usize, usize),
    },

    /// The regularized covariance matrix is not invertible
    #[error("regularized matrix of dimension {dim} is singular")]
    SingularMatrix {
        /// Dimension of the square matrix
        dim: usize,
    },

    /// The recording phase would produce an empty trace
    #[error("{samples} training samples do not exceed the warmup of {warmup} steps")]
    InsufficientTrainingData {
        /// Number of training samples provided
        samples: usize,
        /// Number of warmup steps that are discarded
        warmup: usize,
    },

    /// A time series provider can't deliver enough samples
    #[error("time series has {available} samples but {required} are required")]
    SeriesTooShort {
        /// Number of samples requested
        required: usize,
        /// Number of samples available
        available: usize,
    },

    /// A loaded time series contains unusable values
    #[error("invalid time series: {reason}")]
    InvalidSeries {
        /// Human readable description
        reason: String,
    },

    /// Reading a csv time series failed
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Reading a `.npy` time series failed
    #[error("reading npy series: {0}")]
    Npy(std::io::Error),
}

impl From<LinRegError> for Error {
    fn from(err: LinRegError) -> Self {
        match err {
            LinRegError::SampleCountMismatch { states, targets } => Error::ShapeMismatch {
                context: "readout fit samples",
                expected: (1, states),
                actual: (1, targets),
            },
            LinRegError::EmptyTrace => Error::InsufficientTrainingData {
                samples: 0,
                warmup: 0,
            },
            LinRegError::SingularMatrix { dim } => Error::SingularMatrix { dim },
        }
    }
}
