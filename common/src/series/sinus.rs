use super::TimeSeriesProvider;
use crate::Result;

/// A plain sine wave, `sin(t * step)`
#[derive(Debug, Clone)]
pub struct Sinus {
    /// Phase advance per sample
    pub step: f64,
}

impl Default for Sinus {
    fn default() -> Self {
        Self { step: 0.1 }
    }
}

impl TimeSeriesProvider for Sinus {
    fn series(&self, len: usize) -> Result<Vec<f64>> {
        Ok((0..len).map(|t| (t as f64 * self.step).sin()).collect())
    }
}
