use super::TimeSeriesProvider;
use crate::Result;

/// Discrete Mackey-Glass delay map
/// `y[t + 1] = c * y[t] + a * y[t - tau] / (b + y[t - tau]^exponent)`
///
/// Values before `t = 0` are taken to be the initial value.
#[derive(Debug, Clone)]
pub struct MackeyGlass {
    /// Production rate of the delayed term
    pub a: f64,
    /// Offset of the delayed term's denominator
    pub b: f64,
    /// Decay factor of the previous value
    pub c: f64,
    /// Delay in samples, larger values give more chaotic behaviour
    pub tau: usize,
    /// Exponent of the delayed term's denominator
    pub exponent: i32,
    /// Value of the series at `t <= 0`
    pub initial: f64,
}

impl Default for MackeyGlass {
    fn default() -> Self {
        Self {
            a: 0.2,
            b: 1.0,
            c: 0.9,
            tau: 17,
            exponent: 10,
            initial: 0.1,
        }
    }
}

impl MackeyGlass {
    /// Generate `len` samples of the series
    pub fn generate(&self, len: usize) -> Vec<f64> {
        let mut y = vec![self.initial; len];
        for t in 0..len.saturating_sub(1) {
            let delayed = if t >= self.tau {
                y[t - self.tau]
            } else {
                self.initial
            };
            y[t + 1] = self.c * y[t] + self.a * delayed / (self.b + delayed.powi(self.exponent));
        }

        y
    }
}

impl TimeSeriesProvider for MackeyGlass {
    fn series(&self, len: usize) -> Result<Vec<f64>> {
        Ok(self.generate(len))
    }
}
