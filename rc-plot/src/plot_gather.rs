use crate::Series;

/// Collects the true signal and the autonomous prediction for plotting
#[derive(Debug, Clone, Default)]
pub struct PlotGather {
    plot_targets: Series,
    test_predictions: Series,
}

impl PlotGather {
    /// Gather aligned (signal, prediction) sequences, with x values starting at `x0`
    pub fn from_prediction(x0: usize, signal: &[f64], prediction: &[f64]) -> Self {
        let mut p = Self::default();
        for (i, (s, y)) in signal.iter().zip(prediction).enumerate() {
            let x = (x0 + i) as f64;
            p.push_target(x, *s);
            p.push_test_pred(x, *y);
        }

        p
    }

    #[inline(always)]
    pub fn push_target(&mut self, x: f64, y: f64) {
        self.plot_targets.push((x, y))
    }

    #[inline(always)]
    pub fn push_test_pred(&mut self, x: f64, y: f64) {
        self.test_predictions.push((x, y))
    }

    #[inline(always)]
    pub fn plot_targets(&self) -> &Series {
        &self.plot_targets
    }

    #[inline(always)]
    pub fn test_predictions(&self) -> &Series {
        &self.test_predictions
    }
}
