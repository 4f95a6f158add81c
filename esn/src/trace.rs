use nalgebra::{DMatrix, DVector};

/// Internal states recorded after the warmup, along with the targets
/// the readout should produce from them
#[derive(Debug, Clone, Default)]
pub struct StateTrace {
    states: Vec<DVector<f64>>,
    targets: Vec<DVector<f64>>,
}

impl StateTrace {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
            targets: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn push(&mut self, state: DVector<f64>, target: DVector<f64>) {
        self.states.push(state);
        self.targets.push(target);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[inline(always)]
    pub fn states(&self) -> &[DVector<f64>] {
        &self.states
    }

    #[inline(always)]
    pub fn targets(&self) -> &[DVector<f64>] {
        &self.targets
    }

    /// Consume the trace into (states, targets) with time along the columns
    pub fn into_matrices(self, state_dim: usize, target_dim: usize) -> (DMatrix<f64>, DMatrix<f64>) {
        let states = DMatrix::from_fn(state_dim, self.states.len(), |i, j| self.states[j][i]);
        let targets = DMatrix::from_fn(target_dim, self.targets.len(), |i, j| self.targets[j][i]);

        (states, targets)
    }
}
