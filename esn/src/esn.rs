use std::time::Instant;

use common::{rmse, Error, RCParams, ReservoirComputer, Result, TimeSeriesProvider};
use lin_reg::{LinReg, TikhonovRegularization};
use nalgebra::{DMatrix, DVector};

use crate::{
    state::{next_internal_state, project_readout},
    ESNConstructor, Params, ReservoirConstructor, ReservoirState, StateTrace, WeightSet,
};

/// The Reservoir Computer, Leaky Echo State Network.
/// The first reservoir node is pinned to 1 after every update and acts as bias for the readout.
#[derive(Debug)]
pub struct ESN<R> {
    params: Params,
    weights: WeightSet,
    state: ReservoirState,
    regressor: R,
}

impl ESN<TikhonovRegularization> {
    /// Create a network with default parameters and ridge regression readout
    ///
    /// # Arguments
    /// reservoir_size: number of reservoir nodes
    /// output_dim: dimensionality of the readout
    /// input_dim: dimensionality of the input, must equal output_dim
    pub fn from_dims(reservoir_size: usize, output_dim: usize, input_dim: usize) -> Result<Self> {
        Self::from_params(Params::new(reservoir_size, output_dim, input_dim)?)
    }

    /// Create a network with ridge regression readout and randomly initialized weights
    pub fn from_params(params: Params) -> Result<Self> {
        let regressor = TikhonovRegularization {
            regularization_coeff: params.regularization_coeff,
        };
        let constructor = ESNConstructor::from_params(&params);

        Self::new(params, regressor, constructor)
    }
}

impl<R> ESN<R> {
    /// Create a new reservoir, with weights from the given constructor
    pub fn new<C>(params: Params, regressor: R, mut reservoir_constructor: C) -> Result<Self>
    where
        C: ReservoirConstructor,
    {
        params.validate()?;

        let weights = reservoir_constructor.construct_weights()?;
        let checks = [
            ("input weights", weights.input.shape(), (params.reservoir_size, params.input_dim)),
            ("readout weights", weights.readout.shape(), (params.output_dim, params.reservoir_size)),
        ];
        for (context, actual, expected) in checks {
            if actual != expected {
                return Err(Error::ShapeMismatch {
                    context,
                    expected,
                    actual,
                });
            }
        }

        let internal = reservoir_constructor.construct_initial_state();
        if internal.len() != params.reservoir_size {
            return Err(Error::ShapeMismatch {
                context: "initial state",
                expected: (params.reservoir_size, 1),
                actual: internal.shape(),
            });
        }
        trace!(
            "input_matrix: {}\nreservoir: {}\nreadout_matrix: {}",
            weights.input,
            weights.reservoir,
            weights.readout
        );
        let state = ReservoirState::new(internal, params.input_dim, params.output_dim);

        Ok(Self {
            params,
            weights,
            state,
            regressor,
        })
    }

    #[inline(always)]
    pub fn weights(&self) -> &WeightSet {
        &self.weights
    }

    #[inline(always)]
    pub fn reservoir_state(&self) -> &ReservoirState {
        &self.state
    }

    fn check_series(&self, context: &'static str, series: &DMatrix<f64>, dim: usize) -> Result<()> {
        if series.ncols() != dim {
            return Err(Error::ShapeMismatch {
                context,
                expected: (series.nrows(), dim),
                actual: series.shape(),
            });
        }

        Ok(())
    }
}

impl<R> ESN<R>
where
    R: LinReg,
{
    /// Drive the reservoir with teacher forced inputs, recording states
    /// and targets once the warmup has passed
    ///
    /// # Arguments:
    /// inputs: one row per timestep, input_dim columns
    /// targets: one row per timestep, output_dim columns
    pub fn harvest_states(
        &mut self,
        inputs: &DMatrix<f64>,
        targets: &DMatrix<f64>,
    ) -> Result<StateTrace> {
        self.check_series("training inputs", inputs, self.params.input_dim)?;
        self.check_series("training targets", targets, self.params.output_dim)?;
        if inputs.nrows() != targets.nrows() {
            return Err(Error::ShapeMismatch {
                context: "training targets",
                expected: (inputs.nrows(), self.params.output_dim),
                actual: targets.shape(),
            });
        }

        let mut trace = StateTrace::with_capacity(inputs.nrows().saturating_sub(self.params.warmup));
        for i in 0..inputs.nrows() {
            self.update_state(&inputs.row(i).transpose())?;

            // discard earlier values, as the state has to stabilize first
            if i >= self.params.warmup {
                trace.push(self.state.internal.clone(), targets.row(i).transpose());
            }
        }
        debug!("harvested {} of {} states", trace.len(), inputs.nrows());

        Ok(trace)
    }

    /// Replace the readout with the one fitted on the given trace
    pub fn fit_readout(&mut self, trace: StateTrace) -> Result<()> {
        if trace.is_empty() {
            return Err(Error::InsufficientTrainingData {
                samples: 0,
                warmup: self.params.warmup,
            });
        }
        let (states, targets) = trace.into_matrices(self.params.reservoir_size, self.params.output_dim);
        let readout_matrix = self.regressor.fit_readout(&states, &targets)?;

        let expected = (self.params.output_dim, self.params.reservoir_size);
        if readout_matrix.shape() != expected {
            return Err(Error::ShapeMismatch {
                context: "fitted readout",
                expected,
                actual: readout_matrix.shape(),
            });
        }
        info!("readout dims: ({}, {})", readout_matrix.nrows(), readout_matrix.ncols());
        self.weights.readout = readout_matrix;

        Ok(())
    }

    /// Run the network in closed loop, feeding every output back as the next input
    ///
    /// # Arguments:
    /// first_input: the input of the first step
    /// steps: number of outputs to produce
    pub fn generate(&mut self, first_input: &DVector<f64>, steps: usize) -> Result<Vec<DVector<f64>>> {
        if first_input.len() != self.params.input_dim {
            return Err(Error::ShapeMismatch {
                context: "generation input",
                expected: (self.params.input_dim, 1),
                actual: first_input.shape(),
            });
        }

        let mut outputs = Vec::with_capacity(steps);
        let mut input = first_input.clone();
        for _ in 0..steps {
            self.update_state(&input)?;
            let output = self.readout()?;
            self.state.output = output.clone();

            // link the output to the input
            input = output.clone();
            outputs.push(output);
        }

        Ok(outputs)
    }

    /// Teacher forced training on `train`, then autonomous generation over
    /// the length of `test`, seeded with the first test sample.
    ///
    /// # Returns:
    /// (true signal, predicted signal) of the first output component
    pub fn train_and_test_series(
        &mut self,
        train: &DMatrix<f64>,
        test: &DMatrix<f64>,
    ) -> Result<(Vec<f64>, Vec<f64>)> {
        self.check_series("test series", test, self.params.input_dim)?;
        self.train(train, train)?;
        if test.nrows() == 0 {
            return Ok((vec![], vec![]));
        }

        let t0 = Instant::now();
        let outputs = self.generate(&test.row(0).transpose(), test.nrows())?;
        let signal: Vec<f64> = test.column(0).iter().copied().collect();
        let prediction: Vec<f64> = outputs.iter().map(|o| o[0]).collect();
        info!(
            "generated {} steps in {}ms, rmse: {}",
            prediction.len(),
            t0.elapsed().as_millis(),
            rmse(&signal, &prediction)
        );

        Ok((signal, prediction))
    }

    /// Train on `[0, n1)` of the provided scalar series, then predict `[n1, n2)` autonomously
    ///
    /// # Returns:
    /// (true signal, predicted signal), both of length `n2 - n1` (empty if `n2 <= n1`)
    pub fn train_and_test<P>(&mut self, provider: &P, n1: usize, n2: usize) -> Result<(Vec<f64>, Vec<f64>)>
    where
        P: TimeSeriesProvider + ?Sized,
    {
        if self.params.input_dim != 1 {
            return Err(Error::Configuration(format!(
                "scalar time series need input_dim 1, got {}",
                self.params.input_dim
            )));
        }
        if n1 <= self.params.warmup {
            return Err(Error::InsufficientTrainingData {
                samples: n1,
                warmup: self.params.warmup,
            });
        }

        let (train, test) = provider.train_test_split(n1, n2)?;
        let train = DMatrix::from_column_slice(train.len(), 1, &train);
        let test = DMatrix::from_column_slice(test.len(), 1, &test);

        self.train_and_test_series(&train, &test)
    }
}

impl<R> ReservoirComputer for ESN<R>
where
    R: LinReg,
{
    #[inline(always)]
    fn params(&self) -> &dyn RCParams {
        &self.params
    }

    fn train(&mut self, inputs: &DMatrix<f64>, targets: &DMatrix<f64>) -> Result<()> {
        if inputs.nrows() <= self.params.warmup {
            return Err(Error::InsufficientTrainingData {
                samples: inputs.nrows(),
                warmup: self.params.warmup,
            });
        }

        let t0 = Instant::now();
        let snapshot = self.state.clone();
        let result = self.harvest_states(inputs, targets).and_then(|trace| self.fit_readout(trace));
        if let Err(e) = result {
            self.state = snapshot;
            return Err(e);
        }
        info!("ESN training done in {}ms", t0.elapsed().as_millis());

        Ok(())
    }

    fn update_state(&mut self, input: &DVector<f64>) -> Result<()> {
        let mut internal = next_internal_state(
            &self.weights,
            &self.state.internal,
            input,
            self.params.leaking_rate,
            self.params.reservoir_activation,
        )?;
        // bias
        internal[0] = 1.0;

        self.state.internal = internal;
        self.state.input.copy_from(input);

        Ok(())
    }

    /// Perform a readout operation
    #[inline]
    fn readout(&self) -> Result<DVector<f64>> {
        project_readout(&self.weights.readout, &self.state.internal)
    }

    #[inline(always)]
    fn state(&self) -> &DVector<f64> {
        &self.state.internal
    }

    fn set_state(&mut self, state: DVector<f64>) -> Result<()> {
        if state.len() != self.params.reservoir_size {
            return Err(Error::ShapeMismatch {
                context: "set_state",
                expected: (self.params.reservoir_size, 1),
                actual: state.shape(),
            });
        }
        self.state.internal = state;

        Ok(())
    }

    #[inline(always)]
    fn readout_matrix(&self) -> &DMatrix<f64> {
        &self.weights.readout
    }
}

#[cfg(test)]
mod tests {
    use common::MackeyGlass;
    use lin_reg::LinRegError;

    use super::*;

    fn small_params() -> Params {
        Params {
            spectral_radius: 1.0,
            leaking_rate: 1.0,
            warmup: 2,
            seed: Some(0),
            ..Params::new(10, 1, 1).unwrap()
        }
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        assert!(matches!(ESN::from_dims(10, 2, 1), Err(Error::Configuration(_))));
    }

    #[test]
    fn degenerate_reservoir_is_rejected() {
        let params = Params {
            reservoir_density: 0.0,
            ..small_params()
        };

        assert!(matches!(ESN::from_params(params), Err(Error::DegenerateMatrix { .. })));
    }

    #[test]
    fn bias_unit_stays_pinned() {
        let mut esn = ESN::from_params(small_params()).unwrap();
        for i in 0..50 {
            let input = DVector::from_element(1, (i as f64 * 0.3).sin());
            esn.update_state(&input).unwrap();
            assert_eq!(esn.state()[0], 1.0);
        }
    }

    #[test]
    fn warmup_and_recording() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let mut esn = ESN::from_params(small_params()).unwrap();
        let inputs = DMatrix::from_element(10, 1, 0.5);

        let trace = esn.harvest_states(&inputs, &inputs).unwrap();

        assert_eq!(trace.len(), 8);
        for (state, target) in trace.states().iter().zip(trace.targets()) {
            assert_eq!(state.len(), 10);
            assert_eq!(state[0], 1.0);
            assert_eq!(target[0], 0.5);
        }
        // no reset, the last recorded state is the current one
        assert_eq!(trace.states().last().unwrap(), esn.state());
    }

    #[test]
    fn train_and_test_constant_series() {
        let mut esn = ESN::from_params(small_params()).unwrap();
        let values = vec![0.5; 15];

        let (signal, prediction) = esn.train_and_test(&values, 10, 15).unwrap();

        assert_eq!(signal, vec![0.5; 5]);
        assert_eq!(prediction.len(), 5);
        assert!(prediction.iter().all(|v| v.is_finite()));
        assert_eq!(esn.readout_matrix().shape(), (1, 10));
    }

    #[test]
    fn too_little_training_data() {
        let params = Params {
            warmup: 100,
            seed: Some(0),
            ..Params::new(20, 1, 1).unwrap()
        };
        let mut esn = ESN::from_params(params).unwrap();
        let readout_before = esn.readout_matrix().clone();
        let state_before = esn.reservoir_state().clone();

        let values = MackeyGlass::default().generate(80);
        let res = esn.train_and_test(&values, 50, 80);

        assert!(matches!(
            res,
            Err(Error::InsufficientTrainingData {
                samples: 50,
                warmup: 100
            })
        ));
        assert_eq!(esn.readout_matrix(), &readout_before);
        assert_eq!(esn.reservoir_state(), &state_before);
    }

    #[test]
    fn empty_test_range() {
        let mut esn = ESN::from_params(small_params()).unwrap();
        let values = vec![0.5; 10];

        let (signal, prediction) = esn.train_and_test(&values, 10, 10).unwrap();

        assert!(signal.is_empty());
        assert!(prediction.is_empty());
    }

    #[test]
    fn series_too_short() {
        let mut esn = ESN::from_params(small_params()).unwrap();
        let values = vec![0.5; 12];

        assert!(matches!(
            esn.train_and_test(&values, 10, 15),
            Err(Error::SeriesTooShort {
                required: 15,
                available: 12
            })
        ));
    }

    #[test]
    fn training_shape_mismatch() {
        let mut esn = ESN::from_params(small_params()).unwrap();
        let readout_before = esn.readout_matrix().clone();

        let inputs = DMatrix::from_element(10, 2, 0.5);
        assert!(matches!(esn.train(&inputs, &inputs), Err(Error::ShapeMismatch { .. })));

        let inputs = DMatrix::from_element(10, 1, 0.5);
        let targets = DMatrix::from_element(9, 1, 0.5);
        assert!(matches!(esn.train(&inputs, &targets), Err(Error::ShapeMismatch { .. })));

        assert_eq!(esn.readout_matrix(), &readout_before);
    }

    /// A solver that always fails, to observe the absence of side effects
    #[derive(Debug, Clone)]
    struct Failing;

    impl LinReg for Failing {
        fn fit_readout(
            &self,
            states: &DMatrix<f64>,
            _targets: &DMatrix<f64>,
        ) -> std::result::Result<DMatrix<f64>, LinRegError> {
            Err(LinRegError::SingularMatrix {
                dim: states.nrows(),
            })
        }
    }

    #[test]
    fn failed_fit_has_no_side_effects() {
        let params = small_params();
        let constructor = ESNConstructor::from_params(&params);
        let mut esn = ESN::new(params, Failing, constructor).unwrap();
        let readout_before = esn.readout_matrix().clone();
        let state_before = esn.reservoir_state().clone();

        let inputs = DMatrix::from_element(10, 1, 0.5);
        assert!(matches!(esn.train(&inputs, &inputs), Err(Error::SingularMatrix { dim: 10 })));

        assert_eq!(esn.readout_matrix(), &readout_before);
        assert_eq!(esn.reservoir_state(), &state_before);
    }

    #[test]
    fn generation_feeds_output_back() {
        let mut esn = ESN::from_params(small_params()).unwrap();
        let first = DVector::from_element(1, 0.3);

        let outputs = esn.generate(&first, 2).unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(esn.reservoir_state().input, outputs[0]);
        assert_eq!(esn.reservoir_state().output, outputs[1]);
        assert_eq!(esn.readout().unwrap(), outputs[1]);
    }

    #[test]
    fn set_state_checks_length() {
        let mut esn = ESN::from_params(small_params()).unwrap();

        assert!(esn.set_state(DVector::zeros(10)).is_ok());
        assert!(matches!(esn.set_state(DVector::zeros(3)), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn mackey_glass_prediction() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let params = Params {
            spectral_radius: 0.9,
            seed: Some(0),
            ..Params::new(100, 1, 1).unwrap()
        };
        let mut esn = ESN::from_params(params).unwrap();
        let mg = MackeyGlass::default();

        let (signal, prediction) = esn.train_and_test(&mg, 500, 600).unwrap();

        assert_eq!(signal.len(), 100);
        assert_eq!(prediction.len(), 100);
        assert_eq!(signal, mg.generate(600)[500..].to_vec());
        assert!(prediction.iter().all(|v| v.is_finite()));
        // the first step is still conditioned on the true signal
        assert!((prediction[0] - signal[0]).abs() < 0.1);
    }
}
