//! Sources of scalar time series to train and test reservoir computers on

use crate::{Error, Result};

mod csv_series;
mod mackey_glass;
mod npy_series;
mod sinus;

pub use csv_series::CsvSeries;
pub use mackey_glass::MackeyGlass;
pub use npy_series::NpySeries;
pub use sinus::Sinus;

/// Provides a scalar time series, e.g. a generator or a loaded file
pub trait TimeSeriesProvider {
    /// The first `len` samples of the series
    fn series(&self, len: usize) -> Result<Vec<f64>>;

    /// Split the series into a train part `[0, n1)` and a test part `[n1, n2)`.
    /// The test part is empty if `n2 <= n1`.
    fn train_test_split(&self, n1: usize, n2: usize) -> Result<(Vec<f64>, Vec<f64>)> {
        let end = n1.max(n2);
        let mut train = self.series(end)?;
        if train.len() < end {
            return Err(Error::SeriesTooShort {
                required: end,
                available: train.len(),
            });
        }
        train.truncate(end);
        let test = train.split_off(n1);

        Ok((train, test))
    }
}

/// An in memory series
impl TimeSeriesProvider for Vec<f64> {
    fn series(&self, len: usize) -> Result<Vec<f64>> {
        if self.len() < len {
            return Err(Error::SeriesTooShort {
                required: len,
                available: self.len(),
            });
        }

        Ok(self[..len].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_in_memory() {
        let values: Vec<f64> = (0..10).map(|v| v as f64).collect();

        let (train, test) = values.train_test_split(6, 9).unwrap();
        assert_eq!(train, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(test, vec![6.0, 7.0, 8.0]);
    }

    #[test]
    fn split_empty_test() {
        let values: Vec<f64> = (0..10).map(|v| v as f64).collect();

        let (train, test) = values.train_test_split(6, 6).unwrap();
        assert_eq!(train.len(), 6);
        assert!(test.is_empty());

        let (train, test) = values.train_test_split(6, 3).unwrap();
        assert_eq!(train.len(), 6);
        assert!(test.is_empty());
    }

    #[test]
    fn split_too_short() {
        let values = vec![0.0; 5];

        assert!(matches!(
            values.train_test_split(4, 8),
            Err(Error::SeriesTooShort {
                required: 8,
                available: 5
            })
        ));
    }
}
