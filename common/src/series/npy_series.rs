use std::{fs::File, io::Read, path::Path};

use super::TimeSeriesProvider;
use crate::{Error, Result};

/// A time series stored as a float64 numpy array, e.g. a pre-generated `mackey-glass.npy`.
/// Accepts a vector or any array with a single non unit axis, like `(N, 1)`.
#[derive(Debug, Clone)]
pub struct NpySeries {
    values: Vec<f64>,
}

impl NpySeries {
    /// Load the array stored in a `.npy` file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(Error::Npy)?;
        let series = Self::from_reader(file)?;
        info!("loaded {} datapoints from {}", series.values.len(), path.as_ref().display());

        Ok(series)
    }

    /// Load an array from any reader yielding `.npy` data
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let npy = npyz::NpyFile::new(rdr).map_err(Error::Npy)?;
        let shape = npy.shape().to_vec();
        if shape.iter().filter(|d| **d != 1).count() > 1 {
            return Err(Error::InvalidSeries {
                reason: format!("expected a single series, got array of shape {:?}", shape),
            });
        }

        let values: Vec<f64> = npy.into_vec().map_err(Error::Npy)?;
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidSeries {
                reason: format!("element {}: {} is not finite", i, values[i]),
            });
        }
        debug!("npy array of shape {:?}", shape);

        Ok(Self { values })
    }

    /// All loaded values
    #[inline(always)]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl TimeSeriesProvider for NpySeries {
    fn series(&self, len: usize) -> Result<Vec<f64>> {
        self.values.series(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MackeyGlass;
    use npyz::WriterBuilder;

    fn npy_bytes(shape: &[u64], values: &[f64]) -> Vec<u8> {
        let mut buf = vec![];
        let mut writer = npyz::WriteOptions::new()
            .default_dtype()
            .shape(shape)
            .writer(&mut buf)
            .begin_nd()
            .unwrap();
        writer.extend(values.iter().copied()).unwrap();
        writer.finish().unwrap();

        buf
    }

    #[test]
    fn load_vector() {
        let data = npy_bytes(&[4], &[0.5, 0.25, -1.0, 2.0]);
        let series = NpySeries::from_reader(data.as_slice()).unwrap();

        assert_eq!(series.values(), &[0.5, 0.25, -1.0, 2.0]);

        let (train, test) = series.train_test_split(3, 4).unwrap();
        assert_eq!(train, vec![0.5, 0.25, -1.0]);
        assert_eq!(test, vec![2.0]);
    }

    #[test]
    fn load_column_vector_from_file() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let values = MackeyGlass::default().generate(50);
        let path = std::env::temp_dir().join(format!("npy_series_{}.npy", std::process::id()));
        std::fs::write(&path, npy_bytes(&[50, 1], &values)).unwrap();

        let series = NpySeries::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(series.values(), values.as_slice());

        let (train, test) = series.train_test_split(30, 50).unwrap();
        assert_eq!(train, values[..30].to_vec());
        assert_eq!(test, values[30..].to_vec());
    }

    #[test]
    fn rejects_matrix() {
        let data = npy_bytes(&[2, 2], &[0.0, 1.0, 2.0, 3.0]);

        assert!(matches!(
            NpySeries::from_reader(data.as_slice()),
            Err(Error::InvalidSeries { .. })
        ));
    }

    #[test]
    fn rejects_non_finite() {
        let data = npy_bytes(&[3], &[0.0, f64::NAN, 1.0]);

        assert!(matches!(
            NpySeries::from_reader(data.as_slice()),
            Err(Error::InvalidSeries { .. })
        ));
    }

    #[test]
    fn not_npy_data() {
        assert!(matches!(
            NpySeries::from_reader("0.1,0.2\n".as_bytes()),
            Err(Error::Npy(_))
        ));
        assert!(matches!(
            NpySeries::from_path("/nonexistent/mackey-glass.npy"),
            Err(Error::Npy(_))
        ));
    }

    #[test]
    fn too_short_for_split() {
        let data = npy_bytes(&[2], &[0.1, 0.2]);
        let series = NpySeries::from_reader(data.as_slice()).unwrap();

        assert!(matches!(
            series.train_test_split(1, 5),
            Err(Error::SeriesTooShort { .. })
        ));
    }
}
