use std::{io::Read, path::Path};

use super::TimeSeriesProvider;
use crate::{Error, Result};

/// A time series loaded from one column of a csv file
#[derive(Debug, Clone)]
pub struct CsvSeries {
    values: Vec<f64>,
}

impl CsvSeries {
    /// Load the given column of a csv file
    ///
    /// # Arguments:
    /// path: location of the csv file
    /// column: zero based index of the column holding the values
    /// has_headers: whether the first record is a header to skip
    pub fn from_path<P: AsRef<Path>>(path: P, column: usize, has_headers: bool) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .from_path(path.as_ref())?;
        let series = Self::from_csv_reader(reader, column)?;
        info!("loaded {} datapoints from {}", series.values.len(), path.as_ref().display());

        Ok(series)
    }

    /// Load the given column from any reader yielding csv data
    pub fn from_reader<R: Read>(rdr: R, column: usize, has_headers: bool) -> Result<Self> {
        let reader = csv::ReaderBuilder::new().has_headers(has_headers).from_reader(rdr);

        Self::from_csv_reader(reader, column)
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>, column: usize) -> Result<Self> {
        let mut values = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let row = record?;
            let field = row.get(column).ok_or_else(|| Error::InvalidSeries {
                reason: format!("record {} has no column {}", i, column),
            })?;
            let value = field.trim().parse::<f64>().map_err(|_| Error::InvalidSeries {
                reason: format!("record {}: {:?} is not a number", i, field),
            })?;
            if !value.is_finite() {
                return Err(Error::InvalidSeries {
                    reason: format!("record {}: {} is not finite", i, value),
                });
            }
            values.push(value);
        }

        Ok(Self { values })
    }

    /// All loaded values
    #[inline(always)]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl TimeSeriesProvider for CsvSeries {
    fn series(&self, len: usize) -> Result<Vec<f64>> {
        self.values.series(len)
    }
}
