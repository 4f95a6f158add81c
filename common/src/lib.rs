//! This crate provides common funcionality

#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod activation;
mod error;
mod metrics;
mod rc_trait;
pub mod series;

pub use activation::Activation;
pub use error::{Error, Result};
pub use metrics::rmse;
pub use rc_trait::{RCParams, ReservoirComputer};
pub use series::{CsvSeries, MackeyGlass, NpySeries, Sinus, TimeSeriesProvider};
