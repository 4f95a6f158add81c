#[macro_use]
extern crate log;

mod esn;
mod esn_constructor;
mod params;
mod reservoir_constructor;
mod spectral_radius;
pub mod state;
mod trace;
mod weight_set;

pub use esn::ESN;
pub use esn_constructor::ESNConstructor;
pub use params::Params;
pub use reservoir_constructor::ReservoirConstructor;
pub use spectral_radius::SpectralRadius;
pub use state::ReservoirState;
pub use trace::StateTrace;
pub use weight_set::WeightSet;
