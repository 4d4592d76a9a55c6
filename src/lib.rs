#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// #![warn(clippy::cargo)]

pub mod engine;
pub mod error;
pub mod report;
pub mod series;
pub mod typeb;

pub use engine::{combined_uncertainty, UncertaintyEngine, COVERAGE_FACTOR};
pub use error::Error;
pub use report::UncertaintyReport;
pub use series::MeasurementSeries;
pub use typeb::{Distribution, TypeBSpec};

pub type Result<T> = ::std::result::Result<T, Error>;
