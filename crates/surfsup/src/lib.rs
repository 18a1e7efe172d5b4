pub mod db;
mod error;
mod extract;
mod period;
pub mod routes;
mod startup;
mod utils;

pub use db::{ClimateAccess, ClimateData, Measurement, Station, TemperatureStats};
pub use error::{Error, ErrorResponse};
pub use period::{format_date, parse_date, DateRange, ReportingPeriod};
pub use routes::*;
pub use startup::*;
pub use utils::*;
