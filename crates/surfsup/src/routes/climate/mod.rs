pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use precipitation::{precipitation, precipitation_readings, PrecipitationReading};
pub use stations::stations;
pub use temperature::{temperature_since, temperature_between};
pub use tobs::tobs;
