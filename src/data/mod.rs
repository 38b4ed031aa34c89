pub mod coerce;
pub mod payload;
pub mod records;
