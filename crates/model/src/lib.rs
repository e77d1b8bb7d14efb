pub mod chart;
pub mod error;
pub mod query;
pub mod records;
pub mod validate;
