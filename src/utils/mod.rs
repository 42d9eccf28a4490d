/// Environment variable helpers used by the configuration
pub mod config;
/// Module containing logging utilities
pub mod logger;
/// Query-string construction for filters and read parameters
pub mod query;

pub use config::*;
pub use logger::*;
pub use query::*;
