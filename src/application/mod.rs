/// Token holder and login coalescing
pub mod auth;
/// Client facade
pub mod client;
/// Application configuration module
pub mod config;
/// Busy-flag wrapper around request functions
pub mod loader;
/// Resource models
pub mod model;
/// HTTP transport seam and the reqwest transport
pub mod transport;
