/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! # PostgREST Client
//!
//! A client for PostgREST-style HTTP APIs:
//!
//! - **Request composition**: descriptors with the API prefix, global headers,
//!   `Prefer` defaults and `Range` pagination applied in a fixed order
//! - **Authentication**: a bearer token obtained from a configurable login
//!   endpoint, with concurrent callers sharing one login request
//! - **Resource models**: `get_page`, `get_row`, `post`, `patch`,
//!   `delete_request` and `options` per resource, each with a token variant
//! - **Loaders**: busy flags for UI code, observable through `watch` channels
//! - **View models**: filter rendering and page accumulation
//!
//! Errors always carry a PostgREST-shaped body
//! (`{hint, details, code, message}`), synthesized when the server does not
//! answer with JSON.
//!
//! ```ignore
//! use postgrest_client::prelude::*;
//!
//! setup_logger();
//! let client = PostgrestClient::new(Config::new())?;
//! let projects = client.model("projects");
//! let row = projects
//!     .get_row_with_token(Some(json!({"id": "eq.42"})), &CallOptions::new(), &Headers::new())
//!     .await?;
//! ```

/// Client, authentication, models, loaders and transport
pub mod application;
/// Global constants
pub mod constants;
/// Error types
pub mod error;
/// Request and response models
pub mod model;
/// Convenience re-exports
pub mod prelude;
/// Filter and pagination view models
pub mod presentation;
/// Environment, logging and query-string helpers
pub mod utils;

pub use application::client::PostgrestClient;
pub use application::config::Config;
pub use error::{ApiError, AppError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
