/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! # PostgREST Client Prelude
//!
//! This module provides a convenient way to import the most commonly used types
//! of the library in one line.
//!
//! ## Usage
//!
//! ```rust
//! use postgrest_client::prelude::*;
//!
//! let config = Config::with_api_prefix("http://localhost:3000");
//! let client = PostgrestClient::new(config).unwrap();
//! let users = client.model("users");
//! assert_eq!(users.page_size(), 10);
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the client
pub use crate::application::config::{AuthFallback, AuthenticationConfig, Config, RestApiConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type and PostgREST error body
pub use crate::error::{ApiError, AppError};

// ============================================================================
// CLIENT, AUTHENTICATION AND LOADERS
// ============================================================================

/// Client facade
pub use crate::application::client::PostgrestClient;

/// Token holder
pub use crate::application::auth::Auth;

/// Resource models
pub use crate::application::model::Model;

/// Loaders
pub use crate::application::loader::{Loader, Pending, RedrawFn, RequestFn, ResponseFuture};

/// Transport seam
pub use crate::application::transport::{HttpTransport, ReqwestTransport};

// ============================================================================
// REQUEST AND RESPONSE MODELS
// ============================================================================

pub use crate::model::{
    ApiResponse, AuthToken, CallOptions, ContentRange, Headers, ItemRange, PreparedRequest,
    RawResponse, RequestOptions, pagination_headers,
};

// ============================================================================
// VIEW MODELS
// ============================================================================

pub use crate::presentation::{FilterOperator, FilterValue, FiltersVm, OrderDirection, PaginationVm};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Query-string utilities
pub use crate::utils::query::build_query_string;

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

pub use async_trait::async_trait;
pub use reqwest::{Method, StatusCode};
pub use serde::{Deserialize, Serialize};
pub use serde_json::{Value, json};
pub use std::sync::Arc;
pub use tracing::{debug, error, info, warn};
