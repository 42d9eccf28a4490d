/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/
/// Authentication token model
pub mod auth;
/// Case-insensitive header mapping
pub mod headers;
/// Range pagination headers
pub mod pagination;
/// Request descriptors and builders
pub mod request;
/// Responses and error extraction
pub mod response;

pub use auth::AuthToken;
pub use headers::Headers;
pub use pagination::{ItemRange, pagination_headers};
pub use request::{CallOptions, PreparedRequest, RequestOptions};
pub use response::{ApiResponse, ContentRange, RawResponse};
