/// Default number of rows per page for resource reads
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default API prefix when none is configured
pub const DEFAULT_API_PREFIX: &str = "http://localhost:3000";
/// Default login path, relative to the API prefix
pub const DEFAULT_AUTH_PATH: &str = "/rpc/login";
/// User agent string used in HTTP requests to identify this client
pub const USER_AGENT: &str = concat!("postgrest-client/", env!("CARGO_PKG_VERSION"));
/// Header carrying the bearer token
pub const AUTHORIZATION_HEADER: &str = "Authorization";
/// PostgREST preference header
pub const PREFER_HEADER: &str = "Prefer";
/// Preference asking the server to echo written rows
pub const RETURN_REPRESENTATION: &str = "return=representation";
/// Preference disabling the row count on reads
pub const COUNT_NONE: &str = "count=none";
/// Preference asking for an exact row count on reads
pub const COUNT_EXACT: &str = "count=exact";
/// Range unit header name
pub const RANGE_UNIT_HEADER: &str = "Range-unit";
/// Range header name
pub const RANGE_HEADER: &str = "Range";
/// Response header carrying the served range and total
pub const CONTENT_RANGE_HEADER: &str = "Content-Range";
