/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/
use crate::constants::{DEFAULT_API_PREFIX, DEFAULT_AUTH_PATH, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS};
use crate::error::AppError;
use crate::model::headers::Headers;
use crate::utils::config::{get_env_or_default, get_env_or_none, parse_header_list};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration for the PostgREST client
pub struct Config {
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// Login request issued by `authenticate`
    pub authentication: AuthenticationConfig,
    /// Headers added underneath every request
    pub global_headers: BTreeMap<String, String>,
    /// Initial page size of every resource model
    pub page_size: u32,
    /// What authenticated requests do when login fails
    pub auth_fallback: AuthFallback,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the REST API
pub struct RestApiConfig {
    /// Prefix prepended to every resource URL, e.g. `https://api.example.com`
    pub api_prefix: String,
    /// Timeout in seconds for REST API requests
    pub timeout: u64,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Login request description
///
/// The URL is used as is; the API prefix is not applied. The endpoint must
/// answer with `{"token": "<string>"}`.
pub struct AuthenticationConfig {
    /// HTTP method, `POST` unless configured otherwise
    pub method: String,
    /// Absolute login URL
    pub url: String,
    /// Optional JSON body, e.g. credentials
    pub body: Option<Value>,
    /// Extra headers sent with the login request only
    pub headers: BTreeMap<String, String>,
}

impl AuthenticationConfig {
    /// `POST` to `url` with no body
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::POST.to_string(),
            url: url.into(),
            body: None,
            headers: BTreeMap::new(),
        }
    }

    /// Sets the JSON body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the HTTP method
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method.to_string();
        self
    }

    /// Adds a header sent with the login request
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Parsed HTTP method
    pub fn method(&self) -> Result<Method, AppError> {
        Method::from_bytes(self.method.to_uppercase().as_bytes())
            .map_err(|_| AppError::InvalidInput(format!("invalid login method: {}", self.method)))
    }

    /// Login headers as a header set
    #[must_use]
    pub fn header_set(&self) -> Headers {
        Headers::from(&self.headers)
    }
}

/// Behaviour of token-authenticated requests when login fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthFallback {
    /// Send the request without `Authorization` and let the server decide
    #[default]
    Anonymous,
    /// Fail with the login error
    Fail,
}

impl FromStr for AuthFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anonymous" | "anon" => Ok(AuthFallback::Anonymous),
            "fail" | "error" => Ok(AuthFallback::Fail),
            other => Err(format!("unknown auth fallback: {other}")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from the environment
    ///
    /// Loads `.env` first when present. See [`Config::with_api_prefix`] for a
    /// configuration that does not touch the environment.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let api_prefix = get_env_or_default("POSTGREST_API_PREFIX", DEFAULT_API_PREFIX.to_string());
        let auth_url = get_env_or_default(
            "POSTGREST_AUTH_URL",
            format!("{}{}", api_prefix.trim_end_matches('/'), DEFAULT_AUTH_PATH),
        );
        let auth_method = get_env_or_default("POSTGREST_AUTH_METHOD", Method::POST.to_string());
        let auth_body: Option<Value> = get_env_or_none::<String>("POSTGREST_AUTH_BODY")
            .and_then(|raw| serde_json::from_str(&raw).ok());
        let global_headers = get_env_or_none::<String>("POSTGREST_GLOBAL_HEADERS")
            .map(|raw| parse_header_list(&raw))
            .unwrap_or_default();

        Config {
            rest_api: RestApiConfig {
                api_prefix,
                timeout: get_env_or_default("POSTGREST_TIMEOUT", DEFAULT_TIMEOUT_SECS),
            },
            authentication: AuthenticationConfig {
                method: auth_method,
                url: auth_url,
                body: auth_body,
                headers: BTreeMap::new(),
            },
            global_headers,
            page_size: get_env_or_default("POSTGREST_PAGE_SIZE", DEFAULT_PAGE_SIZE),
            auth_fallback: get_env_or_default("POSTGREST_AUTH_FALLBACK", AuthFallback::default()),
        }
    }

    /// Creates a configuration for `api_prefix` with defaults everywhere else
    #[must_use]
    pub fn with_api_prefix(api_prefix: impl Into<String>) -> Self {
        let api_prefix = api_prefix.into();
        let auth_url = format!("{}{}", api_prefix.trim_end_matches('/'), DEFAULT_AUTH_PATH);
        Config {
            rest_api: RestApiConfig {
                api_prefix,
                timeout: DEFAULT_TIMEOUT_SECS,
            },
            authentication: AuthenticationConfig::post(auth_url),
            global_headers: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
            auth_fallback: AuthFallback::default(),
        }
    }

    /// Replaces the login request
    #[must_use]
    pub fn authentication(mut self, authentication: AuthenticationConfig) -> Self {
        self.authentication = authentication;
        self
    }

    /// Adds a header sent with every request
    #[must_use]
    pub fn global_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.global_headers.insert(name.into(), value.into());
        self
    }

    /// Sets the initial page size of resource models
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the behaviour of authenticated requests when login fails
    #[must_use]
    pub fn auth_fallback(mut self, auth_fallback: AuthFallback) -> Self {
        self.auth_fallback = auth_fallback;
        self
    }

    /// Global headers as a header set
    #[must_use]
    pub fn global_header_set(&self) -> Headers {
        Headers::from(&self.global_headers)
    }
}
