/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! HTTP transport seam
//!
//! Everything above this module works on [`PreparedRequest`] and
//! [`RawResponse`]. The default transport sends through `reqwest`; tests and
//! embedders can plug in their own.

use crate::application::config::Config;
use crate::constants::USER_AGENT;
use crate::error::AppError;
use crate::model::headers::Headers;
use crate::model::request::PreparedRequest;
use crate::model::response::RawResponse;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tracing::debug;

/// Sends a prepared request and returns the response as read off the wire
///
/// Implementations report non-success statuses as a [`RawResponse`]; only
/// transport failures are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends one request
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, AppError>;
}

/// `reqwest` backed transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport using the configured timeout
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.rest_api.timeout))
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, AppError> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(header_map(&request.headers)?);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            match value.to_str() {
                Ok(value) => headers.append(name.as_str(), value),
                Err(_) => debug!("Skipping non-ASCII response header {}", name),
            }
        }
        let text = response.text().await?;

        Ok(RawResponse {
            status,
            headers,
            text,
        })
    }
}

fn header_map(headers: &Headers) -> Result<HeaderMap, AppError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::InvalidHeader(format!("{name:?}: {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| AppError::InvalidHeader(format!("{name}: {e}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
