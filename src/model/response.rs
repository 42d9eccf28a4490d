/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Responses and error extraction

use crate::constants::CONTENT_RANGE_HEADER;
use crate::error::{ApiError, AppError};
use crate::model::headers::Headers;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

/// Response as read off the wire, before error extraction
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: Headers,
    /// Body text
    pub text: String,
}

impl RawResponse {
    /// Builds a response with no headers
    #[must_use]
    pub fn new(status: StatusCode, text: impl Into<String>) -> Self {
        Self {
            status,
            headers: Headers::new(),
            text: text.into(),
        }
    }

    /// Adds a response header
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Turns the raw response into a parsed one or a PostgREST error
    ///
    /// Success bodies must be JSON (an empty body reads as `null`). Error bodies
    /// that are JSON pass through; anything else becomes the envelope
    /// `{hint: null, details: null, code: 0, message: <text>}`.
    ///
    /// The envelope is only built for error statuses: a success response whose
    /// body is not JSON (a `text/csv` read, say) fails with [`AppError::Json`].
    pub fn extract(self) -> Result<ApiResponse, AppError> {
        if !self.status.is_success() {
            let api_error = ApiError::from_body(&self.text);
            error!("Request failed with status {}: {}", self.status, self.text);
            return Err(AppError::Api {
                status: self.status,
                error: api_error,
            });
        }

        let body = if self.text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&self.text)?
        };

        Ok(ApiResponse {
            status: self.status,
            headers: self.headers,
            body,
        })
    }
}

/// Successful response with a JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: Headers,
    /// Parsed body, `null` when the server sent nothing
    pub body: Value,
}

impl ApiResponse {
    /// Deserializes the body into `T`
    pub fn json<T: DeserializeOwned>(self) -> Result<T, AppError> {
        Ok(serde_json::from_value(self.body)?)
    }

    /// Rows of an array body, empty for anything else
    #[must_use]
    pub fn rows(&self) -> &[Value] {
        self.body.as_array().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parsed `Content-Range` header, if the server sent one
    #[must_use]
    pub fn content_range(&self) -> Option<ContentRange> {
        self.headers
            .get(CONTENT_RANGE_HEADER)
            .and_then(ContentRange::parse)
    }
}

/// `Content-Range: <from>-<to>/<total>` as sent by PostgREST
///
/// An empty result is sent as `*/<total>`; an unknown total as `<from>-<to>/*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    /// Served item range, `None` when nothing was served
    pub range: Option<(u64, u64)>,
    /// Total row count, `None` when the server did not count
    pub total: Option<u64>,
}

impl ContentRange {
    /// Parses the header value, returning `None` on malformed input
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let value = value.strip_prefix("items ").unwrap_or(value);
        let (range, total) = value.split_once('/')?;

        let range = match range {
            "*" => None,
            r => {
                let (from, to) = r.split_once('-')?;
                Some((from.trim().parse().ok()?, to.trim().parse().ok()?))
            }
        };
        let total = match total {
            "*" => None,
            t => Some(t.trim().parse().ok()?),
        };

        Some(Self { range, total })
    }
}
