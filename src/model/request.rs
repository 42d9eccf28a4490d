/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Request descriptors and the pure builders behind every resource operation
//!
//! Header precedence, lowest first: global headers (applied when the request
//! is sent), resource defaults (`Prefer`), the per-call `headers` argument,
//! pagination headers, and finally the headers carried by [`CallOptions`].

use crate::constants::{COUNT_NONE, PREFER_HEADER, RETURN_REPRESENTATION};
use crate::model::headers::Headers;
use crate::model::pagination::pagination_headers;
use crate::utils::query::append_query;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Describes a request before the API prefix and global headers are applied
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// URL relative to the API prefix, e.g. `/users?id=eq.1`
    pub url: String,
    /// Query parameters for `GET`, encoded into the URL; JSON body otherwise
    pub data: Option<Value>,
    /// Headers layered over the global ones
    pub headers: Headers,
    /// Marks a request issued by a loader, i.e. one that should not drive
    /// global loading indicators
    pub background: bool,
}

impl RequestOptions {
    /// Creates a descriptor with no data and no headers
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            data: None,
            headers: Headers::new(),
            background: false,
        }
    }

    /// Shorthand for a `GET` descriptor
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Shorthand for a `POST` descriptor
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Sets the request data
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Serializes `data` and sets it as the request data
    pub fn with_serialized<T: Serialize>(self, data: &T) -> Result<Self, serde_json::Error> {
        Ok(self.with_data(serde_json::to_value(data)?))
    }

    /// Adds or replaces one header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Marks the request as a background request
    #[must_use]
    pub fn in_background(mut self) -> Self {
        self.background = true;
        self
    }

    /// Places `headers` underneath the descriptor's own headers
    #[must_use]
    pub fn layered_over(mut self, headers: &Headers) -> Self {
        self.headers = headers.merged(&self.headers);
        self
    }

    /// Resolves the descriptor against an API prefix and global headers
    #[must_use]
    pub fn prepare(&self, api_prefix: &str, global_headers: &Headers) -> PreparedRequest {
        let (url, body) = match &self.data {
            Some(data) if self.method == Method::GET => (append_query(&self.url, data), None),
            Some(data) => (self.url.clone(), Some(data.clone())),
            None => (self.url.clone(), None),
        };
        PreparedRequest {
            method: self.method.clone(),
            url: format!("{}{}", api_prefix.trim_end_matches('/'), url),
            body,
            headers: global_headers.merged(&self.headers),
            background: self.background,
        }
    }
}

/// Caller supplied options merged into every resource descriptor
///
/// These headers take precedence over everything the builders add.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    /// Headers applied last
    pub headers: Headers,
    /// Marks the request as a background request
    pub background: bool,
}

impl CallOptions {
    /// Empty options, sent in the foreground
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Marks the request as a background request
    #[must_use]
    pub fn in_background(mut self) -> Self {
        self.background = true;
        self
    }
}

/// A fully resolved request handed to the transport
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL, including the encoded filters or `GET` data
    pub url: String,
    /// JSON body
    pub body: Option<Value>,
    /// Final header set
    pub headers: Headers,
    /// Background marker carried from the descriptor
    pub background: bool,
}

fn resource_url(name: &str) -> String {
    format!("/{}", name.trim_start_matches('/'))
}

fn finish(
    method: Method,
    url: String,
    data: Option<Value>,
    extra_headers: Headers,
    call: &CallOptions,
) -> RequestOptions {
    RequestOptions {
        method,
        url,
        data,
        headers: extra_headers.merged(&call.headers),
        background: call.background,
    }
}

/// `GET` descriptor with `Prefer: count=none` and range pagination
///
/// `page_size == 0` leaves the pagination headers out.
#[must_use]
pub fn get_options(
    name: &str,
    data: Option<Value>,
    page: u32,
    page_size: u32,
    call: &CallOptions,
    headers: &Headers,
) -> RequestOptions {
    let mut extra = Headers::new().with(PREFER_HEADER, COUNT_NONE);
    extra.merge(headers);
    extra.merge(&pagination_headers(page, page_size));
    finish(Method::GET, resource_url(name), data, extra, call)
}

fn representation_headers(headers: &Headers) -> Headers {
    let mut extra = Headers::new().with(PREFER_HEADER, RETURN_REPRESENTATION);
    extra.merge(headers);
    extra
}

/// `POST` descriptor asking the server to echo the created rows
#[must_use]
pub fn post_options(
    name: &str,
    attributes: Value,
    call: &CallOptions,
    headers: &Headers,
) -> RequestOptions {
    finish(
        Method::POST,
        resource_url(name),
        Some(attributes),
        representation_headers(headers),
        call,
    )
}

/// `PATCH` descriptor with `filters` in the query string
#[must_use]
pub fn patch_options(
    name: &str,
    filters: &Value,
    attributes: Value,
    call: &CallOptions,
    headers: &Headers,
) -> RequestOptions {
    finish(
        Method::PATCH,
        append_query(&resource_url(name), filters),
        Some(attributes),
        representation_headers(headers),
        call,
    )
}

/// `DELETE` descriptor with `filters` in the query string
#[must_use]
pub fn delete_options(
    name: &str,
    filters: &Value,
    call: &CallOptions,
    headers: &Headers,
) -> RequestOptions {
    finish(
        Method::DELETE,
        append_query(&resource_url(name), filters),
        None,
        representation_headers(headers),
        call,
    )
}

/// `OPTIONS` descriptor on the resource URL
#[must_use]
pub fn options_options(name: &str, call: &CallOptions) -> RequestOptions {
    finish(
        Method::OPTIONS,
        resource_url(name),
        None,
        Headers::new(),
        call,
    )
}
