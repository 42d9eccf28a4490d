/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Client facade for PostgREST-style APIs
//!
//! This module provides the client every other helper hangs off:
//! - Plain requests against the configured API prefix
//! - Token-authenticated requests with login coalescing
//! - Resource models with CRUD and pagination helpers
//! - Loaders exposing a busy flag for UI code
//!
//! # Example
//! ```ignore
//! use postgrest_client::prelude::*;
//!
//! let config = Config::with_api_prefix("https://api.example.com")
//!     .authentication(AuthenticationConfig::post("https://api.example.com/rpc/login")
//!         .with_body(json!({"email": "me@example.com", "pass": "secret"})));
//! let client = PostgrestClient::new(config)?;
//!
//! let users = client.model("users");
//! let page = users.get_page_with_token(None, 1, &CallOptions::new(), &Headers::new()).await?;
//! ```

use crate::application::auth::Auth;
use crate::application::config::{AuthFallback, Config};
use crate::application::loader::{Loader, RequestFn, ResponseFuture};
use crate::application::model::Model;
use crate::application::transport::{HttpTransport, ReqwestTransport};
use crate::constants::AUTHORIZATION_HEADER;
use crate::error::AppError;
use crate::model::auth::AuthToken;
use crate::model::headers::Headers;
use crate::model::request::RequestOptions;
use crate::model::response::ApiResponse;
use std::sync::Arc;
use tracing::warn;

/// Client for a PostgREST-style API
///
/// Cloning is cheap; clones share the token, the transport and the
/// configuration.
#[derive(Clone)]
pub struct PostgrestClient {
    inner: Arc<Inner>,
}

struct Inner {
    config: Config,
    global_headers: Headers,
    transport: Arc<dyn HttpTransport>,
    auth: Auth,
}

impl PostgrestClient {
    /// Creates a client sending through `reqwest`
    ///
    /// # Returns
    /// * `Ok(PostgrestClient)` - Client ready to use; no request is sent yet
    /// * `Err(AppError)` - If the HTTP client cannot be built
    pub fn new(config: Config) -> Result<Self, AppError> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client sending through a custom transport
    pub fn with_transport(config: Config, transport: Arc<dyn HttpTransport>) -> Self {
        let auth = Auth::new(config.authentication.clone(), transport.clone());
        let global_headers = config.global_header_set();
        Self {
            inner: Arc::new(Inner {
                config,
                global_headers,
                transport,
                auth,
            }),
        }
    }

    /// Configuration this client was built with
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Token holder of this client
    #[must_use]
    pub fn auth(&self) -> &Auth {
        &self.inner.auth
    }

    /// Current token, if any
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.auth.token()
    }

    /// Seeds the token
    pub fn set_token(&self, token: impl Into<String>) {
        self.inner.auth.set_token(token);
    }

    /// Returns the cached token or logs in; see [`Auth::authenticate`]
    pub async fn authenticate(&self) -> Result<AuthToken, AppError> {
        self.inner.auth.authenticate().await
    }

    /// Sends a request against the API prefix
    ///
    /// Global headers sit underneath the descriptor's headers. Non-success
    /// responses come back as [`AppError::Api`] carrying the PostgREST error
    /// body, synthesized when the server did not send JSON.
    pub async fn request(&self, options: RequestOptions) -> Result<ApiResponse, AppError> {
        let prepared = options.prepare(
            &self.inner.config.rest_api.api_prefix,
            &self.inner.global_headers,
        );
        self.inner.transport.send(prepared).await?.extract()
    }

    /// Sends a request with `Authorization: Bearer <token>`
    ///
    /// Logs in first when no token is cached. When login fails the request is
    /// sent without the header (the server then answers as for an anonymous
    /// caller), unless the client is configured with [`AuthFallback::Fail`].
    pub async fn request_with_token(
        &self,
        options: RequestOptions,
    ) -> Result<ApiResponse, AppError> {
        match self.authenticate().await {
            Ok(token) => {
                let auth_header = Headers::new().with(AUTHORIZATION_HEADER, token.bearer());
                self.request(options.layered_over(&auth_header)).await
            }
            Err(e) => match self.inner.config.auth_fallback {
                AuthFallback::Anonymous => {
                    warn!("Authentication failed, sending request without token: {}", e);
                    self.request(options).await
                }
                AuthFallback::Fail => Err(e),
            },
        }
    }

    /// Resource model for `/<name>`
    #[must_use]
    pub fn model(&self, name: &str) -> Model {
        Model::new(self.clone(), name, self.inner.config.page_size)
    }

    /// Loader over plain requests
    #[must_use]
    pub fn loader(&self, options: RequestOptions) -> Loader {
        Loader::new(self.request_fn(false), options, false)
    }

    /// Loader over token-authenticated requests
    #[must_use]
    pub fn loader_with_token(&self, options: RequestOptions) -> Loader {
        Loader::new(self.request_fn(true), options, false)
    }

    /// The request function a loader calls
    #[must_use]
    pub fn request_fn(&self, with_token: bool) -> RequestFn {
        let client = self.clone();
        Arc::new(move |options: RequestOptions| -> ResponseFuture {
            let client = client.clone();
            Box::pin(async move {
                if with_token {
                    client.request_with_token(options).await
                } else {
                    client.request(options).await
                }
            })
        })
    }
}

impl std::fmt::Debug for PostgrestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestClient")
            .field("api_prefix", &self.inner.config.rest_api.api_prefix)
            .field("authenticated", &self.inner.auth.token().is_some())
            .finish()
    }
}
