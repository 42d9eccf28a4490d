/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Token holder and login coalescing
//!
//! One [`Auth`] per client keeps the bearer token and makes sure concurrent
//! callers share a single login request:
//! - a cached token is returned without touching the network
//! - the first caller without a token sends the login request
//! - callers arriving while that request is outstanding park on a waiter list
//!   and are all settled with the same outcome when it completes

use crate::application::config::AuthenticationConfig;
use crate::application::transport::HttpTransport;
use crate::error::AppError;
use crate::model::auth::AuthToken;
use crate::model::request::PreparedRequest;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tracing::{debug, error, info};

type Waiter = oneshot::Sender<Result<AuthToken, AppError>>;

#[derive(Default)]
struct AuthState {
    token: Option<String>,
    // `Some` while a login request is outstanding
    waiters: Option<Vec<Waiter>>,
}

/// Authentication state shared by every request of one client
pub struct Auth {
    config: AuthenticationConfig,
    transport: Arc<dyn HttpTransport>,
    state: Mutex<AuthState>,
}

impl Auth {
    /// Creates a token holder that logs in with `config` through `transport`
    pub fn new(config: AuthenticationConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport,
            state: Mutex::new(AuthState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AuthState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current token, if any
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    /// Seeds the token, e.g. one restored from storage
    pub fn set_token(&self, token: impl Into<String>) {
        self.lock().token = Some(token.into());
    }

    /// Drops the token so the next authenticated request logs in again
    pub fn clear_token(&self) {
        self.lock().token = None;
    }

    /// Whether a login request is outstanding
    #[must_use]
    pub fn is_authenticating(&self) -> bool {
        self.lock().waiters.is_some()
    }

    /// Returns the cached token or obtains one from the login endpoint
    ///
    /// At most one login request is outstanding at any time; concurrent callers
    /// receive the outcome of that request. A failed login leaves no token and
    /// no outstanding request behind, so the next call tries again.
    pub async fn authenticate(&self) -> Result<AuthToken, AppError> {
        let parked = {
            let mut state = self.lock();
            if let Some(token) = &state.token {
                return Ok(AuthToken::new(token.clone()));
            }
            match state.waiters.as_mut() {
                Some(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                None => {
                    state.waiters = Some(Vec::new());
                    None
                }
            }
        };

        if let Some(rx) = parked {
            debug!("Login already in flight, waiting for it");
            return rx.await.unwrap_or(Err(AppError::AuthenticationAborted));
        }

        let in_flight = InFlight {
            auth: self,
            settled: false,
        };
        let result = self.login().await;
        in_flight.settle(&result);
        result
    }

    async fn login(&self) -> Result<AuthToken, AppError> {
        let request = PreparedRequest {
            method: self.config.method()?,
            url: self.config.url.clone(),
            body: self.config.body.clone(),
            headers: self.config.header_set(),
            background: false,
        };

        debug!("Sending login request to: {}", request.url);

        let response = match self.transport.send(request).await.and_then(|r| r.extract()) {
            Ok(response) => response,
            Err(e) => {
                error!("Login failed: {}", e);
                return Err(e);
            }
        };

        match response.body.get("token").and_then(Value::as_str) {
            Some(token) => {
                info!("Login successful");
                Ok(AuthToken::new(token))
            }
            None => {
                error!("Login response carried no token");
                Err(AppError::MissingToken)
            }
        }
    }
}

/// Clears the in-flight marker of the login it belongs to
///
/// Settling hands the outcome to every parked caller. Dropping it unsettled
/// (the login future was cancelled) drops their senders instead, which
/// resolves them with [`AppError::AuthenticationAborted`].
struct InFlight<'a> {
    auth: &'a Auth,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, result: &Result<AuthToken, AppError>) {
        self.settled = true;
        let waiters = {
            let mut state = self.auth.lock();
            if let Ok(token) = result {
                state.token = Some(token.token.clone());
            }
            state.waiters.take().unwrap_or_default()
        };

        if !waiters.is_empty() {
            debug!("Settling {} parked authentication callers", waiters.len());
        }
        for waiter in waiters {
            let outcome = match result {
                Ok(token) => Ok(token.clone()),
                Err(e) => Err(e.duplicate()),
            };
            // a parked caller that went away is fine to skip
            let _ = waiter.send(outcome);
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let waiters = self.auth.lock().waiters.take();
        if let Some(waiters) = waiters {
            debug!("Login dropped with {} parked callers", waiters.len());
        }
    }
}
