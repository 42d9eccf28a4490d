/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Busy-flag wrapper around a request function
//!
//! A [`Loader`] is what UI code binds a spinner to. `load()` flips the busy
//! flag on before returning, runs the request in the background and flips the
//! flag off again once no load of the same loader is still running. Every
//! transition calls the redraw hook, and observers can follow the flag through
//! a `watch` channel.

use crate::error::AppError;
use crate::model::request::RequestOptions;
use crate::model::response::ApiResponse;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use tokio::sync::{oneshot, watch};
use tracing::debug;

/// Future returned by a request function
pub type ResponseFuture = Pin<Box<dyn Future<Output = Result<ApiResponse, AppError>> + Send>>;

/// Request function wrapped by a loader
pub type RequestFn = Arc<dyn Fn(RequestOptions) -> ResponseFuture + Send + Sync>;

/// Hook run on every busy transition
pub type RedrawFn = Arc<dyn Fn() + Send + Sync>;

struct LoaderState {
    busy: watch::Sender<bool>,
    running: Mutex<usize>,
}

impl LoaderState {
    fn begin(&self) {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        *running += 1;
        self.busy.send_replace(true);
    }

    fn finish(&self) {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        *running = running.saturating_sub(1);
        if *running == 0 {
            self.busy.send_replace(false);
        }
    }
}

/// Request wrapper exposing a busy flag
///
/// Clones share the busy flag.
#[derive(Clone)]
pub struct Loader {
    request_fn: RequestFn,
    options: RequestOptions,
    state: Arc<LoaderState>,
    redraw: Option<RedrawFn>,
}

impl Loader {
    /// Wraps `request_fn`, called with `options` on every load
    ///
    /// `default_busy` is the flag's value until the first load settles.
    pub fn new(request_fn: RequestFn, options: RequestOptions, default_busy: bool) -> Self {
        let (busy, _) = watch::channel(default_busy);
        Self {
            request_fn,
            options,
            state: Arc::new(LoaderState {
                busy,
                running: Mutex::new(0),
            }),
            redraw: None,
        }
    }

    /// Sets the hook called whenever the busy flag changes
    #[must_use]
    pub fn with_redraw(mut self, redraw: impl Fn() + Send + Sync + 'static) -> Self {
        self.redraw = Some(Arc::new(redraw));
        self
    }

    /// Current value of the busy flag
    #[must_use]
    pub fn is_busy(&self) -> bool {
        *self.state.busy.borrow()
    }

    /// Receiver following the busy flag
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.busy.subscribe()
    }

    /// Options passed to the request function, before `background` is set
    #[must_use]
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    fn redraw(&self) {
        if let Some(redraw) = &self.redraw {
            redraw();
        }
    }

    /// Starts a load
    ///
    /// The busy flag is set before this returns. The request runs on a spawned
    /// task with `background` set, so this must be called from within a Tokio
    /// runtime. Each call returns its own [`Pending`], resolved with that
    /// call's outcome.
    pub fn load(&self) -> Pending {
        self.state.begin();
        self.redraw();

        let request = (self.request_fn)(self.options.clone().in_background());
        let state = self.state.clone();
        let redraw = self.redraw.clone();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let result = request.await;
            state.finish();
            if let Some(redraw) = redraw {
                redraw();
            }
            if tx.send(result).is_err() {
                debug!("Loader result dropped, nobody was waiting");
            }
        });

        Pending { rx }
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("options", &self.options)
            .field("busy", &self.is_busy())
            .finish()
    }
}

/// Outcome of one [`Loader::load`] call
#[derive(Debug)]
pub struct Pending {
    rx: oneshot::Receiver<Result<ApiResponse, AppError>>,
}

impl Future for Pending {
    type Output = Result<ApiResponse, AppError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(AppError::LoaderDropped)))
    }
}
