//! Dispatcher abstraction and the single current-result slot.
//!
//! `Dispatcher` lets the request form run against a real HTTP client or a
//! mock. `RequestSession` holds the outcome of the most recent send.

use super::executor::execute_request;
use super::types::{RequestParams, ResponseData};
use crate::error::AppError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

/// Future returned by [`Dispatcher::send`].
pub type DispatchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseData, AppError>> + Send + 'a>>;

/// Trait for services that execute a composed request.
pub trait Dispatcher: Send + Sync {
    /// Sends one request and returns its decoded outcome.
    ///
    /// Fails only on transport-level problems; any HTTP status is a result.
    fn send(&self, params: RequestParams) -> DispatchFuture<'_>;
}

/// Dispatcher backed by `reqwest`.
#[derive(Clone, Default)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    base: Option<Url>,
}

impl HttpDispatcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client, base: None }
    }

    /// Resolves relative request URLs against `base`.
    pub fn with_base(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Dispatcher for HttpDispatcher {
    fn send(&self, params: RequestParams) -> DispatchFuture<'_> {
        Box::pin(async move { execute_request(&self.client, self.base.as_ref(), &params).await })
    }
}

impl<T: Dispatcher + ?Sized> Dispatcher for Arc<T> {
    fn send(&self, params: RequestParams) -> DispatchFuture<'_> {
        (**self).send(params)
    }
}

/// State of the current-result slot.
#[derive(Debug, Clone, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Success(ResponseData),
    Failed(String),
}

/// Holds at most one outcome: that of the most recent send.
///
/// Mirrors the form's own guard in `frontend/index.html` for callers driving
/// a [`Dispatcher`] directly; the HTTP routes do not use it.
pub struct RequestSession<D> {
    dispatcher: D,
    state: RwLock<RequestState>,
}

impl<D: Dispatcher> RequestSession<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher,
            state: RwLock::new(RequestState::Idle),
        }
    }

    pub async fn state(&self) -> RequestState {
        self.state.read().await.clone()
    }

    pub async fn is_pending(&self) -> bool {
        matches!(*self.state.read().await, RequestState::Pending)
    }

    /// Sends `params` and stores the outcome, replacing any previous one.
    ///
    /// Returns `false` without sending when the URL is blank or a send is
    /// already in flight.
    pub async fn submit(&self, params: RequestParams) -> bool {
        if params.url.trim().is_empty() {
            return false;
        }

        {
            let mut state = self.state.write().await;
            if matches!(*state, RequestState::Pending) {
                return false;
            }
            *state = RequestState::Pending;
        }

        let outcome = match self.dispatcher.send(params).await {
            Ok(data) => RequestState::Success(data),
            Err(e) => {
                tracing::warn!(code = e.code(), message = %e, "Request failed");
                RequestState::Failed(e.to_string())
            }
        };

        *self.state.write().await = outcome;
        true
    }
}
