use futures::future::BoxFuture;
use thiserror::Error;

pub mod client;
pub mod quote;
pub mod request;

pub use client::HttpQuoteClient;
pub use quote::{LatestPoint, QueryParams, QuoteSeries};
pub use request::{build_health_url, build_quote_url};

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Failure modes of a single quote request.
///
/// Everything except [`FetchError::Cancelled`] is reported to the user the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("request returned HTTP {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("failed to decode quote payload: {0}")]
    Decode(String),
    #[error("quote payload has {dates} dates but {closes} closes")]
    Malformed { dates: usize, closes: usize },
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
    #[error("request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Anything able to resolve a [`QueryParams`] into a [`QuoteSeries`].
///
/// The returned future must own everything it needs so the controller can run it on its own task.
pub trait QuoteTransport: Send + Sync + 'static {
    fn fetch_quote(&self, params: QueryParams) -> BoxFuture<'static, FetchResult<QuoteSeries>>;
}
