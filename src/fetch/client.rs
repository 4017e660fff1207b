use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use log::debug;
use reqwest::{
    header::{ACCEPT, USER_AGENT},
    Client,
};
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{Context, Result};
use crate::fetch::{
    build_health_url, build_quote_url, FetchError, FetchResult, QueryParams, QuoteSeries,
    QuoteTransport,
};

const CLIENT_USER_AGENT: &str = concat!("vnstock-cli/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed client for the quote backend.
#[derive(Clone)]
pub struct HttpQuoteClient {
    client: Client,
    api_base: String,
}

impl HttpQuoteClient {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to construct quote HTTP client")?;
        Ok(Self {
            client,
            api_base: api_base.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.api_base.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub async fn get_quote(&self, params: &QueryParams) -> FetchResult<QuoteSeries> {
        let url = build_quote_url(&self.api_base, params)?;
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        QuoteSeries::from_json(&body)
    }

    /// Ask the backend for its `/health` status string.
    pub async fn health(&self) -> FetchResult<String> {
        let url = build_health_url(&self.api_base)?;
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let root: Value = response.json().await?;
        root.get("status")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| FetchError::Decode("health payload missing `status`".to_string()))
    }
}

impl QuoteTransport for HttpQuoteClient {
    fn fetch_quote(&self, params: QueryParams) -> BoxFuture<'static, FetchResult<QuoteSeries>> {
        let this = self.clone();
        async move { this.get_quote(&params).await }.boxed()
    }
}
