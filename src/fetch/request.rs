use reqwest::Url;

use crate::fetch::{FetchError, FetchResult, QueryParams};

pub const QUOTE_PATH: &str = "api/quote";
pub const HEALTH_PATH: &str = "health";

/// `{api_base}/api/quote?symbol=<SYMBOL>&days=<DAYS>`
pub fn build_quote_url(api_base: &str, params: &QueryParams) -> FetchResult<Url> {
    let mut url = endpoint(api_base, QUOTE_PATH)?;
    url.query_pairs_mut()
        .append_pair("symbol", params.symbol())
        .append_pair("days", &params.lookback_days().to_string());
    Ok(url)
}

pub fn build_health_url(api_base: &str) -> FetchResult<Url> {
    endpoint(api_base, HEALTH_PATH)
}

fn endpoint(api_base: &str, path: &str) -> FetchResult<Url> {
    let base = api_base.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(FetchError::InvalidUrl("API base must not be empty".to_string()));
    }
    let raw = format!("{base}/{path}");
    Url::parse(&raw).map_err(|err| FetchError::InvalidUrl(format!("{raw}: {err}")))
}
