use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::normalize_symbol;

use super::{FetchError, FetchResult};

/// Snapshot of the inputs a request was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParams {
    symbol: String,
    lookback_days: u32,
}

impl QueryParams {
    /// Returns `None` when the symbol is blank once normalized.
    pub fn new(symbol: &str, lookback_days: u32) -> Option<Self> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return None;
        }
        Some(Self {
            symbol,
            lookback_days,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}d)", self.symbol, self.lookback_days)
    }
}

/// Daily closes for one symbol, index-aligned with their trading dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSeries {
    symbol: String,
    dates: Vec<String>,
    closes: Vec<f64>,
}

/// Most recent point of a [`QuoteSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestPoint<'a> {
    pub date: &'a str,
    pub close: f64,
}

impl QuoteSeries {
    pub fn new(
        symbol: impl Into<String>,
        dates: Vec<String>,
        closes: Vec<f64>,
    ) -> FetchResult<Self> {
        Self {
            symbol: symbol.into(),
            dates,
            closes,
        }
        .validated()
    }

    /// Decode a backend payload and reject it unless `dates` and `closes` line up.
    pub fn from_json(body: &str) -> FetchResult<Self> {
        let series: QuoteSeries =
            serde_json::from_str(body).map_err(|err| FetchError::Decode(err.to_string()))?;
        series.validated()
    }

    fn validated(self) -> FetchResult<Self> {
        if self.dates.len() != self.closes.len() {
            return Err(FetchError::Malformed {
                dates: self.dates.len(),
                closes: self.closes.len(),
            });
        }
        Ok(self)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn latest(&self) -> Option<LatestPoint<'_>> {
        let date = self.dates.last()?;
        let close = *self.closes.last()?;
        Some(LatestPoint { date, close })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_normalize_symbol_case() {
        let params = QueryParams::new(" acb ", 365).expect("params");
        assert_eq!(params.symbol(), "ACB");
        assert_eq!(params.lookback_days(), 365);
        assert_eq!(params, QueryParams::new("ACB", 365).unwrap());
    }

    #[test]
    fn blank_symbol_has_no_params() {
        assert!(QueryParams::new("   ", 365).is_none());
        assert!(QueryParams::new("", 30).is_none());
    }

    #[test]
    fn decodes_payload_and_reads_latest_point() {
        let body = r#"{"symbol":"ACB","dates":["2024-01-01","2024-01-02"],"closes":[10.0,10.5]}"#;
        let series = QuoteSeries::from_json(body).unwrap();

        assert_eq!(series.symbol(), "ACB");
        assert_eq!(series.len(), 2);
        assert_eq!(series.dates(), ["2024-01-01", "2024-01-02"]);
        assert_eq!(series.closes(), [10.0, 10.5]);
        let latest = series.latest().unwrap();
        assert_eq!(latest.date, "2024-01-02");
        assert!((latest.close - 10.5).abs() < 1e-9);
    }

    #[test]
    fn rejects_misaligned_payload() {
        let body = r#"{"symbol":"ACB","dates":["2024-01-01","2024-01-02"],"closes":[10.0]}"#;
        let err = QuoteSeries::from_json(body).unwrap_err();
        assert_eq!(
            err,
            FetchError::Malformed {
                dates: 2,
                closes: 1
            }
        );
    }

    #[test]
    fn rejects_payload_missing_fields() {
        let err = QuoteSeries::from_json(r#"{"symbol":"ACB"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "unexpected: {err:?}");
    }

    #[test]
    fn empty_series_has_no_latest_point() {
        let series = QuoteSeries::new("VNM", Vec::new(), Vec::new()).unwrap();
        assert!(series.is_empty());
        assert!(series.latest().is_none());
    }
}
