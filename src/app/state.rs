use std::fmt;

use crate::fetch::QuoteSeries;

/// Message shown for every non-cancellation failure.
pub const REQUEST_ERROR_MESSAGE: &str = "request error";

/// Identity of one request attempt. Only the latest token may write state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Remote-data state owned by the fetch controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    Loading,
    Loaded(QuoteSeries),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn series(&self) -> Option<&QuoteSeries> {
        match self {
            RequestState::Loaded(series) => Some(series),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_variant() {
        let series = QuoteSeries::new("ACB", vec!["2024-01-01".into()], vec![10.0]).unwrap();

        assert_eq!(RequestState::default(), RequestState::Idle);
        assert!(RequestState::Loading.is_loading());
        assert_eq!(RequestState::Loaded(series.clone()).series(), Some(&series));
        assert_eq!(
            RequestState::Failed(REQUEST_ERROR_MESSAGE.into()).error(),
            Some("request error")
        );
        assert!(RequestState::Loading.series().is_none());
        assert!(RequestState::Loaded(series).error().is_none());
    }
}
