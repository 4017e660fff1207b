use std::ops::RangeInclusive;

pub mod loader;
pub mod validator;

pub use loader::{expand_env_vars, load_app_config, load_app_config_from};

/// Runtime settings for talking to the quote backend and bounding user input.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub default_symbol: String,
    pub default_days: u32,
    pub min_days: u32,
    pub max_days: u32,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn builtin() -> Self {
        Self {
            api_base: "http://127.0.0.1:8000".to_string(),
            default_symbol: "ACB".to_string(),
            default_days: 365,
            min_days: 30,
            max_days: 1095,
            request_timeout_secs: 15,
        }
    }

    pub fn days_range(&self) -> RangeInclusive<u32> {
        self.min_days..=self.max_days
    }

    pub fn accepts_days(&self, days: u32) -> bool {
        self.days_range().contains(&days)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
