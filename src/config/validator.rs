use reqwest::Url;

use crate::error::{AppError, Result};

use super::AppConfig;

/// Check every setting and report all problems at once.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    let mut issues = Vec::new();

    validate_api_base(&config.api_base, &mut issues);
    validate_days(config, &mut issues);

    if config.default_symbol.trim().is_empty() {
        issues.push("default_symbol must not be empty".to_string());
    }

    if config.request_timeout_secs == 0 {
        issues.push("request_timeout_secs must be greater than zero".to_string());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::Config(issues.join("; ")))
    }
}

fn validate_api_base(api_base: &str, issues: &mut Vec<String>) {
    if api_base.trim().is_empty() {
        issues.push("api_base must not be empty".to_string());
        return;
    }

    match Url::parse(api_base.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => issues.push(format!(
            "api_base must use http or https (got `{}`)",
            url.scheme()
        )),
        Err(err) => issues.push(format!("api_base `{api_base}` is not a valid URL: {err}")),
    }
}

fn validate_days(config: &AppConfig, issues: &mut Vec<String>) {
    if config.min_days == 0 {
        issues.push("min_days must be at least 1".to_string());
    }

    if config.min_days > config.max_days {
        issues.push(format!(
            "min_days ({}) must not exceed max_days ({})",
            config.min_days, config.max_days
        ));
    } else if !config.accepts_days(config.default_days) {
        issues.push(format!(
            "default_days ({}) must lie within {}..={}",
            config.default_days, config.min_days, config.max_days
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_builtin_config() {
        validate_app_config(&AppConfig::builtin()).expect("builtin config should be valid");
    }

    #[test]
    fn rejects_default_days_outside_bounds() {
        let mut config = AppConfig::builtin();
        config.default_days = 2000;

        let err = validate_app_config(&config).expect_err("validation should fail");
        assert!(
            err.to_string().contains("default_days"),
            "unexpected error message: {err}"
        );
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut config = AppConfig::builtin();
        config.min_days = 500;
        config.max_days = 100;

        let err = validate_app_config(&config).expect_err("validation should fail");
        assert!(err.to_string().contains("must not exceed"), "{err}");
    }

    #[test]
    fn reports_every_issue() {
        let mut config = AppConfig::builtin();
        config.api_base = "ftp://quotes.example.com".to_string();
        config.default_symbol = " ".to_string();
        config.request_timeout_secs = 0;

        let msg = validate_app_config(&config).unwrap_err().to_string();
        assert!(msg.contains("http or https"), "{msg}");
        assert!(msg.contains("default_symbol"), "{msg}");
        assert!(msg.contains("request_timeout_secs"), "{msg}");
    }

    #[test]
    fn rejects_unparseable_base() {
        let mut config = AppConfig::builtin();
        config.api_base = "localhost".to_string();

        let msg = validate_app_config(&config).unwrap_err().to_string();
        assert!(msg.contains("not a valid URL"), "{msg}");
    }
}
