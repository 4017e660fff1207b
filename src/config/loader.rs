use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;
use serde::Deserialize;

use crate::error::{AppError, Context, Result};

use super::{validator, AppConfig};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawAppConfig {
    api_base: Option<String>,
    default_symbol: Option<String>,
    default_days: Option<u32>,
    min_days: Option<u32>,
    max_days: Option<u32>,
    request_timeout_secs: Option<u64>,
}

impl RawAppConfig {
    fn into_app_config(self) -> Result<AppConfig> {
        let builtin = AppConfig::builtin();
        let api_base = match self.api_base {
            Some(raw) => expand_env_vars(&raw)?,
            None => builtin.api_base,
        };

        Ok(AppConfig {
            api_base,
            default_symbol: self.default_symbol.unwrap_or(builtin.default_symbol),
            default_days: self.default_days.unwrap_or(builtin.default_days),
            min_days: self.min_days.unwrap_or(builtin.min_days),
            max_days: self.max_days.unwrap_or(builtin.max_days),
            request_timeout_secs: self
                .request_timeout_secs
                .unwrap_or(builtin.request_timeout_secs),
        })
    }
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join("assets").join("config.json")
}

/// Load `assets/config.json` under `root`, falling back to the builtin settings when the file is absent.
pub fn load_app_config(root: &Path) -> Result<AppConfig> {
    let path = config_path(root);
    if !path.exists() {
        info!("No config at {}, using builtin settings", path.display());
        let config = AppConfig::builtin();
        validator::validate_app_config(&config)?;
        return Ok(config);
    }
    load_app_config_from(&path)
}

pub fn load_app_config_from(path: &Path) -> Result<AppConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config JSON at {}", path.display()))?;
    let config = parse_app_config(&json)
        .with_context(|| format!("failed to load config JSON at {}", path.display()))?;
    info!("Loaded config from {} (api base {})", path.display(), config.api_base);
    Ok(config)
}

fn parse_app_config(json: &str) -> Result<AppConfig> {
    let raw: RawAppConfig = serde_json::from_str(json)?;
    let config = raw.into_app_config()?;
    validator::validate_app_config(&config)?;
    Ok(config)
}

/// Expand `${NAME}` and `${NAME:-fallback}` placeholders from the process environment.
pub fn expand_env_vars(value: &str) -> Result<String> {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut inner = String::new();
            let mut closed = false;
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == '}' {
                    closed = true;
                    break;
                }
                inner.push(next);
            }

            if !closed {
                return Err(AppError::Config(format!(
                    "Unterminated environment placeholder in `{value}`"
                )));
            }

            let (name, fallback) = match inner.split_once(":-") {
                Some((name, fallback)) => (name, Some(fallback)),
                None => (inner.as_str(), None),
            };

            if name.is_empty() {
                return Err(AppError::Config(format!(
                    "Encountered empty environment placeholder in `{value}`"
                )));
            }

            let resolved = match std::env::var(name) {
                Ok(found) if !found.is_empty() || fallback.is_none() => found,
                _ => match fallback {
                    Some(fallback) => fallback.to_string(),
                    None => {
                        return Err(AppError::Config(format!(
                            "Environment variable {name} required by config is not set"
                        )))
                    }
                },
            };
            result.push_str(&resolved);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}
