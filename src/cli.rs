use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{validator::validate_app_config, AppConfig};
use crate::error::{AppError, Result};
use crate::utils::normalize_symbol;

#[derive(Debug, Parser)]
#[command(name = "vnstock-cli", version)]
#[command(about = "Browse daily closing prices served by a vnstock quote backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory containing assets/config.json
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Override the backend base URL, e.g. http://127.0.0.1:8000
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Initial ticker symbol
    #[arg(short, long, global = true)]
    pub symbol: Option<String>,

    /// Initial lookback window in days
    #[arg(short, long, global = true)]
    pub days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Subcommand)]
pub enum Commands {
    /// Interactive view that refetches whenever the symbol or days change
    #[default]
    Watch,

    /// Fetch once and print the latest close
    Fetch {
        /// Print the full series as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the backend /health endpoint
    Health,
}

impl Cli {
    pub fn config_root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Layer command-line values over the loaded configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) -> Result<()> {
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.trim().to_string();
        }

        if let Some(symbol) = &self.symbol {
            let symbol = normalize_symbol(symbol);
            if symbol.is_empty() {
                return Err(AppError::message("--symbol must not be empty"));
            }
            config.default_symbol = symbol;
        }

        if let Some(days) = self.days {
            if !config.accepts_days(days) {
                return Err(AppError::message(format!(
                    "--days must be between {} and {} (got {days})",
                    config.min_days, config.max_days
                )));
            }
            config.default_days = days;
        }

        validate_app_config(config)
    }
}
