use std::io::{self, Write};
use std::sync::Arc;

use log::info;

use crate::app::{QuoteFetchController, RequestState};
use crate::cli::{Cli, Commands};
use crate::config::{load_app_config, AppConfig};
use crate::error::{AppError, Result};
use crate::fetch::{HttpQuoteClient, QuoteSeries};
use crate::ui::run_quote_view;

/// Entry point used by `main`: resolve configuration, then dispatch the subcommand.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = load_app_config(&cli.config_root())?;
    cli.apply_overrides(&mut config)?;
    info!(
        "Using backend {} (default {} / {}d)",
        config.api_base, config.default_symbol, config.default_days
    );

    match cli.command.unwrap_or_default() {
        Commands::Watch => run_watch(&config).await,
        Commands::Fetch { json } => run_fetch(&config, json).await,
        Commands::Health => run_health(&config).await,
    }
}

fn build_controller(config: &AppConfig) -> Result<QuoteFetchController> {
    let client = HttpQuoteClient::from_config(config)?;
    Ok(QuoteFetchController::from_config(Arc::new(client), config))
}

pub async fn run_watch(config: &AppConfig) -> Result<()> {
    let mut controller = build_controller(config)?;
    run_quote_view(&mut controller, config).await
}

/// Fetch once for the configured parameters and print the same summary the interactive view shows.
pub async fn run_fetch(config: &AppConfig, json: bool) -> Result<()> {
    let mut controller = build_controller(config)?;
    if controller.start().is_none() {
        return Err(AppError::message("A non-empty symbol is required."));
    }
    controller.next_completion().await;

    let mut out = io::stdout().lock();
    match controller.state() {
        RequestState::Loaded(series) if json => {
            serde_json::to_writer_pretty(&mut out, series)?;
            writeln!(out)?;
        }
        RequestState::Loaded(series) => write_summary(&mut out, series)?,
        RequestState::Failed(message) => {
            return Err(AppError::message(format!(
                "Failed to load {} ({}d): {message}",
                controller.symbol(),
                controller.lookback_days()
            )))
        }
        RequestState::Idle | RequestState::Loading => return Err(AppError::Cancelled),
    }
    Ok(())
}

pub async fn run_health(config: &AppConfig) -> Result<()> {
    let client = HttpQuoteClient::from_config(config)?;
    let status = client.health().await?;
    println!("{}: {status}", client.api_base());
    Ok(())
}

fn write_summary(out: &mut impl Write, series: &QuoteSeries) -> Result<()> {
    writeln!(out, "{}", series.symbol())?;
    writeln!(out, "Points: {}", series.len())?;
    match series.latest() {
        Some(latest) => {
            writeln!(out, "Latest")?;
            writeln!(out, "  Date: {}", latest.date)?;
            writeln!(out, "  Close: {}", latest.close)?;
        }
        None => writeln!(out, "No data points returned")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_matches_view_layout() {
        let series = QuoteSeries::new(
            "ACB",
            vec!["2024-01-01".into(), "2024-01-02".into()],
            vec![10.0, 10.5],
        )
        .unwrap();

        let mut buf = Vec::new();
        write_summary(&mut buf, &series).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ACB\nPoints: 2\nLatest\n  Date: 2024-01-02\n  Close: 10.5\n"
        );
    }

    #[tokio::test]
    async fn fetch_reports_failure_for_unreachable_backend() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = AppConfig::builtin();
        config.api_base = format!("http://{addr}");
        config.request_timeout_secs = 2;

        let err = run_fetch(&config, false).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ACB (365d)"), "{msg}");
        assert!(msg.contains("request error"), "{msg}");
    }
}
