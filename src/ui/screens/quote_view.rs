use std::time::Duration;

use crossterm::event::{self, Event};
use ratatui::{prelude::*, widgets::*};

use crate::app::{QuoteFetchController, RequestState};
use crate::config::AppConfig;
use crate::error::Result;
use crate::ui::components::utils::{split_horizontal, split_vertical};
use crate::ui::components::{scale_closes, TerminalGuard};
use crate::ui::form::{Field, FormEvent, QuoteForm};
use crate::ui::styles::{error_style, focused_style, hint_style, title_style, ACCENT};
use crate::utils::current_human_timestamp;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Interactive symbol/lookback form that refetches on every accepted edit.
pub async fn run_quote_view(
    controller: &mut QuoteFetchController,
    config: &AppConfig,
) -> Result<()> {
    let mut form = QuoteForm::new(
        controller.symbol(),
        controller.lookback_days(),
        config.days_range(),
    );
    let mut guard = TerminalGuard::new()?;
    let mut updated_at: Option<String> = None;

    controller.start();

    loop {
        if controller.pump() > 0 && controller.state().series().is_some() {
            updated_at = Some(current_human_timestamp());
        }

        guard.draw(|f| {
            draw(
                f,
                &form,
                controller.state(),
                &config.api_base,
                updated_at.as_deref(),
            )
        })?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                match form.handle_key(key) {
                    FormEvent::SymbolChanged(symbol) => {
                        controller.set_symbol(&symbol);
                    }
                    FormEvent::DaysChanged(days) => {
                        controller.set_lookback_days(days);
                    }
                    FormEvent::Refresh => {
                        controller.refresh();
                    }
                    FormEvent::Quit => break,
                    FormEvent::Ignored => {}
                }
            }
        }

        // Let request tasks make progress between frames.
        tokio::task::yield_now().await;
    }

    guard.restore()?;
    Ok(())
}

fn draw(
    f: &mut Frame,
    form: &QuoteForm,
    state: &RequestState,
    api_base: &str,
    updated_at: Option<&str>,
) {
    let chunks = split_vertical(
        f.size(),
        &[
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ],
    );

    let header = Paragraph::new(vec![
        Line::from(Span::styled("VNStock Analysis", title_style())),
        Line::from(Span::styled(format!("Backend: {api_base}"), hint_style())),
    ]);
    f.render_widget(header, chunks[0]);

    draw_inputs(f, form, chunks[1]);
    draw_result(f, state, updated_at, chunks[2]);

    let help = match form.days_hint() {
        Some(hint) => Line::from(Span::styled(hint, error_style())),
        None => Line::from(Span::styled(
            "Tab switch field • ↑/↓ adjust days • Enter/F5/Ctrl+R refresh • Esc quit",
            hint_style(),
        )),
    };
    f.render_widget(Paragraph::new(help), chunks[3]);
}

fn draw_inputs(f: &mut Frame, form: &QuoteForm, area: Rect) {
    let columns = split_horizontal(
        area,
        &[Constraint::Percentage(50), Constraint::Percentage(50)],
    );

    let field_block = |title: String, field: Field| {
        let block = Block::default().borders(Borders::ALL).title(title);
        if form.focus() == field {
            block.border_style(focused_style())
        } else {
            block
        }
    };

    let symbol = Paragraph::new(form.symbol().to_string())
        .block(field_block("Symbol".to_string(), Field::Symbol));
    f.render_widget(symbol, columns[0]);

    let days_title = format!(
        "Days ({}-{})",
        form.bounds().start(),
        form.bounds().end()
    );
    let mut days = Paragraph::new(form.days_text().to_string())
        .block(field_block(days_title, Field::Days));
    if form.days_hint().is_some() {
        days = days.style(error_style());
    }
    f.render_widget(days, columns[1]);
}

fn draw_result(f: &mut Frame, state: &RequestState, updated_at: Option<&str>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Result");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = result_lines(state, updated_at);
    let text_height = lines.len() as u16;
    let rows = split_vertical(inner, &[Constraint::Length(text_height), Constraint::Min(0)]);
    f.render_widget(Paragraph::new(lines), rows[0]);

    if let Some(series) = state.series() {
        let spark_area = rows[1];
        if spark_area.height > 0 && !series.is_empty() {
            let data = scale_closes(
                series.closes(),
                spark_area.width as usize,
                u64::from(spark_area.height) * 8,
            );
            let sparkline = Sparkline::default()
                .data(&data)
                .style(Style::default().fg(ACCENT));
            f.render_widget(sparkline, spark_area);
        }
    }
}

/// Text rows of the result panel for the given state.
pub fn result_lines(state: &RequestState, updated_at: Option<&str>) -> Vec<Line<'static>> {
    match state {
        RequestState::Idle => vec![Line::from(Span::styled("Waiting for input", hint_style()))],
        RequestState::Loading => vec![Line::from("Loading…")],
        RequestState::Failed(message) => {
            vec![Line::from(Span::styled(message.clone(), error_style()))]
        }
        RequestState::Loaded(series) => {
            let mut lines = vec![
                Line::from(Span::styled(series.symbol().to_string(), title_style())),
                Line::from(format!("Points: {}", series.len())),
            ];
            match series.latest() {
                Some(latest) => {
                    lines.push(Line::from(Span::styled(
                        "Latest",
                        Style::default().add_modifier(Modifier::BOLD),
                    )));
                    lines.push(Line::from(format!("Date: {}", latest.date)));
                    lines.push(Line::from(format!("Close: {}", latest.close)));
                }
                None => lines.push(Line::from(Span::styled(
                    "No data points returned",
                    hint_style(),
                ))),
            }
            if let Some(at) = updated_at {
                lines.push(Line::from(Span::styled(format!("Updated {at}"), hint_style())));
            }
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::QuoteSeries;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn loaded_state_shows_count_and_latest_point() {
        let series = QuoteSeries::new(
            "ACB",
            vec!["2024-01-01".into(), "2024-01-02".into()],
            vec![10.0, 10.5],
        )
        .unwrap();

        let text = plain(&result_lines(&RequestState::Loaded(series), None));
        assert_eq!(
            text,
            vec!["ACB", "Points: 2", "Latest", "Date: 2024-01-02", "Close: 10.5"]
        );
    }

    #[test]
    fn failed_state_shows_message_only() {
        let text = plain(&result_lines(
            &RequestState::Failed("request error".into()),
            Some("2024-01-02 10:00:00"),
        ));
        assert_eq!(text, vec!["request error"]);
    }

    #[test]
    fn empty_series_and_loading_render_placeholders() {
        let empty = QuoteSeries::new("VNM", Vec::new(), Vec::new()).unwrap();
        let text = plain(&result_lines(&RequestState::Loaded(empty), Some("now")));
        assert_eq!(text, vec!["VNM", "Points: 0", "No data points returned", "Updated now"]);

        assert_eq!(plain(&result_lines(&RequestState::Loading, None)), vec!["Loading…"]);
    }
}
