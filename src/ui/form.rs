use std::ops::RangeInclusive;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::utils::{normalize_symbol, sanitize_digits};

const MAX_SYMBOL_LEN: usize = 12;
const MAX_DAYS_DIGITS: usize = 4;

/// Input field that currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Symbol,
    Days,
}

/// What a keystroke asks the screen to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    SymbolChanged(String),
    DaysChanged(u32),
    Refresh,
    Quit,
    Ignored,
}

/// Editable text behind the symbol and lookback inputs.
///
/// Days are only reported once the typed value falls inside the configured bounds.
#[derive(Debug, Clone)]
pub struct QuoteForm {
    symbol: String,
    days: String,
    focus: Field,
    bounds: RangeInclusive<u32>,
}

impl QuoteForm {
    pub fn new(symbol: &str, days: u32, bounds: RangeInclusive<u32>) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            days: days.to_string(),
            focus: Field::Symbol,
            bounds,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn days_text(&self) -> &str {
        &self.days
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn bounds(&self) -> &RangeInclusive<u32> {
        &self.bounds
    }

    /// Days value when the text parses within bounds.
    pub fn days(&self) -> Option<u32> {
        self.days
            .parse::<u32>()
            .ok()
            .filter(|days| self.bounds.contains(days))
    }

    /// Inline message shown while the days text cannot be sent.
    pub fn days_hint(&self) -> Option<String> {
        if self.days().is_some() {
            return None;
        }
        Some(format!(
            "Days must be between {} and {}",
            self.bounds.start(),
            self.bounds.end()
        ))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        if key.kind == KeyEventKind::Release {
            return FormEvent::Ignored;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => FormEvent::Quit,
            KeyCode::Char('c') if ctrl => FormEvent::Quit,
            KeyCode::Char('r') if ctrl => FormEvent::Refresh,
            KeyCode::F(5) | KeyCode::Enter => FormEvent::Refresh,
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Field::Symbol => Field::Days,
                    Field::Days => Field::Symbol,
                };
                FormEvent::Ignored
            }
            _ if ctrl => FormEvent::Ignored,
            code => match self.focus {
                Field::Symbol => self.edit_symbol(code),
                Field::Days => self.edit_days(code),
            },
        }
    }

    fn edit_symbol(&mut self, code: KeyCode) -> FormEvent {
        match code {
            KeyCode::Char(ch) if is_symbol_char(ch) && self.symbol.len() < MAX_SYMBOL_LEN => {
                self.symbol.push(ch.to_ascii_uppercase());
            }
            KeyCode::Backspace if !self.symbol.is_empty() => {
                self.symbol.pop();
            }
            _ => return FormEvent::Ignored,
        }
        FormEvent::SymbolChanged(self.symbol.clone())
    }

    fn edit_days(&mut self, code: KeyCode) -> FormEvent {
        match code {
            KeyCode::Char(ch) if ch.is_ascii_digit() && self.days.len() < MAX_DAYS_DIGITS => {
                self.days.push(ch);
                self.days = sanitize_digits(&self.days);
            }
            KeyCode::Backspace if !self.days.is_empty() => {
                self.days.pop();
            }
            KeyCode::Up => self.step_days(1),
            KeyCode::Down => self.step_days(-1),
            _ => return FormEvent::Ignored,
        }

        match self.days() {
            Some(days) => FormEvent::DaysChanged(days),
            None => FormEvent::Ignored,
        }
    }

    fn step_days(&mut self, delta: i64) {
        let (lo, hi) = (*self.bounds.start(), *self.bounds.end());
        let current = self
            .days
            .parse::<u32>()
            .map(i64::from)
            .unwrap_or(i64::from(lo) - delta);
        let next = (current + delta).clamp(i64::from(lo), i64::from(hi));
        self.days = next.to_string();
    }
}

fn is_symbol_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '^')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn form() -> QuoteForm {
        QuoteForm::new("ACB", 365, 30..=1095)
    }

    #[test]
    fn typing_upper_cases_symbol() {
        let mut form = QuoteForm::new("", 365, 30..=1095);
        assert_eq!(
            form.handle_key(key(KeyCode::Char('v'))),
            FormEvent::SymbolChanged("V".into())
        );
        form.handle_key(key(KeyCode::Char('n')));
        assert_eq!(
            form.handle_key(key(KeyCode::Char('m'))),
            FormEvent::SymbolChanged("VNM".into())
        );
        assert_eq!(form.symbol(), "VNM");
    }

    #[test]
    fn backspace_edits_symbol_and_ignores_empty() {
        let mut form = form();
        assert_eq!(
            form.handle_key(key(KeyCode::Backspace)),
            FormEvent::SymbolChanged("AC".into())
        );
        form.handle_key(key(KeyCode::Backspace));
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.handle_key(key(KeyCode::Backspace)), FormEvent::Ignored);
        assert_eq!(form.handle_key(key(KeyCode::Char(' '))), FormEvent::Ignored);
    }

    #[test]
    fn tab_moves_focus_between_fields() {
        let mut form = form();
        assert_eq!(form.focus(), Field::Symbol);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), Field::Days);
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus(), Field::Symbol);
    }

    #[test]
    fn days_only_reported_within_bounds() {
        let mut form = form();
        form.handle_key(key(KeyCode::Tab));

        assert_eq!(
            form.handle_key(key(KeyCode::Backspace)),
            FormEvent::DaysChanged(36)
        );
        // "3" is below the minimum.
        assert_eq!(form.handle_key(key(KeyCode::Backspace)), FormEvent::Ignored);
        assert_eq!(form.days_text(), "3");
        assert!(form.days_hint().unwrap().contains("between 30 and 1095"));

        assert_eq!(
            form.handle_key(key(KeyCode::Char('0'))),
            FormEvent::DaysChanged(30)
        );
        assert!(form.days_hint().is_none());
        assert_eq!(form.handle_key(key(KeyCode::Char('x'))), FormEvent::Ignored);
    }

    #[test]
    fn arrows_step_days_and_clamp() {
        let mut form = QuoteForm::new("ACB", 1095, 30..=1095);
        form.handle_key(key(KeyCode::Tab));

        assert_eq!(form.handle_key(key(KeyCode::Up)), FormEvent::DaysChanged(1095));
        assert_eq!(form.handle_key(key(KeyCode::Down)), FormEvent::DaysChanged(1094));

        let mut form = QuoteForm::new("ACB", 30, 30..=1095);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.handle_key(key(KeyCode::Down)), FormEvent::DaysChanged(30));
    }

    #[test]
    fn arrows_recover_from_empty_days() {
        let mut form = QuoteForm::new("ACB", 30, 30..=1095);
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Backspace));
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.days_text(), "");
        assert_eq!(form.handle_key(key(KeyCode::Up)), FormEvent::DaysChanged(30));
    }

    #[test]
    fn control_keys_map_to_actions() {
        let mut form = form();
        assert_eq!(form.handle_key(ctrl('c')), FormEvent::Quit);
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormEvent::Quit);
        assert_eq!(form.handle_key(ctrl('r')), FormEvent::Refresh);
        assert_eq!(form.handle_key(key(KeyCode::F(5))), FormEvent::Refresh);
        assert_eq!(form.handle_key(ctrl('x')), FormEvent::Ignored);
        assert_eq!(form.symbol(), "ACB");
    }
}
