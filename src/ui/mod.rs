pub mod components;
pub mod form;
pub mod screens;
pub mod styles;

pub use components::TerminalGuard;
pub use form::{Field, FormEvent, QuoteForm};
pub use screens::run_quote_view;
