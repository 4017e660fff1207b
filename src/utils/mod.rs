pub mod text;
pub mod time;

pub use text::{normalize_symbol, sanitize_digits};
pub use time::current_human_timestamp;
