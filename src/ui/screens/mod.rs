pub mod quote_view;

pub use quote_view::run_quote_view;
