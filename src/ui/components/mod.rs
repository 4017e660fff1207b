pub mod sparkline;
pub mod terminal;
pub mod utils;

pub use sparkline::scale_closes;
pub use terminal::TerminalGuard;
