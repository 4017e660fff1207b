pub mod bootstrap;
pub mod controller;
pub mod state;

pub use bootstrap::{run, run_fetch, run_health, run_watch};
pub use controller::{Completion, QuoteFetchController};
pub use state::{RequestState, RequestToken, REQUEST_ERROR_MESSAGE};
