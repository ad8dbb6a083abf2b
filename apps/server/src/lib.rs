pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod shutdown;
mod main_lib;

pub use main_lib::{build_state, build_state_with_provider, init_tracing, AppState};
