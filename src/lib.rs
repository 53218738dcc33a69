//! Simple Countdown - A state-managed countdown display
//!
//! This library provides a drift-free countdown engine with pause/resume,
//! its digit and unit-visibility derivation, and the HTTP and terminal
//! surfaces that configure, control and render a single countdown view.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
