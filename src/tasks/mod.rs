//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown_ticker;
pub mod keyboard_control;
pub mod terminal_view;

// Re-export main functions
pub use countdown_ticker::countdown_ticker_task;
pub use keyboard_control::keyboard_control_task;
pub use terminal_view::terminal_view_task;
