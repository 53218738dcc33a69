//! State management module
//!
//! This module contains the countdown engine, its display derivation and the
//! application state that owns the open countdown view.

pub mod app_state;
pub mod countdown_config;
pub mod countdown_state;
pub mod display;
pub mod view;

// Re-export main types
pub use app_state::{AppState, Applied, ControlError, ViewSnapshot};
pub use countdown_config::{ConfigError, ConfigForm, CountdownConfig, TimeSpec};
pub use countdown_state::CountdownState;
pub use display::{Digits, DisplayFrame};
pub use view::{CountdownView, FrameSender, SharedView, ViewState};
