//! External side effects module
//!
//! This module contains the completion alert fired when a countdown reaches zero.

pub mod alert;

// Re-export main types
pub use alert::*;
