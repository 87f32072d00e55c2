//! # Strings Module
//!
//! Centralizes user-facing strings and log lines.

pub mod logs;
pub mod messages;
