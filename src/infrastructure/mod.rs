//! # Infrastructure Layer
//!
//! Concrete implementations of the domain traits (HTTP webhooks) and process
//! plumbing (logging).

pub mod logging;
pub mod webhook;
