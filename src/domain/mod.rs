//! # Domain Layer
//!
//! Core definitions, types, and traits for rate-limit-aware delivery.
//! Independent of specific frameworks, serving as the contract for other layers.

pub mod config;
pub mod policy;
pub mod signal;
pub mod traits;
pub mod types;
