//! # Interface Layer
//!
//! Entry points exposed to operators.

pub mod cli;
