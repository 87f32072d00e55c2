//! # Application Layer
//!
//! Retry orchestration: the rate-limited invoker and the dispatcher that feeds it.

pub mod dispatch;
pub mod invoker;
