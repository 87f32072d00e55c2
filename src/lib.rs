//! # Courier
//!
//! Rate-limit-aware delivery of chat messages.
//!
//! - Domain: retry policy, rate-limit signals, message types, configuration
//! - Application: `RateLimitedInvoker` and the `Dispatcher` built on it
//! - Infrastructure: webhook sink (reqwest), logging setup
//! - Interface: CLI

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod strings;

pub use application::invoker::{InvokeError, RateLimitedInvoker, invoke};
pub use domain::policy::{PolicyError, RetryConfig, RetryPolicy};
pub use domain::signal::{RateLimitClassifier, RateLimitSignal};
