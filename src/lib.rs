// src/lib.rs

//! # Window Limiter
//!
//! An in-process sliding-window rate limiter. Each identifier (usually a
//! client address) may make `limit` requests per window; the number of
//! identifiers tracked at once is bounded, and the least recently used one
//! is evicted when a new identifier arrives at capacity.
//!
//! ## Quick Example
//!
//! ```rust
//! use window_limiter::{Decision, WindowLimiter, WindowLimiterConfig};
//!
//! let config = WindowLimiterConfig::from_millis(3_600_000).max_tracked_identifiers(500);
//! let limiter = WindowLimiter::new(config).unwrap();
//!
//! match limiter.check("203.0.113.7", 10) {
//!     Decision::Admitted => println!("Request allowed"),
//!     Decision::Rejected => println!("Rate limited"),
//! }
//! ```
//!
//! State lives only in process memory: it is lost on restart and is not
//! shared between processes.

// private modules
mod clock;
mod config;
mod errors;
mod lru_store;
mod window;
mod window_limiter;

// HTTP integration
#[cfg(feature = "axum")]
pub mod http;

// public API exports
pub use clock::{Clock, ClockError, SystemClock};
pub use config::{DEFAULT_MAX_TRACKED_IDENTIFIERS, WindowLimiterConfig};
pub use errors::WindowLimiterError;
pub use lru_store::LruStore;
pub use window::RateWindow;
pub use window_limiter::{Decision, RateLimitDecision, WindowLimiter};
