// src/errors.rs

// error handling for the window limiter

// dependencies
use thiserror::Error;

use crate::clock::ClockError;

/// Error type for WindowLimiter configuration and maintenance.
///
/// `check` itself never returns one of these: bad input and clock
/// failures there resolve to a rejected decision instead.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WindowLimiterError {
    #[error("Window size must be positive")]
    InvalidWindow,
    #[error("Max tracked identifiers must be positive")]
    InvalidCapacity,
    #[error("Clock error occurred: {0}")]
    Clock(#[from] ClockError),
}
