// src/clock.rs

// clock module definition and implementations

// dependencies
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Clock trait to abstract time retrieval.
/// Implementors must be thread-safe (Send + Sync).
/// The `now` method returns the current time in milliseconds as a u64.
/// The limiter reads the clock once per check; tests substitute a manual clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<u64, ClockError>;
}

/// Clock error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    SystemTimeError,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::SystemTimeError => write!(f, "system clock is set before the unix epoch"),
        }
    }
}

impl std::error::Error for ClockError {}

/// SystemClock implementation using the system time.
/// Returns milliseconds since the Unix epoch, or an error if the
/// system clock reports a time before it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<u64, ClockError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .map_err(|_| ClockError::SystemTimeError)
    }
}
