// src/config.rs

//! Configuration types for the window limiter

// dependencies
use crate::errors::WindowLimiterError;
use serde::Deserialize;
use std::time::Duration;

/// Number of distinct identifiers tracked when no capacity is given.
pub const DEFAULT_MAX_TRACKED_IDENTIFIERS: usize = 500;

fn default_max_tracked_identifiers() -> usize {
    DEFAULT_MAX_TRACKED_IDENTIFIERS
}

/// Configuration for window limiter behavior.
///
/// Deserializes from `{ "window_ms": 3600000, "max_tracked_identifiers": 500 }`,
/// with the capacity optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WindowLimiterConfig {
    pub(crate) window_ms: u64,
    #[serde(default = "default_max_tracked_identifiers")]
    pub(crate) max_tracked_identifiers: usize,
}

impl WindowLimiterConfig {
    /// Create a new configuration with the given window and the default capacity
    pub fn new(window: Duration) -> Self {
        Self::from_millis(window.as_millis() as u64)
    }

    /// Create a new configuration from a window length in milliseconds
    pub fn from_millis(window_ms: u64) -> Self {
        Self {
            window_ms,
            max_tracked_identifiers: DEFAULT_MAX_TRACKED_IDENTIFIERS,
        }
    }

    /// Builder-style: set the window length
    pub fn window(mut self, window: Duration) -> Self {
        self.window_ms = window.as_millis() as u64;
        self
    }

    /// Builder-style: set how many identifiers may be tracked at once
    pub fn max_tracked_identifiers(mut self, max_tracked_identifiers: usize) -> Self {
        self.max_tracked_identifiers = max_tracked_identifiers;
        self
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn capacity(&self) -> usize {
        self.max_tracked_identifiers
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), WindowLimiterError> {
        if self.window_ms == 0 {
            return Err(WindowLimiterError::InvalidWindow);
        }
        if self.max_tracked_identifiers == 0 {
            return Err(WindowLimiterError::InvalidCapacity);
        }
        Ok(())
    }
}
