// src/window.rs

//! Per-identifier sliding window of request timestamps.

// dependencies
use std::collections::VecDeque;

/// Timestamps (milliseconds) of admitted requests for one identifier,
/// oldest first. A timestamp `t` is live at `now` while `now - t < window`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateWindow {
    timestamps: VecDeque<u64>,
}

impl RateWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every timestamp that has aged out of the window.
    /// Returns how many were dropped.
    pub fn prune(&mut self, now: u64, window_ms: u64) -> usize {
        let mut dropped = 0;
        while let Some(&oldest) = self.timestamps.front() {
            if now.saturating_sub(oldest) < window_ms {
                break;
            }
            self.timestamps.pop_front();
            dropped += 1;
        }
        dropped
    }

    /// Record a request at `now`. Insertion order stays non-decreasing even
    /// if the clock steps backwards.
    pub fn record(&mut self, now: u64) {
        let at = self.timestamps.back().map_or(now, |&newest| newest.max(now));
        self.timestamps.push_back(at);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn oldest(&self) -> Option<u64> {
        self.timestamps.front().copied()
    }

    pub fn newest(&self) -> Option<u64> {
        self.timestamps.back().copied()
    }

    /// Milliseconds until fewer than `limit` timestamps are live, assuming
    /// the window was pruned at `now`. `None` when already below `limit`.
    pub fn retry_after(&self, now: u64, window_ms: u64, limit: u32) -> Option<u64> {
        let limit = limit as usize;
        if limit == 0 || self.timestamps.len() < limit {
            return None;
        }
        let blocking = self.timestamps[self.timestamps.len() - limit];
        Some(window_ms.saturating_sub(now.saturating_sub(blocking)).max(1))
    }
}
