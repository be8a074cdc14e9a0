// src/window_limiter.rs

// window-limiter: a sliding-window rate limiter over a bounded LRU store.

// dependencies
use crate::clock::{Clock, SystemClock};
use crate::config::WindowLimiterConfig;
use crate::errors::WindowLimiterError;
use crate::lru_store::LruStore;
use crate::window::RateWindow;
use parking_lot::Mutex;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admitted,
    Rejected,
}

impl Decision {
    pub fn is_admitted(self) -> bool {
        matches!(self, Decision::Admitted)
    }

    pub fn is_rejected(self) -> bool {
        matches!(self, Decision::Rejected)
    }
}

/// Result of a rate limiting decision with metadata for HTTP responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request was admitted
    pub decision: Decision,
    /// The limit the request was checked against
    pub limit: u32,
    /// Admissions left in the current window after this request
    pub remaining: u32,
    /// Milliseconds until another request could be admitted (when rejected
    /// because the window is full)
    pub retry_after_millis: Option<u64>,
}

impl RateLimitDecision {
    fn refused(limit: u32) -> Self {
        Self {
            decision: Decision::Rejected,
            limit,
            remaining: 0,
            retry_after_millis: None,
        }
    }

    pub fn allowed(&self) -> bool {
        self.decision.is_admitted()
    }

    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after_millis.map(Duration::from_millis)
    }
}

/// The main WindowLimiter model.
/// C is the clock type, defaulting to SystemClock.
/// All identifier state lives behind one mutex so that the
/// prune/compare/record sequence and LRU bookkeeping happen atomically.
#[derive(Debug)]
pub struct WindowLimiter<C = SystemClock>
where
    C: Clock,
{
    window_ms: u64,
    store: Mutex<LruStore<String, RateWindow>>,
    clock: C,
}

impl WindowLimiter<SystemClock> {
    /// Create a limiter driven by the system clock
    pub fn new(config: WindowLimiterConfig) -> Result<Self, WindowLimiterError> {
        Self::with_config(config, SystemClock)
    }
}

// methods for the WindowLimiter type
impl<C> WindowLimiter<C>
where
    C: Clock,
{
    /// Create a new limiter from a config object and a clock
    pub fn with_config(config: WindowLimiterConfig, clock: C) -> Result<Self, WindowLimiterError> {
        config.validate()?;
        Ok(Self {
            window_ms: config.window_ms,
            store: Mutex::new(LruStore::new(config.max_tracked_identifiers)),
            clock,
        })
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn max_tracked_identifiers(&self) -> usize {
        self.store.lock().capacity()
    }

    /// Decide whether a request from `identifier` fits within `limit`
    /// requests per window. Admitted requests are recorded; rejected ones
    /// are not.
    ///
    /// An empty identifier, a zero limit or an unreadable clock always
    /// yields `Decision::Rejected` without touching any stored state.
    pub fn check(&self, identifier: &str, limit: u32) -> Decision {
        self.check_detailed(identifier, limit).decision
    }

    /// Same as [`check`](Self::check), also reporting remaining capacity
    /// and when a rejected caller may retry.
    pub fn check_detailed(&self, identifier: &str, limit: u32) -> RateLimitDecision {
        if identifier.is_empty() || limit == 0 {
            warn!(identifier, limit, "invalid rate limit check, rejecting");
            return RateLimitDecision::refused(limit);
        }

        let now = match self.clock.now() {
            Ok(now) => now,
            Err(error) => {
                warn!(%error, identifier, "clock unavailable, rejecting");
                return RateLimitDecision::refused(limit);
            }
        };

        let mut store = self.store.lock();
        let (window, evicted) = store.get_or_insert_with(identifier.to_owned(), RateWindow::new);
        if let Some((evicted, _)) = evicted {
            debug!(%evicted, "evicted least recently used identifier");
        }

        window.prune(now, self.window_ms);
        let live = window.len();

        if live >= limit as usize {
            let retry_after_millis = window.retry_after(now, self.window_ms, limit);
            debug!(identifier, live, limit, "request rejected");
            return RateLimitDecision {
                retry_after_millis,
                ..RateLimitDecision::refused(limit)
            };
        }

        window.record(now);
        let remaining = limit - (live as u32 + 1);
        trace!(identifier, remaining, "request admitted");

        RateLimitDecision {
            decision: Decision::Admitted,
            limit,
            remaining,
            retry_after_millis: None,
        }
    }

    /// Number of identifiers currently held in the store
    pub fn tracked_identifiers(&self) -> usize {
        self.store.lock().len()
    }

    /// Whether `identifier` currently has a window; does not affect recency
    pub fn is_tracked(&self, identifier: &str) -> bool {
        self.store.lock().contains_key(identifier)
    }

    /// Drop every identifier whose window holds no live requests.
    /// Returns how many were dropped.
    pub fn purge_expired(&self) -> Result<usize, WindowLimiterError> {
        let now = self.clock.now()?;
        let window_ms = self.window_ms;
        let purged = self.store.lock().retain(|_, window| {
            window.prune(now, window_ms);
            !window.is_empty()
        });
        if purged > 0 {
            debug!(purged, "purged expired identifiers");
        }
        Ok(purged)
    }
}
