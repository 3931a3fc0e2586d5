//! Quota tracking and call gating.
//!
//! The remote service reports, on every response, how many calls the client
//! may make per one-minute window, how many it has used and how many remain.
//! [`RateLimiter`] keeps the latest report and decides, for each outbound
//! call, whether it may go now or has to wait. [`Dispatcher`] wraps single
//! operations with that decision and [`RateLimited`] applies it to a whole
//! client.
//!
//! Waiting rule: once the quota is exhausted, callers wait until one full
//! window has elapsed since exhaustion was observed. The new window then
//! admits as many calls as the server last reported as its total, until a
//! fresh report replaces the counters. A `429 Too Many Requests` forces the
//! same full-window wait no matter what the counters say.

mod dispatch;
mod services;

pub use dispatch::{Dispatcher, RateLimited};

use crate::context::CallContext;
use crate::error::Result;
use crate::types::QuotaSnapshot;
use log::{debug, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Length of the server's rolling quota window.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Outcome of asking the limiter for permission to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Proceed,
    Wait(Duration),
}

#[derive(Debug, Default)]
struct LimiterState {
    /// Last counters reported by the server.
    reported: Option<QuotaSnapshot>,
    /// Slots left locally; reported `remaining` minus calls let through since.
    available: Option<i64>,
    /// When the quota was last seen (or made) exhausted.
    exhausted_at: Option<Instant>,
    /// When the server last answered 429.
    throttled_at: Option<Instant>,
}

/// Shared view of the caller's quota. Share it behind an `Arc` between every
/// dispatcher that draws from the same quota.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    state: Mutex<LimiterState>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_window(WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            state: Mutex::new(LimiterState::default()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Overwrite the state with freshly reported server counters.
    pub fn update(&self, total: i64, used: i64, remaining: i64) {
        self.record(QuotaSnapshot::new(total, used, remaining));
    }

    pub fn record(&self, quota: QuotaSnapshot) {
        let mut state = self.lock();
        state.reported = Some(quota);
        state.available = Some(quota.remaining);
        state.exhausted_at = quota.is_exhausted().then(Instant::now);
        debug!(
            "quota updated: total={} used={} remaining={}",
            quota.total, quota.used, quota.remaining
        );
    }

    /// Latest server-reported counters, if any call has reported them yet.
    pub fn state(&self) -> Option<QuotaSnapshot> {
        self.lock().reported
    }

    /// Remember that the server refused a call with 429.
    pub fn note_too_many_requests(&self) {
        warn!(
            "server reported too many requests; holding calls for {:?}",
            self.window
        );
        self.lock().throttled_at = Some(Instant::now());
    }

    /// Decide whether a call may go now. A `Proceed` answer consumes one
    /// locally tracked slot.
    pub fn gate(&self) -> Gate {
        let now = Instant::now();
        let mut state = self.lock();

        if let Some(at) = state.throttled_at {
            let until = at + self.window;
            if now < until {
                return Gate::Wait(until - now);
            }
            state.throttled_at = None;
        }

        let Some(mut available) = state.available else {
            return Gate::Proceed;
        };

        if available <= 0 {
            let since = *state.exhausted_at.get_or_insert(now);
            let until = since + self.window;
            if now < until {
                return Gate::Wait(until - now);
            }
            // New window: the last reported allowance applies again.
            available = state.reported.map_or(1, |q| q.total.max(1));
            debug!("quota window rolled over; {} calls available", available);
        }

        state.available = Some(available - 1);
        state.exhausted_at = (available == 1).then_some(now);
        Gate::Proceed
    }

    /// Wait until a call is permitted, or until `ctx` is cancelled. The gate
    /// is asked again after every wait, so waiters released by the same
    /// window roll-over still share its allowance.
    pub async fn acquire(&self, ctx: &CallContext) -> Result<()> {
        loop {
            match self.gate() {
                Gate::Proceed => return Ok(()),
                Gate::Wait(delay) => {
                    debug!("quota exhausted; waiting {:?} before next call", delay);
                    ctx.sleep(delay).await?;
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, LimiterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
