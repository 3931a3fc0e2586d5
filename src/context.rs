//! Per-call context: cancellation, deadline and quota feedback.
//!
//! Every client operation takes a [`CallContext`]. Cancelling it, or letting
//! its deadline pass, makes any pending rate-limit wait or in-flight request
//! resolve to [`Error::Cancelled`] / [`Error::DeadlineExceeded`]. The
//! transport also uses the context to surface the quota counters of the
//! response it received, which is how the rate limiter learns about them.

use crate::error::{Error, Result};
use crate::types::QuotaSnapshot;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
    observed: Arc<Mutex<Option<QuotaSnapshot>>>,
}

/// Cancels the [`CallContext`] (and all its clones) it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a cancellation flag, replacing any earlier one.
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancel = Some(rx);
        (self, CancelHandle { tx })
    }

    /// Set a deadline. An earlier existing deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Fails if the context is already cancelled or past its deadline.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Error::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Resolves once the context is cancelled or expires, never otherwise.
    pub async fn done(&self) -> Error {
        tokio::select! {
            _ = self.cancelled() => Error::Cancelled,
            _ = self.expired() => Error::DeadlineExceeded,
        }
    }

    /// Drive `fut` to completion unless the context fires first.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            out = fut => out,
        }
    }

    /// Cancellable sleep.
    pub async fn sleep(&self, duration: Duration) -> Result<()> {
        self.run(async {
            tokio::time::sleep(duration).await;
            Ok(())
        })
        .await
    }

    /// Record the quota counters carried by a response.
    pub fn report_quota(&self, quota: QuotaSnapshot) {
        *self.observed.lock().unwrap_or_else(PoisonError::into_inner) = Some(quota);
    }

    /// Counters of the last response observed through this context.
    pub fn observed_quota(&self) -> Option<QuotaSnapshot> {
        *self.observed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Same cancellation and deadline, fresh quota slot.
    pub(crate) fn scoped(&self) -> Self {
        Self {
            cancel: self.cancel.clone(),
            deadline: self.deadline,
            observed: Arc::new(Mutex::new(None)),
        }
    }

    pub(crate) fn take_quota(&self) -> Option<QuotaSnapshot> {
        self.observed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    async fn cancelled(&self) {
        if let Some(rx) = &self.cancel {
            let mut rx = rx.clone();
            let fired = rx.wait_for(|cancelled| *cancelled).await.is_ok();
            if fired {
                return;
            }
        }
        std::future::pending::<()>().await
    }

    async fn expired(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending::<()>().await,
        }
    }
}
