use super::RateLimiter;
use crate::context::CallContext;
use crate::error::{Error, Result};
use log::debug;
use std::future::Future;
use std::sync::Arc;

/// Makes any single remote operation rate-limit aware.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    limiter: Arc<RateLimiter>,
}

impl Dispatcher {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Wait for permission, run `op` exactly once, then feed whatever quota
    /// counters the call observed back to the limiter, whether it succeeded
    /// or not. Never retries.
    ///
    /// `op` receives the context it must hand to the transport so the
    /// counters of its response can be collected.
    pub async fn call<T, F, Fut>(&self, ctx: &CallContext, op: F) -> Result<T>
    where
        F: FnOnce(CallContext) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        ctx.check()?;
        self.limiter.acquire(ctx).await?;

        let scoped = ctx.scoped();
        let outcome = scoped.run(op(scoped.clone())).await;

        if let Some(quota) = scoped.take_quota() {
            self.limiter.record(quota);
        }
        if let Err(Error::TooManyRequests) = &outcome {
            self.limiter.note_too_many_requests();
        }
        if let Err(e) = &outcome {
            debug!("rate limited call failed: {}", e);
        }
        outcome
    }
}

/// Decorator routing every operation of `D` through a [`Dispatcher`].
///
/// It implements each service trait `D` implements, and additionally offers
/// the multi-page aggregations, which need the limiter to pace their calls.
#[derive(Debug, Clone)]
pub struct RateLimited<D> {
    pub(crate) inner: D,
    pub(crate) dispatcher: Dispatcher,
}

impl<D> RateLimited<D> {
    pub fn new(inner: D, limiter: Arc<RateLimiter>) -> Self {
        Self {
            inner,
            dispatcher: Dispatcher::new(limiter),
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        self.dispatcher.limiter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratelimit::{Gate, WINDOW};
    use crate::types::QuotaSnapshot;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(RateLimiter::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn feeds_observed_quota_on_success() {
        let d = dispatcher();
        let out = d
            .call(&CallContext::new(), |ctx| async move {
                ctx.report_quota(QuotaSnapshot::new(60, 10, 50));
                Ok(42)
            })
            .await
            .unwrap();
        assert_eq!(out, 42);
        assert_eq!(d.limiter().state(), Some(QuotaSnapshot::new(60, 10, 50)));
    }

    #[tokio::test(start_paused = true)]
    async fn feeds_observed_quota_on_failure() {
        let d = dispatcher();
        let res: Result<()> = d
            .call(&CallContext::new(), |ctx| async move {
                ctx.report_quota(QuotaSnapshot::new(60, 60, 0));
                Err(Error::Unauthorized)
            })
            .await;
        assert!(matches!(res, Err(Error::Unauthorized)));
        assert_eq!(d.limiter().state(), Some(QuotaSnapshot::new(60, 60, 0)));
        assert_eq!(d.limiter().gate(), Gate::Wait(WINDOW));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_quota_leaves_state_untouched() {
        let d = dispatcher();
        d.limiter().update(60, 5, 55);
        let _: Result<()> = d
            .call(&CallContext::new(), |_| async {
                Err(Error::Transport("connection reset".into()))
            })
            .await;
        assert_eq!(d.limiter().state(), Some(QuotaSnapshot::new(60, 5, 55)));
    }

    #[tokio::test(start_paused = true)]
    async fn too_many_requests_is_returned_and_remembered() {
        let d = dispatcher();
        let calls = AtomicUsize::new(0);
        let res: Result<()> = d
            .call(&CallContext::new(), |_| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::TooManyRequests)
            })
            .await;
        assert!(matches!(res, Err(Error::TooManyRequests)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(d.limiter().gate(), Gate::Wait(WINDOW));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_exhausted_quota_before_calling() {
        let d = dispatcher();
        d.limiter().update(60, 60, 0);
        let start = Instant::now();
        d.call(&CallContext::new(), |_| async { Ok(()) })
            .await
            .unwrap();
        assert_eq!(start.elapsed(), WINDOW);
    }

    #[tokio::test(start_paused = true)]
    async fn waiters_released_by_a_new_window_share_its_allowance() {
        let d = dispatcher();
        d.limiter().update(3, 3, 0);
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let d = d.clone();
                let calls = calls.clone();
                tokio::spawn(async move {
                    d.call(&CallContext::new(), |_| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    })
                    .await
                })
            })
            .collect();

        tokio::time::sleep(WINDOW + Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        tokio::time::sleep(WINDOW).await;
        assert_eq!(calls.load(Ordering::SeqCst), 6);

        for task in tasks {
            task.abort();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_during_wait_skips_the_call() {
        let d = dispatcher();
        d.limiter().update(60, 60, 0);
        let (ctx, handle) = CallContext::new().with_cancel();
        let calls = Arc::new(AtomicUsize::new(0));

        let task = {
            let d = d.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                d.call(&ctx, |_| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .await
            })
        };
        tokio::time::sleep(Duration::from_secs(5)).await;
        handle.cancel();

        let res = task.await.unwrap();
        assert!(matches!(res, Err(Error::Cancelled)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_interrupts_slow_operation() {
        let d = dispatcher();
        let ctx = CallContext::new().with_timeout(Duration::from_secs(1));
        let res: Result<()> = d
            .call(&ctx, |ctx| async move {
                ctx.report_quota(QuotaSnapshot::new(60, 1, 59));
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            })
            .await;
        assert!(matches!(res, Err(Error::DeadlineExceeded)));
        assert_eq!(d.limiter().state(), Some(QuotaSnapshot::new(60, 1, 59)));
    }

    #[tokio::test]
    async fn already_cancelled_context_fails_fast() {
        let d = dispatcher();
        let (ctx, handle) = CallContext::new().with_cancel();
        handle.cancel();
        let res: Result<()> = d.call(&ctx, |_| async { Ok(()) }).await;
        assert!(matches!(res, Err(Error::Cancelled)));
    }
}
