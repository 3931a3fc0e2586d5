//! Discogs API client with quota-aware call pacing.
//!
//! ```rust,no_run
//! use discogs_client::{CallContext, Client, Options, RateLimiter, DatabaseService};
//! use std::sync::Arc;
//!
//! # async fn run() -> discogs_client::Result<()> {
//! let client = Client::new(&Options::new("my-app/1.0").token("..."))?
//!     .rate_limited(Arc::new(RateLimiter::new()));
//! let ctx = CallContext::new();
//! let release = client.release(&ctx, 249504).await?;
//! let wants = client.complete_wantlist(&ctx, "someone").await?;
//! println!("{} / {} wants", release.title, wants.wants.len());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod pagination;
pub mod ratelimit;
pub mod services;
pub mod types;

pub use client::Client;
pub use config::{Currency, Options};
pub use context::{CallContext, CancelHandle};
pub use error::{Error, Result};
pub use pagination::{MergedCollection, Page, Paged, Pagination, SortOrder};
pub use ratelimit::{Dispatcher, Gate, RateLimited, RateLimiter};
pub use services::*;
pub use types::QuotaSnapshot;

/// Build a client from `options`. When `options.rate_limit` is set every
/// operation of the returned handle goes through that limiter.
///
/// Use [`new_rate_limited`] for the multi-page operations such as
/// [`RateLimited::complete_wantlist`].
pub fn new(options: &Options) -> Result<Box<dyn Discogs>> {
    let client = Client::new(options)?;
    Ok(match &options.rate_limit {
        Some(limiter) => Box::new(client.rate_limited(limiter.clone())),
        None => Box::new(client),
    })
}

/// Build a rate-limited client, which also offers the complete-listing
/// operations. `options.rate_limit` must be set.
pub fn new_rate_limited(options: &Options) -> Result<RateLimited<Client>> {
    let limiter = options
        .rate_limit
        .clone()
        .ok_or_else(|| Error::InvalidInput("a rate limiter is required".into()))?;
    Ok(Client::new(options)?.rate_limited(limiter))
}
