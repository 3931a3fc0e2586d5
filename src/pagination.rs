//! Paged listings and their aggregation into a single collection.

use crate::context::CallContext;
use crate::error::Result;
use crate::ratelimit::Dispatcher;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Largest page size the service accepts; used by aggregation to keep the
/// number of calls down.
pub const MAX_PER_PAGE: u32 = 100;

/// Which page of a listing to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub sort: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 50)
    }
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            sort: None,
            sort_order: None,
        }
    }

    pub fn sorted(mut self, sort: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(sort.into());
        self.sort_order = Some(order);
        self
    }

    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ];
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        if let Some(order) = self.sort_order {
            params.push(("sort_order".to_string(), order.as_str().to_string()));
        }
        params
    }
}

/// Query parameters for an optional page request.
pub(crate) fn query_params(pagination: Option<&Pagination>) -> Vec<(String, String)> {
    pagination.map(Pagination::params).unwrap_or_default()
}

/// Pagination block embedded in every paged response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default, rename = "pages")]
    pub total_pages: u32,
    #[serde(default, rename = "items")]
    pub total_items: u32,
}

impl Page {
    /// Cursor describing `len` items delivered as one page.
    pub fn single(len: usize) -> Self {
        let len = u32::try_from(len).unwrap_or(u32::MAX);
        Self {
            page: 1,
            per_page: len,
            total_pages: 1,
            total_items: len,
        }
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

/// A response carrying one page of a listing.
pub trait Paged {
    type Item;

    fn cursor(&self) -> Page;
    fn into_items(self) -> Vec<Self::Item>;
}

/// Items of every page of a listing, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedCollection<T> {
    pub items: Vec<T>,
    pub cursor: Page,
}

impl<T> Default for MergedCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: Page::default(),
        }
    }
}

impl<T> MergedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, items: Vec<T>) {
        self.items.extend(items);
    }

    /// Rewrite the cursor so the collection describes itself as one page.
    pub fn normalize(mut self) -> Self {
        self.cursor = Page::single(self.items.len());
        self
    }
}

/// Fetch every page of a listing through `dispatcher` and merge them.
///
/// Pages are requested one after another starting at page 1 with
/// [`MAX_PER_PAGE`] items, until the server's own cursor reports the last
/// page, or the requested page reaches the server's page count when the
/// server echoes a different page number. The first failing page aborts the whole run; nothing merged so far
/// is returned.
pub async fn aggregate<P, F, Fut>(
    dispatcher: &Dispatcher,
    ctx: &CallContext,
    mut fetch: F,
) -> Result<MergedCollection<P::Item>>
where
    P: Paged,
    F: FnMut(CallContext, Pagination) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    let mut merged = MergedCollection::new();
    let mut pagination = Pagination::new(1, MAX_PER_PAGE);

    loop {
        let request = pagination.clone();
        let page: P = dispatcher
            .call(ctx, |ctx| fetch(ctx, request))
            .await?;

        let cursor = page.cursor();
        if cursor.page != pagination.page {
            warn!(
                "requested page {} but the server answered page {}",
                pagination.page, cursor.page
            );
        }
        merged.merge(page.into_items());
        debug!(
            "fetched page {}/{} ({} items merged)",
            cursor.page,
            cursor.total_pages,
            merged.items.len()
        );

        if cursor.is_last() || pagination.page >= cursor.total_pages {
            break;
        }
        pagination.page += 1;
    }

    let merged = merged.normalize();
    info!(
        "aggregated {} items in {} pages",
        merged.items.len(),
        pagination.page
    );
    Ok(merged)
}
