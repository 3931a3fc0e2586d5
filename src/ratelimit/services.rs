//! Service traits on [`RateLimited`]: every operation is the inner one,
//! passed through [`Dispatcher::call`](super::Dispatcher::call).

use super::RateLimited;
use crate::context::CallContext;
use crate::error::{Error, Result};
use crate::pagination::{aggregate, Pagination};
use crate::services::*;
use async_trait::async_trait;

#[async_trait]
impl<D: DatabaseService> DatabaseService for RateLimited<D> {
    async fn artist(&self, ctx: &CallContext, artist_id: u64) -> Result<Artist> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move { inner.artist(&ctx, artist_id).await })
            .await
    }

    async fn artist_releases(
        &self,
        ctx: &CallContext,
        artist_id: u64,
        pagination: Option<&Pagination>,
    ) -> Result<ArtistReleases> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner.artist_releases(&ctx, artist_id, pagination).await
            })
            .await
    }

    async fn label(&self, ctx: &CallContext, label_id: u64) -> Result<Label> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move { inner.label(&ctx, label_id).await })
            .await
    }

    async fn label_releases(
        &self,
        ctx: &CallContext,
        label_id: u64,
        pagination: Option<&Pagination>,
    ) -> Result<LabelReleases> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner.label_releases(&ctx, label_id, pagination).await
            })
            .await
    }

    async fn master(&self, ctx: &CallContext, master_id: u64) -> Result<Master> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move { inner.master(&ctx, master_id).await })
            .await
    }

    async fn master_versions(
        &self,
        ctx: &CallContext,
        master_id: u64,
        pagination: Option<&Pagination>,
    ) -> Result<MasterVersions> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner.master_versions(&ctx, master_id, pagination).await
            })
            .await
    }

    async fn release(&self, ctx: &CallContext, release_id: u64) -> Result<Release> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move { inner.release(&ctx, release_id).await })
            .await
    }

    async fn release_rating(&self, ctx: &CallContext, release_id: u64) -> Result<ReleaseRating> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner.release_rating(&ctx, release_id).await
            })
            .await
    }
}

#[async_trait]
impl<D: MarketplaceService> MarketplaceService for RateLimited<D> {
    async fn price_suggestions(
        &self,
        ctx: &CallContext,
        release_id: u64,
    ) -> Result<PriceSuggestions> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner.price_suggestions(&ctx, release_id).await
            })
            .await
    }

    async fn release_statistics(&self, ctx: &CallContext, release_id: u64) -> Result<Stats> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner.release_statistics(&ctx, release_id).await
            })
            .await
    }
}

#[async_trait]
impl<D: CollectionService> CollectionService for RateLimited<D> {
    async fn collection_folders(
        &self,
        ctx: &CallContext,
        username: &str,
    ) -> Result<CollectionFolders> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner.collection_folders(&ctx, username).await
            })
            .await
    }

    async fn folder(&self, ctx: &CallContext, username: &str, folder_id: u64) -> Result<Folder> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner.folder(&ctx, username, folder_id).await
            })
            .await
    }

    async fn collection_items_by_folder(
        &self,
        ctx: &CallContext,
        username: &str,
        folder_id: u64,
        pagination: Option<&Pagination>,
    ) -> Result<CollectionItems> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner
                    .collection_items_by_folder(&ctx, username, folder_id, pagination)
                    .await
            })
            .await
    }

    async fn collection_items_by_release(
        &self,
        ctx: &CallContext,
        username: &str,
        release_id: u64,
    ) -> Result<CollectionItems> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner
                    .collection_items_by_release(&ctx, username, release_id)
                    .await
            })
            .await
    }
}

#[async_trait]
impl<D: SearchService> SearchService for RateLimited<D> {
    async fn search(&self, ctx: &CallContext, request: &SearchRequest) -> Result<Search> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move { inner.search(&ctx, request).await })
            .await
    }
}

#[async_trait]
impl<D: WantlistService> WantlistService for RateLimited<D> {
    async fn wantlist(
        &self,
        ctx: &CallContext,
        username: &str,
        pagination: Option<&Pagination>,
    ) -> Result<Wantlist> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner.wantlist(&ctx, username, pagination).await
            })
            .await
    }

    async fn add_wantlist_item(
        &self,
        ctx: &CallContext,
        username: &str,
        item: &WantlistItem,
    ) -> Result<()> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner.add_wantlist_item(&ctx, username, item).await
            })
            .await
    }

    async fn update_wantlist_item(
        &self,
        ctx: &CallContext,
        username: &str,
        item: &WantlistItem,
    ) -> Result<()> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner.update_wantlist_item(&ctx, username, item).await
            })
            .await
    }

    async fn delete_wantlist_item(
        &self,
        ctx: &CallContext,
        username: &str,
        item: &WantlistItem,
    ) -> Result<()> {
        let inner = &self.inner;
        self.dispatcher
            .call(ctx, move |ctx| async move {
                inner.delete_wantlist_item(&ctx, username, item).await
            })
            .await
    }
}

impl<D: WantlistService> RateLimited<D> {
    /// The user's whole wantlist, fetched page by page through the limiter.
    ///
    /// The result describes itself as a single page holding every item. Any
    /// failing page fails the whole call.
    pub async fn complete_wantlist(&self, ctx: &CallContext, username: &str) -> Result<Wantlist> {
        if username.is_empty() {
            return Err(Error::InvalidUsername);
        }
        let inner = &self.inner;
        let merged = aggregate(&self.dispatcher, ctx, move |ctx, pagination| async move {
            inner.wantlist(&ctx, username, Some(&pagination)).await
        })
        .await?;
        Ok(merged.into())
    }
}

impl<D: CollectionService> RateLimited<D> {
    /// Every item of one collection folder, fetched page by page through
    /// the limiter. Folder 0 is the whole collection.
    pub async fn complete_collection_items(
        &self,
        ctx: &CallContext,
        username: &str,
        folder_id: u64,
    ) -> Result<CollectionItems> {
        if username.is_empty() {
            return Err(Error::InvalidUsername);
        }
        let inner = &self.inner;
        let merged = aggregate(&self.dispatcher, ctx, move |ctx, pagination| async move {
            inner
                .collection_items_by_folder(&ctx, username, folder_id, Some(&pagination))
                .await
        })
        .await?;
        Ok(merged.into())
    }
}
