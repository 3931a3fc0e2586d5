use crate::client::{user_segment, Client};
use crate::context::CallContext;
use crate::error::Result;
use crate::pagination::{query_params, MergedCollection, Page, Paged, Pagination};
use crate::types::BasicInformation;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A user's collection, organised in folders. Folder 0 holds every release;
/// folder 1 is "Uncategorized".
#[async_trait]
pub trait CollectionService: Send + Sync {
    async fn collection_folders(&self, ctx: &CallContext, username: &str)
        -> Result<CollectionFolders>;
    async fn folder(&self, ctx: &CallContext, username: &str, folder_id: u64) -> Result<Folder>;
    async fn collection_items_by_folder(
        &self,
        ctx: &CallContext,
        username: &str,
        folder_id: u64,
        pagination: Option<&Pagination>,
    ) -> Result<CollectionItems>;
    /// Every instance of `release_id` in the user's collection.
    async fn collection_items_by_release(
        &self,
        ctx: &CallContext,
        username: &str,
        release_id: u64,
    ) -> Result<CollectionItems>;
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Folder {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub resource_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CollectionFolders {
    #[serde(default)]
    pub folders: Vec<Folder>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Note {
    pub field_id: u64,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CollectionItem {
    pub id: u64,
    #[serde(default)]
    pub instance_id: u64,
    #[serde(default)]
    pub folder_id: u64,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub date_added: String,
    #[serde(default)]
    pub basic_information: BasicInformation,
    #[serde(default)]
    pub notes: Vec<Note>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CollectionItems {
    #[serde(default)]
    pub pagination: Page,
    #[serde(default)]
    pub releases: Vec<CollectionItem>,
}

impl Paged for CollectionItems {
    type Item = CollectionItem;

    fn cursor(&self) -> Page {
        self.pagination
    }

    fn into_items(self) -> Vec<CollectionItem> {
        self.releases
    }
}

impl From<MergedCollection<CollectionItem>> for CollectionItems {
    fn from(merged: MergedCollection<CollectionItem>) -> Self {
        Self {
            pagination: merged.cursor,
            releases: merged.items,
        }
    }
}

#[async_trait]
impl CollectionService for Client {
    async fn collection_folders(
        &self,
        ctx: &CallContext,
        username: &str,
    ) -> Result<CollectionFolders> {
        let user = user_segment(username)?;
        self.get(ctx, &format!("users/{}/collection/folders", user), Vec::new())
            .await
    }

    async fn folder(&self, ctx: &CallContext, username: &str, folder_id: u64) -> Result<Folder> {
        let user = user_segment(username)?;
        self.get(
            ctx,
            &format!("users/{}/collection/folders/{}", user, folder_id),
            Vec::new(),
        )
        .await
    }

    async fn collection_items_by_folder(
        &self,
        ctx: &CallContext,
        username: &str,
        folder_id: u64,
        pagination: Option<&Pagination>,
    ) -> Result<CollectionItems> {
        let user = user_segment(username)?;
        self.get(
            ctx,
            &format!("users/{}/collection/folders/{}/releases", user, folder_id),
            query_params(pagination),
        )
        .await
    }

    async fn collection_items_by_release(
        &self,
        ctx: &CallContext,
        username: &str,
        release_id: u64,
    ) -> Result<CollectionItems> {
        let user = user_segment(username)?;
        self.get(
            ctx,
            &format!("users/{}/collection/releases/{}", user, release_id),
            Vec::new(),
        )
        .await
    }
}
