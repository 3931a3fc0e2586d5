use crate::client::{user_segment, Client};
use crate::context::CallContext;
use crate::error::Result;
use crate::http::Request;
use crate::pagination::{query_params, MergedCollection, Page, Paged, Pagination};
use crate::types::BasicInformation;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

/// A user's wantlist.
///
/// Fetching the whole list in one go is only offered by
/// [`RateLimited::complete_wantlist`](crate::RateLimited::complete_wantlist),
/// since it can take many calls.
#[async_trait]
pub trait WantlistService: Send + Sync {
    async fn wantlist(
        &self,
        ctx: &CallContext,
        username: &str,
        pagination: Option<&Pagination>,
    ) -> Result<Wantlist>;
    async fn add_wantlist_item(
        &self,
        ctx: &CallContext,
        username: &str,
        item: &WantlistItem,
    ) -> Result<()>;
    async fn update_wantlist_item(
        &self,
        ctx: &CallContext,
        username: &str,
        item: &WantlistItem,
    ) -> Result<()>;
    async fn delete_wantlist_item(
        &self,
        ctx: &CallContext,
        username: &str,
        item: &WantlistItem,
    ) -> Result<()>;
}

/// One wanted release. `id` is the release id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WantlistItem {
    pub id: u64,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<String>,
    #[serde(
        default,
        rename = "basic_information",
        skip_serializing_if = "Option::is_none"
    )]
    pub release: Option<BasicInformation>,
}

impl WantlistItem {
    pub fn new(release_id: u64) -> Self {
        Self {
            id: release_id,
            ..Self::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    fn payload(&self) -> serde_json::Value {
        let mut body = serde_json::json!({ "notes": self.notes });
        if let Some(rating) = self.rating {
            body["rating"] = rating.into();
        }
        body
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Wantlist {
    pub pagination: Page,
    #[serde(default)]
    pub wants: Vec<WantlistItem>,
}

impl Paged for Wantlist {
    type Item = WantlistItem;

    fn cursor(&self) -> Page {
        self.pagination
    }

    fn into_items(self) -> Vec<WantlistItem> {
        self.wants
    }
}

impl From<MergedCollection<WantlistItem>> for Wantlist {
    fn from(merged: MergedCollection<WantlistItem>) -> Self {
        Self {
            pagination: merged.cursor,
            wants: merged.items,
        }
    }
}

impl Client {
    async fn write_want(
        &self,
        ctx: &CallContext,
        username: &str,
        item: &WantlistItem,
        method: Method,
        success: StatusCode,
    ) -> Result<()> {
        let user = user_segment(username)?;
        let url = self.endpoint(&format!("users/{}/wants/{}", user, item.id));
        let mut request = Request::new(method.clone(), url, success);
        if method != Method::DELETE {
            request = request.with_payload(item.payload());
        }
        self.send(ctx, request).await?;
        Ok(())
    }
}

#[async_trait]
impl WantlistService for Client {
    async fn wantlist(
        &self,
        ctx: &CallContext,
        username: &str,
        pagination: Option<&Pagination>,
    ) -> Result<Wantlist> {
        let user = user_segment(username)?;
        self.get(ctx, &format!("users/{}/wants", user), query_params(pagination))
            .await
    }

    async fn add_wantlist_item(
        &self,
        ctx: &CallContext,
        username: &str,
        item: &WantlistItem,
    ) -> Result<()> {
        self.write_want(ctx, username, item, Method::PUT, StatusCode::CREATED)
            .await
    }

    async fn update_wantlist_item(
        &self,
        ctx: &CallContext,
        username: &str,
        item: &WantlistItem,
    ) -> Result<()> {
        self.write_want(ctx, username, item, Method::POST, StatusCode::OK)
            .await
    }

    async fn delete_wantlist_item(
        &self,
        ctx: &CallContext,
        username: &str,
        item: &WantlistItem,
    ) -> Result<()> {
        self.write_want(ctx, username, item, Method::DELETE, StatusCode::NO_CONTENT)
            .await
    }
}
