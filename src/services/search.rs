use crate::client::Client;
use crate::context::CallContext;
use crate::error::Result;
use crate::pagination::{Page, Paged};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait SearchService: Send + Sync {
    /// Database search. The service refuses anonymous searches, so the
    /// client needs a token.
    async fn search(&self, ctx: &CallContext, request: &SearchRequest) -> Result<Search>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Release,
    Master,
    Artist,
    Label,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Release => "release",
            SearchType::Master => "master",
            SearchType::Artist => "artist",
            SearchType::Label => "label",
        }
    }
}

/// Search filters; unset fields are not sent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchRequest {
    pub q: Option<String>,
    pub kind: Option<SearchType>,
    pub title: Option<String>,
    pub release_title: Option<String>,
    pub credit: Option<String>,
    pub artist: Option<String>,
    pub anv: Option<String>,
    pub label: Option<String>,
    pub genre: Option<String>,
    pub style: Option<String>,
    pub country: Option<String>,
    pub year: Option<String>,
    pub format: Option<String>,
    pub catno: Option<String>,
    pub barcode: Option<String>,
    pub track: Option<String>,
    pub submitter: Option<String>,
    pub contributor: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl SearchRequest {
    pub fn query(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Self::default()
        }
    }

    pub fn params(&self) -> Vec<(String, String)> {
        let text = [
            ("q", &self.q),
            ("title", &self.title),
            ("release_title", &self.release_title),
            ("credit", &self.credit),
            ("artist", &self.artist),
            ("anv", &self.anv),
            ("label", &self.label),
            ("genre", &self.genre),
            ("style", &self.style),
            ("country", &self.country),
            ("year", &self.year),
            ("format", &self.format),
            ("catno", &self.catno),
            ("barcode", &self.barcode),
            ("track", &self.track),
            ("submitter", &self.submitter),
            ("contributor", &self.contributor),
        ];
        let mut params: Vec<(String, String)> = text
            .into_iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.to_string(), v.clone())))
            .collect();
        if let Some(kind) = self.kind {
            params.push(("type".to_string(), kind.as_str().to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page".to_string(), per_page.to_string()));
        }
        params
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct UserData {
    #[serde(default)]
    pub in_wantlist: bool,
    #[serde(default)]
    pub in_collection: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SearchCommunity {
    #[serde(default)]
    pub want: u32,
    #[serde(default)]
    pub have: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SearchResult {
    pub id: u64,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub format: Vec<String>,
    #[serde(default)]
    pub label: Vec<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub style: Vec<String>,
    #[serde(default)]
    pub barcode: Vec<String>,
    #[serde(default)]
    pub catno: String,
    #[serde(default)]
    pub master_id: Option<u64>,
    #[serde(default)]
    pub community: Option<SearchCommunity>,
    #[serde(default)]
    pub user_data: Option<UserData>,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub resource_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Search {
    pub pagination: Page,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

impl Paged for Search {
    type Item = SearchResult;

    fn cursor(&self) -> Page {
        self.pagination
    }

    fn into_items(self) -> Vec<SearchResult> {
        self.results
    }
}

#[async_trait]
impl SearchService for Client {
    async fn search(&self, ctx: &CallContext, request: &SearchRequest) -> Result<Search> {
        self.get(ctx, "database/search", request.params()).await
    }
}
