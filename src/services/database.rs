use crate::client::Client;
use crate::context::CallContext;
use crate::error::Result;
use crate::pagination::{query_params, Page, Paged, Pagination};
use crate::types::{ArtistSource, Format, Image, LabelSource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Artists, labels, masters and releases.
#[async_trait]
pub trait DatabaseService: Send + Sync {
    async fn artist(&self, ctx: &CallContext, artist_id: u64) -> Result<Artist>;
    async fn artist_releases(
        &self,
        ctx: &CallContext,
        artist_id: u64,
        pagination: Option<&Pagination>,
    ) -> Result<ArtistReleases>;
    async fn label(&self, ctx: &CallContext, label_id: u64) -> Result<Label>;
    async fn label_releases(
        &self,
        ctx: &CallContext,
        label_id: u64,
        pagination: Option<&Pagination>,
    ) -> Result<LabelReleases>;
    async fn master(&self, ctx: &CallContext, master_id: u64) -> Result<Master>;
    async fn master_versions(
        &self,
        ctx: &CallContext,
        master_id: u64,
        pagination: Option<&Pagination>,
    ) -> Result<MasterVersions>;
    /// Prices are given in the client's currency.
    async fn release(&self, ctx: &CallContext, release_id: u64) -> Result<Release>;
    async fn release_rating(&self, ctx: &CallContext, release_id: u64) -> Result<ReleaseRating>;
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Member {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub resource_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Artist {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub realname: String,
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub releases_url: String,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub namevariations: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub data_quality: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ArtistRelease {
    pub id: u64,
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub main_release: Option<u64>,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub resource_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ArtistReleases {
    pub pagination: Page,
    #[serde(default)]
    pub releases: Vec<ArtistRelease>,
}

impl Paged for ArtistReleases {
    type Item = ArtistRelease;

    fn cursor(&self) -> Page {
        self.pagination
    }

    fn into_items(self) -> Vec<ArtistRelease> {
        self.releases
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Sublabel {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub resource_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Label {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub releases_url: String,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub sublabels: Vec<Sublabel>,
    #[serde(default)]
    pub parent_label: Option<Sublabel>,
    #[serde(default)]
    pub data_quality: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct LabelRelease {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub catno: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub resource_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct LabelReleases {
    pub pagination: Page,
    #[serde(default)]
    pub releases: Vec<LabelRelease>,
}

impl Paged for LabelReleases {
    type Item = LabelRelease;

    fn cursor(&self) -> Page {
        self.pagination
    }

    fn into_items(self) -> Vec<LabelRelease> {
        self.releases
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Track {
    #[serde(default)]
    pub position: String,
    pub title: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub type_: String,
    #[serde(default)]
    pub artists: Vec<ArtistSource>,
    #[serde(default)]
    pub extraartists: Vec<ArtistSource>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Video {
    pub uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub embed: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Master {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub main_release: u64,
    #[serde(default)]
    pub most_recent_release: u64,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub artists: Vec<ArtistSource>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub tracklist: Vec<Track>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub num_for_sale: u32,
    #[serde(default)]
    pub lowest_price: Option<f64>,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub versions_url: String,
    #[serde(default)]
    pub data_quality: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Version {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub catno: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub major_formats: Vec<String>,
    #[serde(default)]
    pub released: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub resource_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct MasterVersions {
    pub pagination: Page,
    #[serde(default)]
    pub versions: Vec<Version>,
}

impl Paged for MasterVersions {
    type Item = Version;

    fn cursor(&self) -> Page {
        self.pagination
    }

    fn into_items(self) -> Vec<Version> {
        self.versions
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Rating {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub average: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Community {
    #[serde(default)]
    pub have: u32,
    #[serde(default)]
    pub want: u32,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data_quality: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Release {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub released: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub artists: Vec<ArtistSource>,
    #[serde(default)]
    pub artists_sort: String,
    #[serde(default)]
    pub extraartists: Vec<ArtistSource>,
    #[serde(default)]
    pub labels: Vec<LabelSource>,
    #[serde(default)]
    pub companies: Vec<LabelSource>,
    #[serde(default)]
    pub formats: Vec<Format>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub identifiers: Vec<Identifier>,
    #[serde(default)]
    pub tracklist: Vec<Track>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub community: Option<Community>,
    #[serde(default)]
    pub master_id: Option<u64>,
    #[serde(default)]
    pub num_for_sale: u32,
    #[serde(default)]
    pub lowest_price: Option<f64>,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub data_quality: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ReleaseRating {
    pub release_id: u64,
    pub rating: Rating,
}

#[async_trait]
impl DatabaseService for Client {
    async fn artist(&self, ctx: &CallContext, artist_id: u64) -> Result<Artist> {
        self.get(ctx, &format!("artists/{}", artist_id), Vec::new())
            .await
    }

    async fn artist_releases(
        &self,
        ctx: &CallContext,
        artist_id: u64,
        pagination: Option<&Pagination>,
    ) -> Result<ArtistReleases> {
        self.get(
            ctx,
            &format!("artists/{}/releases", artist_id),
            query_params(pagination),
        )
        .await
    }

    async fn label(&self, ctx: &CallContext, label_id: u64) -> Result<Label> {
        self.get(ctx, &format!("labels/{}", label_id), Vec::new())
            .await
    }

    async fn label_releases(
        &self,
        ctx: &CallContext,
        label_id: u64,
        pagination: Option<&Pagination>,
    ) -> Result<LabelReleases> {
        self.get(
            ctx,
            &format!("labels/{}/releases", label_id),
            query_params(pagination),
        )
        .await
    }

    async fn master(&self, ctx: &CallContext, master_id: u64) -> Result<Master> {
        self.get(ctx, &format!("masters/{}", master_id), Vec::new())
            .await
    }

    async fn master_versions(
        &self,
        ctx: &CallContext,
        master_id: u64,
        pagination: Option<&Pagination>,
    ) -> Result<MasterVersions> {
        self.get(
            ctx,
            &format!("masters/{}/versions", master_id),
            query_params(pagination),
        )
        .await
    }

    async fn release(&self, ctx: &CallContext, release_id: u64) -> Result<Release> {
        let params = vec![("curr_abbr".to_string(), self.currency().to_string())];
        self.get(ctx, &format!("releases/{}", release_id), params)
            .await
    }

    async fn release_rating(&self, ctx: &CallContext, release_id: u64) -> Result<ReleaseRating> {
        self.get(ctx, &format!("releases/{}/rating", release_id), Vec::new())
            .await
    }
}
