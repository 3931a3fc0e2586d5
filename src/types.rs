use serde::{Deserialize, Serialize};

// Canonical quota counters shared by the transport, call context and limiter.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct QuotaSnapshot {
    /// Calls allowed per one-minute window.
    pub total: i64,
    /// Calls made in the current window.
    pub used: i64,
    /// Calls left in the current window.
    pub remaining: i64,
}

impl QuotaSnapshot {
    pub fn new(total: i64, used: i64, remaining: i64) -> Self {
        Self {
            total,
            used,
            remaining,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining <= 0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Image {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub uri150: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ArtistSource {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub anv: String,
    #[serde(default)]
    pub join: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub resource_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct LabelSource {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub catno: String,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub resource_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Format {
    pub name: String,
    #[serde(default)]
    pub qty: String,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Release summary embedded in collection and wantlist entries.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BasicInformation {
    pub id: u64,
    #[serde(default)]
    pub master_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub artists: Vec<ArtistSource>,
    #[serde(default)]
    pub labels: Vec<LabelSource>,
    #[serde(default)]
    pub formats: Vec<Format>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Price {
    pub currency: String,
    pub value: f64,
}
