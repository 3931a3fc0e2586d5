use crate::client::Client;
use crate::context::CallContext;
use crate::error::Result;
use crate::types::Price;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[async_trait]
pub trait MarketplaceService: Send + Sync {
    /// Suggested prices per item condition. Requires a token.
    async fn price_suggestions(&self, ctx: &CallContext, release_id: u64)
        -> Result<PriceSuggestions>;
    /// Marketplace statistics, priced in the client's currency.
    async fn release_statistics(&self, ctx: &CallContext, release_id: u64) -> Result<Stats>;
}

/// Keyed by condition, e.g. `"Very Good Plus (VG+)"`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct PriceSuggestions(pub BTreeMap<String, Price>);

impl PriceSuggestions {
    pub fn get(&self, condition: &str) -> Option<&Price> {
        self.0.get(condition)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Stats {
    #[serde(default)]
    pub lowest_price: Option<Price>,
    #[serde(default)]
    pub num_for_sale: Option<u32>,
    #[serde(default)]
    pub blocked_from_sale: bool,
}

#[async_trait]
impl MarketplaceService for Client {
    async fn price_suggestions(
        &self,
        ctx: &CallContext,
        release_id: u64,
    ) -> Result<PriceSuggestions> {
        self.get(
            ctx,
            &format!("marketplace/price_suggestions/{}", release_id),
            Vec::new(),
        )
        .await
    }

    async fn release_statistics(&self, ctx: &CallContext, release_id: u64) -> Result<Stats> {
        let params = vec![("curr_abbr".to_string(), self.currency().to_string())];
        self.get(ctx, &format!("marketplace/stats/{}", release_id), params)
            .await
    }
}
