//! Domain services, one trait per resource family.

mod collection;
mod database;
mod marketplace;
mod search;
mod wantlist;

pub use collection::{
    CollectionFolders, CollectionItem, CollectionItems, CollectionService, Folder, Note,
};
pub use database::{
    Artist, ArtistRelease, ArtistReleases, Community, DatabaseService, Identifier, Label,
    LabelRelease, LabelReleases, Master, MasterVersions, Member, Rating, Release, ReleaseRating,
    Sublabel, Track, Version, Video,
};
pub use marketplace::{MarketplaceService, PriceSuggestions, Stats};
pub use search::{
    Search, SearchCommunity, SearchRequest, SearchResult, SearchService, SearchType, UserData,
};
pub use wantlist::{Wantlist, WantlistItem, WantlistService};

/// Every capability of the API in one trait.
pub trait Discogs:
    CollectionService + DatabaseService + MarketplaceService + SearchService + WantlistService
{
}

impl<T> Discogs for T where
    T: CollectionService + DatabaseService + MarketplaceService + SearchService + WantlistService
{
}
