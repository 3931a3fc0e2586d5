use discogs_client::{
    CallContext, Client, CollectionService, DatabaseService, Error, MarketplaceService, Options,
    QuotaSnapshot, RateLimiter, SearchRequest, SearchService, SearchType, WantlistItem,
    WantlistService,
};
use httpmock::{
    Method::{DELETE, GET, POST, PUT},
    MockServer,
};
use serde_json::json;
use std::sync::Arc;

const AGENT: &str = "discogs-client-tests/1.0";

fn client(server: &MockServer) -> Client {
    Client::new(&Options::new(AGENT).url(server.base_url()).token("s3cret")).unwrap()
}

#[tokio::test]
async fn artist_sends_identity_headers() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/artists/1")
                .header("user-agent", AGENT)
                .header("authorization", "Discogs token=s3cret");
            then.status(200).json_body(json!({
                "id": 1,
                "name": "The Persuader",
                "realname": "Jesper Dahlbäck",
                "namevariations": ["Persuader", "The Presuader"]
            }));
        })
        .await;

    let artist = client(&server).artist(&CallContext::new(), 1).await?;
    mock.assert_async().await;
    assert_eq!(artist.name, "The Persuader");
    assert_eq!(artist.namevariations.len(), 2);
    Ok(())
}

#[tokio::test]
async fn release_is_priced_in_the_configured_currency() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/releases/249504")
                .query_param("curr_abbr", "EUR");
            then.status(200).json_body(json!({
                "id": 249504,
                "title": "Never Gonna Give You Up",
                "year": 1987,
                "artists": [{"id": 72872, "name": "Rick Astley"}]
            }));
        })
        .await;

    let client = Client::new(&Options::new(AGENT).url(server.base_url()).currency("EUR"))?;
    let release = client.release(&CallContext::new(), 249504).await?;
    mock.assert_async().await;
    assert_eq!(release.year, 1987);
    assert_eq!(release.artists[0].name, "Rick Astley");
    Ok(())
}

#[tokio::test]
async fn release_statistics_use_currency_too() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/marketplace/stats/249504")
                .query_param("curr_abbr", "USD");
            then.status(200).json_body(json!({
                "lowest_price": {"currency": "USD", "value": 2.09},
                "num_for_sale": 26,
                "blocked_from_sale": false
            }));
        })
        .await;

    let stats = client(&server)
        .release_statistics(&CallContext::new(), 249504)
        .await?;
    mock.assert_async().await;
    assert_eq!(stats.num_for_sale, Some(26));
    assert!(!stats.blocked_from_sale);
    Ok(())
}

#[tokio::test]
async fn status_codes_map_to_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/artists/401");
            then.status(401).json_body(json!({"message": "You must authenticate"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/artists/404");
            then.status(404).json_body(json!({"message": "Artist not found."}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/artists/502");
            then.status(502);
        })
        .await;

    let client = client(&server);
    let ctx = CallContext::new();

    let err = client.artist(&ctx, 401).await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized));

    let err = client.artist(&ctx, 404).await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 404, .. }));
    assert_eq!(err.code(), "unexpected_status");

    let err = client.artist(&ctx, 502).await.unwrap_err();
    assert_eq!(err.code(), "upstream_error");
    assert!(err.is_retriable());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/labels/1");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = client(&server)
        .label(&CallContext::new(), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert_eq!(err.code(), "malformed_response");
}

#[test]
fn invalid_options_fail_before_any_call() {
    let err = Client::new(&Options::new("")).unwrap_err();
    assert!(matches!(err, Error::InvalidUserAgent));

    let err = Client::new(&Options::new(AGENT).currency("BTC")).unwrap_err();
    assert!(matches!(err, Error::CurrencyNotSupported(code) if code == "BTC"));

    let err = Client::new(&Options::new(AGENT).url("ftp://example.com")).unwrap_err();
    assert!(err.is_invalid_input());
}

#[tokio::test]
async fn wantlist_writes_use_expected_verbs() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let add = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/users/digger/wants/1867708")
                .header("content-type", "application/json; charset=UTF-8")
                .json_body(json!({"notes": "first press", "rating": 5}));
            then.status(201).json_body(json!({"id": 1867708, "rating": 5}));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/users/digger/wants/1867708")
                .json_body(json!({"notes": "any press"}));
            then.status(200).json_body(json!({"id": 1867708}));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/users/digger/wants/1867708");
            then.status(204);
        })
        .await;

    let client = client(&server);
    let ctx = CallContext::new();
    let mut item = WantlistItem::new(1867708).with_notes("first press");
    item.rating = Some(5);
    client.add_wantlist_item(&ctx, "digger", &item).await?;

    let item = WantlistItem::new(1867708).with_notes("any press");
    client.update_wantlist_item(&ctx, "digger", &item).await?;
    client.delete_wantlist_item(&ctx, "digger", &item).await?;

    add.assert_async().await;
    update.assert_async().await;
    delete.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn wantlist_add_requires_created() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/users/digger/wants/1");
            then.status(200).json_body(json!({"id": 1}));
        })
        .await;

    let err = client(&server)
        .add_wantlist_item(&CallContext::new(), "digger", &WantlistItem::new(1))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 200, .. }));
}

#[tokio::test]
async fn collection_folders_require_a_username() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/digger/collection/folders");
            then.status(200).json_body(json!({
                "folders": [
                    {"id": 0, "name": "All", "count": 23, "resource_url": ""},
                    {"id": 1, "name": "Uncategorized", "count": 20, "resource_url": ""}
                ]
            }));
        })
        .await;

    let client = client(&server);
    let ctx = CallContext::new();
    let folders = client.collection_folders(&ctx, "digger").await?;
    mock.assert_async().await;
    assert_eq!(folders.folders.len(), 2);
    assert_eq!(folders.folders[0].count, 23);

    let err = client.collection_folders(&ctx, "").await.unwrap_err();
    assert!(matches!(err, Error::InvalidUsername));
    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn search_forwards_filters() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/database/search")
                .query_param("q", "nirvana")
                .query_param("type", "release")
                .query_param("per_page", "5");
            then.status(200).json_body(json!({
                "pagination": {"page": 1, "pages": 40, "per_page": 5, "items": 200},
                "results": [{"id": 2028757, "type": "release", "title": "Nirvana - Nevermind"}]
            }));
        })
        .await;

    let mut request = SearchRequest::query("nirvana");
    request.kind = Some(SearchType::Release);
    request.per_page = Some(5);
    let found = client(&server)
        .search(&CallContext::new(), &request)
        .await?;
    mock.assert_async().await;
    assert_eq!(found.pagination.total_items, 200);
    assert_eq!(found.results[0].kind, "release");
    Ok(())
}

#[tokio::test]
async fn search_without_filters_is_passed_through() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/database/search");
            then.status(200).json_body(json!({
                "pagination": {"page": 1, "pages": 0, "per_page": 50, "items": 0},
                "results": []
            }));
        })
        .await;

    let found = client(&server)
        .search(&CallContext::new(), &SearchRequest::default())
        .await?;
    mock.assert_hits_async(1).await;
    assert!(found.results.is_empty());
    Ok(())
}

#[tokio::test]
async fn factory_wraps_with_the_configured_limiter() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/masters/1000");
            then.status(200)
                .header("x-discogs-ratelimit", "60")
                .header("x-discogs-ratelimit-used", "12")
                .header("x-discogs-ratelimit-remaining", "48")
                .json_body(json!({"id": 1000, "title": "Stardiver"}));
        })
        .await;

    let limiter = Arc::new(RateLimiter::new());
    let options = Options::new(AGENT)
        .url(server.base_url())
        .rate_limit(limiter.clone());
    let discogs = discogs_client::new(&options)?;
    let master = discogs.master(&CallContext::new(), 1000).await?;
    assert_eq!(master.title, "Stardiver");
    assert_eq!(limiter.state(), Some(QuotaSnapshot::new(60, 12, 48)));
    Ok(())
}

#[tokio::test]
async fn rate_limited_factory_offers_complete_wantlist() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users/digger/wants")
                .query_param("page", "1");
            then.status(200)
                .header("x-discogs-ratelimit", "60")
                .header("x-discogs-ratelimit-used", "1")
                .header("x-discogs-ratelimit-remaining", "59")
                .json_body(json!({
                    "pagination": {"page": 1, "pages": 1, "per_page": 100, "items": 2},
                    "wants": [{"id": 1, "notes": ""}, {"id": 2, "notes": ""}]
                }));
        })
        .await;

    let limiter = Arc::new(RateLimiter::new());
    let options = Options::new(AGENT)
        .url(server.base_url())
        .rate_limit(limiter.clone());
    let discogs = discogs_client::new_rate_limited(&options)?;
    let list = discogs
        .complete_wantlist(&CallContext::new(), "digger")
        .await?;
    mock.assert_async().await;
    assert_eq!(list.wants.len(), 2);
    assert_eq!(list.pagination.total_items, 2);
    assert_eq!(limiter.state(), Some(QuotaSnapshot::new(60, 1, 59)));
    Ok(())
}

#[test]
fn rate_limited_factory_requires_a_limiter() {
    let err = discogs_client::new_rate_limited(&Options::new(AGENT)).unwrap_err();
    assert!(err.is_invalid_input());
}
