use crate::context::CallContext;
use crate::error::{Error, Result};
use crate::types::QuotaSnapshot;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Calls allowed in a one-minute window.
pub const RATELIMIT_TOTAL: &str = "x-discogs-ratelimit";
/// Calls made in the current window.
pub const RATELIMIT_USED: &str = "x-discogs-ratelimit-used";
/// Calls left in the current window.
pub const RATELIMIT_REMAINING: &str = "x-discogs-ratelimit-remaining";

/// One logical remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub query: Vec<(String, String)>,
    pub payload: Option<Value>,
    /// The only status treated as success for this call.
    pub success: StatusCode,
}

impl Request {
    pub fn new(method: Method, url: Url, success: StatusCode) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            payload: None,
            success,
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url, StatusCode::OK)
    }

    pub fn with_query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Executes a single request. Implementations must report the quota
/// counters of every response they receive through `ctx`, and must not
/// retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns the decoded body, or `None` when the response had none.
    async fn execute(&self, ctx: &CallContext, request: Request) -> Result<Option<Value>>;
}

/// Default transport on top of a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    headers: HeaderMap,
}

impl HttpTransport {
    pub fn new(client: Client, user_agent: &str, token: Option<&str>) -> Result<Self> {
        Ok(Self {
            client,
            headers: request_headers(user_agent, token)?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, ctx: &CallContext, request: Request) -> Result<Option<Value>> {
        ctx.check()?;
        let Request {
            method,
            url,
            query,
            payload,
            success,
        } = request;

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .headers(self.headers.clone());
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = &payload {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("{} {} failed to send: {}", method, url, e);
            Error::Http(e)
        })?;

        let status = response.status();
        if let Some(quota) = extract_quota(response.headers()) {
            ctx.report_quota(quota);
        }
        debug!("{} {} -> {}", method, url, status);

        if status != success {
            return Err(map_status_to_error(status));
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

pub fn build_client(timeout: Duration) -> Result<Client> {
    let builder = Client::builder().timeout(timeout).use_rustls_tls();
    Ok(builder.build()?)
}

/// Fixed headers sent with every request.
pub fn request_headers(user_agent: &str, token: Option<&str>) -> Result<HeaderMap> {
    if user_agent.trim().is_empty() {
        return Err(Error::InvalidUserAgent);
    }
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).map_err(|_| Error::InvalidUserAgent)?,
    );
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=UTF-8"),
    );
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        let value = HeaderValue::from_str(&format!("Discogs token={}", token))
            .map_err(|_| Error::InvalidInput("token is not a valid header value".into()))?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

pub fn map_status_to_error(status: StatusCode) -> Error {
    Error::from_status(status)
}

/// Quota counters of a response; `None` unless all three are present and
/// numeric.
pub fn extract_quota(headers: &HeaderMap) -> Option<QuotaSnapshot> {
    let read = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<i64>().ok())
    };
    Some(QuotaSnapshot {
        total: read(RATELIMIT_TOTAL)?,
        used: read(RATELIMIT_USED)?,
        remaining: read(RATELIMIT_REMAINING)?,
    })
}

/// Percent-encode a value for use as a single path segment.
pub fn encode_path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
