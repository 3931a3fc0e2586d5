use crate::config::{Currency, Options, DEFAULT_API_URL};
use crate::context::CallContext;
use crate::error::{Error, Result};
use crate::http::{self, HttpTransport, Request, Transport};
use crate::ratelimit::{RateLimited, RateLimiter};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Plain client: every service operation is one transport call, with no
/// quota gating. Wrap it with [`Client::rate_limited`] to pace calls.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    base: Url,
    currency: Currency,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base", &self.base.as_str())
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Validate `options` and build a client on the reqwest transport.
    ///
    /// Fails with `InvalidUserAgent`, `CurrencyNotSupported` or
    /// `InvalidInput` (base URL) before anything touches the network.
    pub fn new(options: &Options) -> Result<Self> {
        http::request_headers(&options.user_agent, options.token.as_deref())?;
        let currency = options.currency.as_deref().unwrap_or_default().parse()?;
        let http_client = match &options.http_client {
            Some(client) => client.clone(),
            None => http::build_client(options.timeout)?,
        };
        let transport = HttpTransport::new(
            http_client,
            &options.user_agent,
            options.token.as_deref(),
        )?;
        Self::with_transport(
            Arc::new(transport),
            options.url.as_deref().unwrap_or(DEFAULT_API_URL),
            currency,
        )
    }

    /// Build a client on a custom transport.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        base_url: &str,
        currency: Currency,
    ) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| Error::InvalidInput(format!("invalid base url {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(Error::InvalidInput(format!(
                "base url must be http(s): {}",
                base_url
            )));
        }
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self {
            transport,
            base,
            currency,
        })
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn rate_limited(self, limiter: Arc<RateLimiter>) -> RateLimited<Self> {
        RateLimited::new(self, limiter)
    }

    /// Absolute URL for an already-encoded path below the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        let joined = format!(
            "{}/{}",
            self.base.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }

    pub(crate) async fn send(&self, ctx: &CallContext, request: Request) -> Result<Option<Value>> {
        ctx.run(self.transport.execute(ctx, request)).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<T> {
        let request = Request::get(self.endpoint(path)).with_query(params);
        decode(self.send(ctx, request).await?)
    }
}

fn decode<T: DeserializeOwned>(body: Option<Value>) -> Result<T> {
    Ok(serde_json::from_value(body.unwrap_or(Value::Null))?)
}

/// Encoded path segment for a username; empty names are rejected.
pub(crate) fn user_segment(username: &str) -> Result<String> {
    if username.is_empty() {
        return Err(Error::InvalidUsername);
    }
    Ok(http::encode_path_segment(username))
}
