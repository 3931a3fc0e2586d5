use crate::error::{Error, Result};
use crate::ratelimit::RateLimiter;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.discogs.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Currencies the marketplace endpoints can price in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[default]
    Usd,
    Gbp,
    Eur,
    Cad,
    Aud,
    Jpy,
    Chf,
    Mxn,
    Brl,
    Nzd,
    Sek,
    Zar,
}

impl Currency {
    pub const ALL: [Currency; 12] = [
        Currency::Usd,
        Currency::Gbp,
        Currency::Eur,
        Currency::Cad,
        Currency::Aud,
        Currency::Jpy,
        Currency::Chf,
        Currency::Mxn,
        Currency::Brl,
        Currency::Nzd,
        Currency::Sek,
        Currency::Zar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Jpy => "JPY",
            Currency::Chf => "CHF",
            Currency::Mxn => "MXN",
            Currency::Brl => "BRL",
            Currency::Nzd => "NZD",
            Currency::Sek => "SEK",
            Currency::Zar => "ZAR",
        }
    }
}

impl FromStr for Currency {
    type Err = Error;

    /// An empty code selects the default (USD).
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Currency::default());
        }
        Currency::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::CurrencyNotSupported(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction options for a client.
///
/// Nothing is validated until the options are handed to
/// [`Client::new`](crate::Client::new) or [`crate::new`].
#[derive(Clone)]
pub struct Options {
    /// API endpoint; `https://api.discogs.com` when unset.
    pub url: Option<String>,
    /// Marketplace currency code; USD when unset or empty.
    pub currency: Option<String>,
    /// Required by the service on every request.
    pub user_agent: String,
    /// Personal access token; needed by search and user-private data.
    pub token: Option<String>,
    /// HTTP client to reuse instead of building one.
    pub http_client: Option<reqwest::Client>,
    /// When present, every operation goes through this limiter.
    pub rate_limit: Option<Arc<RateLimiter>>,
    /// Request timeout for the client built when `http_client` is unset.
    pub timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            url: None,
            currency: None,
            user_agent: String::new(),
            token: None,
            http_client: None,
            rate_limit: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("url", &self.url)
            .field("currency", &self.currency)
            .field("user_agent", &self.user_agent)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("http_client", &self.http_client.is_some())
            .field("rate_limit", &self.rate_limit.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Options {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn rate_limit(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.rate_limit = Some(limiter);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load options from the environment.
    ///
    /// Env vars:
    /// - DISCOGS_USER_AGENT (default: discogs-client/<version>)
    /// - DISCOGS_TOKEN (optional)
    /// - DISCOGS_API_URL (default: https://api.discogs.com)
    /// - DISCOGS_CURRENCY (default: USD)
    /// - DISCOGS_HTTP_TIMEOUT_SECS (default: 30)
    /// - DISCOGS_RATE_LIMIT (default: on; `0`, `false` or `off` disables)
    pub fn from_env() -> Result<Self> {
        let user_agent = env::var("DISCOGS_USER_AGENT")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("discogs-client/{}", env!("CARGO_PKG_VERSION")));
        let token = env::var("DISCOGS_TOKEN").ok().filter(|s| !s.is_empty());
        let url = env::var("DISCOGS_API_URL").ok().filter(|s| !s.is_empty());
        let currency = env::var("DISCOGS_CURRENCY").ok();
        let timeout_secs = match env::var("DISCOGS_HTTP_TIMEOUT_SECS") {
            Ok(s) => s.parse::<u64>().map_err(|_| {
                Error::InvalidInput(format!("DISCOGS_HTTP_TIMEOUT_SECS is not a number: {}", s))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        let rate_limit = match env::var("DISCOGS_RATE_LIMIT") {
            Ok(s) => !matches!(s.to_ascii_lowercase().as_str(), "0" | "false" | "off"),
            Err(_) => true,
        };

        Ok(Self {
            url,
            currency,
            user_agent,
            token,
            http_client: None,
            rate_limit: rate_limit.then(|| Arc::new(RateLimiter::new())),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_allow_list() {
        for c in Currency::ALL {
            assert_eq!(c.as_str().parse::<Currency>().unwrap(), c);
        }
        assert_eq!("".parse::<Currency>().unwrap(), Currency::Usd);
        assert!(matches!(
            "usd".parse::<Currency>(),
            Err(Error::CurrencyNotSupported(_))
        ));
        assert!(matches!(
            "BTC".parse::<Currency>(),
            Err(Error::CurrencyNotSupported(code)) if code == "BTC"
        ));
    }

    #[test]
    fn debug_hides_token() {
        let o = Options::new("agent").token("secret");
        let printed = format!("{:?}", o);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn builder_sets_fields() {
        let o = Options::new("agent/1.0")
            .url("http://localhost:1234")
            .currency("EUR")
            .timeout(Duration::from_secs(5))
            .rate_limit(Arc::new(RateLimiter::new()));
        assert_eq!(o.user_agent, "agent/1.0");
        assert_eq!(o.url.as_deref(), Some("http://localhost:1234"));
        assert_eq!(o.currency.as_deref(), Some("EUR"));
        assert_eq!(o.timeout, Duration::from_secs(5));
        assert!(o.rate_limit.is_some());
        assert!(o.token.is_none());
    }
}
