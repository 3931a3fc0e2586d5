use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a client operation can surface.
///
/// Validation variants are raised before any request leaves the process;
/// everything else comes out of a remote call or the caller's context.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid username")]
    InvalidUsername,

    #[error("invalid user agent")]
    InvalidUserAgent,

    #[error("currency not supported: {0}")]
    CurrencyNotSupported(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("too many requests")]
    TooManyRequests,

    #[error("unexpected response status: {text}")]
    UnexpectedStatus { status: u16, text: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("call cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl Error {
    /// Stable snake_case identifier, suitable for logs and JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidUsername
            | Error::InvalidUserAgent
            | Error::CurrencyNotSupported(_)
            | Error::InvalidInput(_) => "invalid_input",
            Error::Unauthorized => "unauthorized",
            Error::TooManyRequests => "rate_limited",
            Error::UnexpectedStatus { status, .. } if *status >= 500 => "upstream_error",
            Error::UnexpectedStatus { .. } => "unexpected_status",
            Error::Http(_) | Error::Transport(_) => "transport_error",
            Error::Decode(_) => "malformed_response",
            Error::Cancelled => "cancelled",
            Error::DeadlineExceeded => "deadline_exceeded",
        }
    }

    /// Whether a caller may reasonably try the same call again later.
    pub fn is_retriable(&self) -> bool {
        match self {
            Error::TooManyRequests | Error::Http(_) | Error::Transport(_) => true,
            Error::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.code() == "invalid_input"
    }

    pub(crate) fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Error::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => Error::TooManyRequests,
            other => Error::UnexpectedStatus {
                status: other.as_u16(),
                text: other.to_string(),
            },
        }
    }
}
