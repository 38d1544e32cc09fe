//! Error types for speedrun.com API calls.
//!
//! The taxonomy is flat and closed: every failure a call can produce is one of
//! the [`Error`] variants below. Transient classes ([`Error::RateLimitExceeded`],
//! [`Error::Network`], [`Error::Decoding`]) are retried by the client before they
//! reach the caller; everything else is surfaced on first occurrence.

use crate::models::Link;
use crate::rate_limit::RateLimitInfo;
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// A boxed, thread-safe error produced by a [`Transport`](crate::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for speedrun.com API calls.
///
/// # Examples
///
/// ```no_run
/// use srcom::{Client, Configuration, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new(Configuration::default())?;
///
/// match client.games().get("sm64", &[]).await {
///     Ok(game) => println!("{}", game.names.international),
///     Err(Error::Api(body)) => eprintln!("API said {}: {}", body.status, body.message),
///     Err(Error::Decoding { message, raw_response }) => {
///         eprintln!("Schema mismatch: {message}");
///         eprintln!("Body was: {raw_response}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The endpoint path and query could not be assembled into a valid URL.
    ///
    /// This is the only error raised before any network activity.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The endpoint requires authentication and no API key was sent (HTTP 401).
    #[error("Authentication required. Please provide an API key.")]
    AuthenticationRequired,

    /// The API key was rejected (HTTP 403).
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The server rate-limited the request (HTTP 429).
    ///
    /// `rate_limit` carries whatever hints the server sent along with the
    /// response. They are informational; the retry schedule is not changed.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimitExceeded {
        /// Rate limit headers parsed from the 429 response.
        rate_limit: RateLimitInfo,
    },

    /// The server returned a non-2xx status whose body was not a structured
    /// API error.
    #[error("HTTP error {}: {}", status.as_u16(), message.as_deref().unwrap_or("No message"))]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The response body as text, if there was one
        message: Option<String>,
    },

    /// The server returned a structured error body.
    #[error("API error: {}", .0.message)]
    Api(ApiErrorBody),

    /// The request never produced an HTTP response (connection refused, DNS
    /// failure, timeout, truncated body, ...).
    #[error("Network error: {0}")]
    Network(BoxError),

    /// The response body could not be decoded into the expected shape.
    ///
    /// Both the decoder's message and the raw body are preserved so schema
    /// drift can be diagnosed from logs.
    #[error("Decoding error: {message}")]
    Decoding {
        /// What the decoder complained about
        message: String,
        /// The raw response body that failed to decode
        raw_response: String,
    },

    /// Anything outside the classes above.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl Error {
    /// Returns `true` if the failure is plausibly transient and the client
    /// should try the call again.
    ///
    /// # Examples
    ///
    /// ```
    /// use srcom::Error;
    /// use http::StatusCode;
    ///
    /// assert!(Error::Network("connection reset".into()).is_retryable());
    /// assert!(!Error::AuthenticationRequired.is_retryable());
    ///
    /// let err = Error::HttpError {
    ///     status: StatusCode::INTERNAL_SERVER_ERROR,
    ///     message: Some("oops".into()),
    /// };
    /// assert!(!err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RateLimitExceeded { .. } => true,
            Error::Network(_) => true,
            Error::Decoding { .. } => true,
            Error::InvalidUrl(_) => false,
            Error::AuthenticationRequired => false,
            Error::InvalidApiKey => false,
            Error::HttpError { .. } => false,
            Error::Api(_) => false,
            Error::Unknown(_) => false,
        }
    }

    /// Returns the HTTP status code implied by this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::AuthenticationRequired => Some(StatusCode::UNAUTHORIZED),
            Error::InvalidApiKey => Some(StatusCode::FORBIDDEN),
            Error::RateLimitExceeded { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            Error::HttpError { status, .. } => Some(*status),
            Error::Api(body) => StatusCode::from_u16(body.status).ok(),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { message, .. } => message.as_deref(),
            Error::Decoding { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns rate limit information if this is a 429.
    pub fn rate_limit_info(&self) -> Option<&RateLimitInfo> {
        match self {
            Error::RateLimitExceeded { rate_limit } => Some(rate_limit),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(Box::new(err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}

/// Structured error body returned by the API on failed requests.
///
/// ```json
/// {
///   "status": 404,
///   "message": "The requested resource could not be found.",
///   "links": [{ "rel": "support", "uri": "https://github.com/speedruncomorg/api/issues" }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// HTTP status code echoed in the body
    pub status: u16,
    /// Human-readable error message
    pub message: String,
    /// Individual validation errors, when the API reports them
    #[serde(default)]
    pub errors: Option<Vec<String>>,
    /// Links for support or issue reporting
    #[serde(default)]
    pub links: Option<Vec<Link>>,
}

/// A specialized `Result` type for speedrun.com API calls.
pub type Result<T> = std::result::Result<T, Error>;
