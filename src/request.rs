//! Request descriptors and construction.
//!
//! An [`Endpoint`] is what a section asks for: method, path and query. Building
//! it against a [`Configuration`] produces an [`HttpRequest`] with the full URL
//! and the standard headers, ready for a [`Transport`](crate::Transport).

use crate::{query::QueryItems, Configuration, Error, Result};
use http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use url::Url;

/// Header carrying the API key.
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// The `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("srcom/", env!("CARGO_PKG_VERSION"));

/// A single API call before it is tied to a base URL.
///
/// # Examples
///
/// ```
/// use srcom::request::Endpoint;
/// use srcom::Configuration;
/// use http::Method;
///
/// let endpoint = Endpoint::get("/leaderboards/sm64/category/120_Star")
///     .with_query_param("top", 10)
///     .with_query_param("var-abc123", "def456")
///     .with_query_param("var-abc123", "ghi789");
///
/// let request = endpoint.build::<()>(&Configuration::default(), None).unwrap();
/// assert_eq!(request.method, Method::GET);
/// assert_eq!(
///     request.url.as_str(),
///     "https://www.speedrun.com/api/v1/leaderboards/sm64/category/120_Star\
///      ?top=10&var-abc123=def456&var-abc123=ghi789"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// The HTTP method.
    pub method: Method,

    /// Path relative to the base URL, e.g. `/games/sm64`.
    pub path: String,

    /// Query parameters in the order they will be sent.
    pub query: QueryItems,
}

impl Endpoint {
    /// An endpoint with no query parameters.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryItems::new(),
        }
    }

    /// A `GET` endpoint.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Appends one query parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push(key, value);
        self
    }

    /// Replaces the query with `query`.
    pub fn with_query(mut self, query: QueryItems) -> Self {
        self.query = query;
        self
    }

    /// Resolves the endpoint against `config` and attaches `body` as JSON.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidUrl`] if the path and query do not form a valid URL.
    ///   Paths carrying their own `?` or `#` are rejected; use the query
    ///   instead.
    /// * [`Error::InvalidApiKey`] if the configured key is not a valid header
    ///   value.
    /// * [`Error::Unknown`] if `body` fails to serialize.
    pub fn build<B>(&self, config: &Configuration, body: Option<&B>) -> Result<HttpRequest>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(config.base_url())?;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        if let Some(key) = config.api_key() {
            let value = HeaderValue::from_str(key).map_err(|_| Error::InvalidApiKey)?;
            headers.insert(API_KEY_HEADER, value);
        }

        let body = match body {
            Some(body) => {
                let bytes = serde_json::to_vec(body).map_err(|e| {
                    Error::Unknown(format!("Failed to serialize request body: {e}"))
                })?;
                headers.insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                Some(bytes)
            }
            None => None,
        };

        Ok(HttpRequest {
            method: self.method.clone(),
            url,
            headers,
            body,
        })
    }

    fn url(&self, base_url: &Url) -> Result<Url> {
        if self.path.contains(['?', '#']) {
            return Err(Error::InvalidUrl(format!(
                "path {:?} must not contain a query or fragment",
                self.path
            )));
        }
        // URL parsing would resolve these away and hit a different endpoint.
        if self.path.split('/').any(is_dot_segment) {
            return Err(Error::InvalidUrl(format!(
                "path {:?} must not contain `.` or `..` segments",
                self.path
            )));
        }

        let base = base_url.as_str().trim_end_matches('/');
        let separator = if self.path.starts_with('/') { "" } else { "/" };
        let mut url = Url::parse(&format!("{base}{separator}{}", self.path))?;

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | "%2e%2e" | ".%2e" | "%2e."
    )
}

/// A fully-formed request, owned by the call that built it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Serialized JSON body.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Multi-line dump for diagnostics, with the API key redacted.
    pub fn dump(&self) -> String {
        let mut out = format!("{} {}\n", self.method, self.url);
        out.push_str(&dump_headers(&self.headers));
        if let Some(body) = &self.body {
            out.push('\n');
            out.push_str(&String::from_utf8_lossy(body));
        }
        out
    }
}

pub(crate) fn dump_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if *name == API_KEY_HEADER {
                "<redacted>"
            } else {
                value.to_str().unwrap_or("<binary>")
            };
            format!("{name}: {value}\n")
        })
        .collect()
}
