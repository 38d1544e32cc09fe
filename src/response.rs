//! Successful call results.

use crate::models::{Data, Paginated, Pagination};
use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A decoded response together with what the transport saw.
///
/// Section methods usually hand back just the resource; call
/// [`Client::call`](crate::Client::call) directly when the status, headers or
/// raw body matter.
///
/// # Examples
///
/// ```no_run
/// use srcom::models::{Data, Game};
/// use srcom::{Client, Configuration};
///
/// # async fn example() -> Result<(), srcom::Error> {
/// let client = Client::new(Configuration::default())?;
/// let response = client.get::<Data<Game>>("/games/sm64").await?;
///
/// println!("{} after {} attempt(s)", response.status, response.attempts);
/// println!("took {:?}", response.latency);
/// let game = response.into_inner();
/// println!("{}", game.names.international);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub data: T,

    /// The body exactly as received (lossily decoded as UTF-8).
    pub raw_body: String,

    pub status: StatusCode,

    pub headers: HeaderMap,

    /// Time from the first attempt until the successful response, backoff
    /// delays included.
    pub latency: Duration,

    /// Attempts made, `1` when the first one succeeded.
    pub attempts: usize,
}

impl<T> Response<T> {
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
        attempts: usize,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            headers,
            latency,
            attempts,
        }
    }

    /// Transforms the data, keeping the transport details.
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
            attempts: self.attempts,
        }
    }

    /// `true` if transient failures had to be retried.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    /// A header value as text, if present and printable.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl<T> Response<Data<T>> {
    /// Strips the `{"data": ...}` envelope.
    pub fn into_inner(self) -> T {
        self.data.data
    }
}

impl<T> Response<Paginated<T>> {
    /// The pagination block, if the endpoint sent one.
    pub fn pagination(&self) -> Option<&Pagination> {
        self.data.pagination.as_ref()
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
