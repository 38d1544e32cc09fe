//! The retrying executor.
//!
//! [`Client`] turns an [`Endpoint`] into a request once, then sends it up to
//! `max_retries` times. Transient failures (see [`Error::is_retryable`]) are
//! retried after an exponential backoff; everything else is returned on first
//! sight. When attempts run out, the last error is returned as-is.

use crate::api::{
    CategoriesApi, GamesApi, LeaderboardsApi, LevelsApi, NamedResourcesApi, PlatformsApi,
    ProfileApi, RegionsApi, RunsApi, SeriesApi, UsersApi, VariablesApi,
};
use crate::query::QueryItems;
use crate::request::{Endpoint, HttpRequest};
use crate::transport::{RawResponse, ReqwestTransport, Transport};
use crate::{validate, Configuration, Error, Response, Result};
use http::Method;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Target for full request/response dumps when debug logging is on.
pub const DUMP_TARGET: &str = "srcom::dump";

/// A speedrun.com API client.
///
/// Cloning is cheap; clones share the configuration and connection pool.
/// Calls are independent of each other and may run concurrently.
///
/// # Examples
///
/// ```no_run
/// use srcom::query::{GameQuery, LeaderboardQuery};
/// use srcom::{Client, Configuration};
///
/// # async fn example() -> Result<(), srcom::Error> {
/// let client = Client::new(Configuration::default())?;
///
/// let games = client.games().list(&GameQuery::named("mario 64"), &[]).await?;
/// let sm64 = &games.data[0];
///
/// let board = client
///     .leaderboards()
///     .full_game(&sm64.id, "120_Star", &LeaderboardQuery::default(), &[])
///     .await?;
/// for entry in board.runs.iter().take(3) {
///     println!("{}. {}", entry.place, entry.run.times.primary);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: Configuration,
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.config.base_url().as_str())
            .field("authenticated", &self.inner.config.api_key().is_some())
            .finish()
    }
}

impl Client {
    /// Creates a client backed by `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unknown`] if the HTTP client cannot be created.
    pub fn new(config: Configuration) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client that sends requests through `transport`.
    pub fn with_transport(config: Configuration, transport: impl Transport + 'static) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                transport: Box::new(transport),
            }),
        }
    }

    /// The configuration this client was built with.
    pub fn configuration(&self) -> &Configuration {
        &self.inner.config
    }

    /// Executes `endpoint`, retrying transient failures.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidUrl`] or [`Error::Unknown`] (unserializable body)
    ///   before anything is sent.
    /// * [`Error::AuthenticationRequired`], [`Error::InvalidApiKey`],
    ///   [`Error::HttpError`] and [`Error::Api`] as soon as they occur.
    /// * [`Error::RateLimitExceeded`], [`Error::Network`] or
    ///   [`Error::Decoding`] from the last attempt once every attempt has
    ///   failed.
    pub async fn call<Req, Res>(
        &self,
        endpoint: Endpoint,
        body: Option<&Req>,
    ) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let config = &self.inner.config;
        let request = endpoint.build(config, body)?;
        let max_attempts = config.max_retries().max(1);
        let start_time = Instant::now();
        let mut last_error = None;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let delay = config.backoff().delay_for_attempt(attempt);
                tracing::info!(
                    delay_ms = delay.as_millis() as u64,
                    attempt = attempt + 1,
                    method = %request.method,
                    url = %request.url,
                    "Retrying request after delay"
                );
                tokio::time::sleep(delay).await;
            }

            match self.attempt::<Res>(&request, attempt + 1).await {
                Ok((data, raw)) => {
                    return Ok(Response::new(
                        data,
                        raw.text(),
                        raw.status,
                        raw.headers,
                        start_time.elapsed(),
                        attempt + 1,
                    ));
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        method = %request.method,
                        url = %request.url,
                        "Request failed"
                    );

                    if !e.is_retryable() {
                        return Err(e);
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Unknown("no attempt was made".to_string())))
    }

    /// One send, classify and decode cycle.
    async fn attempt<Res>(
        &self,
        request: &HttpRequest,
        attempt: usize,
    ) -> Result<(Res, RawResponse)>
    where
        Res: DeserializeOwned,
    {
        let debug_logging = self.inner.config.debug_logging();

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            attempt = attempt,
            "Executing HTTP request"
        );
        if debug_logging {
            tracing::info!(target: DUMP_TARGET, attempt = attempt, "request\n{}", request.dump());
        }

        let sent_at = Instant::now();
        let raw = self
            .inner
            .transport
            .send(request)
            .await
            .map_err(Error::Network)?;

        tracing::debug!(
            status = raw.status.as_u16(),
            latency_ms = sent_at.elapsed().as_millis() as u64,
            attempt = attempt,
            "Received HTTP response"
        );
        if debug_logging {
            tracing::info!(target: DUMP_TARGET, attempt = attempt, "response\n{}", raw.dump());
        }

        validate::classify(&raw)?;
        let data = validate::decode(&raw.body)?;
        Ok((data, raw))
    }

    /// `GET path`.
    pub async fn get<Res>(&self, path: impl Into<String>) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        self.call::<(), Res>(Endpoint::get(path), None).await
    }

    /// `GET path?query`.
    pub async fn get_with_query<Res>(
        &self,
        path: impl Into<String>,
        query: QueryItems,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        self.call::<(), Res>(Endpoint::get(path).with_query(query), None).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<Req, Res>(&self, path: impl Into<String>, body: &Req) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.call(Endpoint::new(Method::POST, path), Some(body)).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<Req, Res>(&self, path: impl Into<String>, body: &Req) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.call(Endpoint::new(Method::PUT, path), Some(body)).await
    }

    /// `DELETE path`.
    pub async fn delete<Res>(&self, path: impl Into<String>) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        self.call::<(), Res>(Endpoint::new(Method::DELETE, path), None).await
    }

    /// `/games`: listing, lookup and per-game sub-resources.
    pub fn games(&self) -> GamesApi<'_> {
        GamesApi::new(self)
    }

    /// `/categories/{id}`: categories and their variables and records.
    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self)
    }

    /// `/levels/{id}`: individual levels and their categories.
    pub fn levels(&self) -> LevelsApi<'_> {
        LevelsApi::new(self)
    }

    /// `/variables/{id}`.
    pub fn variables(&self) -> VariablesApi<'_> {
        VariablesApi::new(self)
    }

    /// `/runs`: lookup, submission and moderation.
    pub fn runs(&self) -> RunsApi<'_> {
        RunsApi::new(self)
    }

    /// `/users` and `/guests`.
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    /// Full-game and individual-level leaderboards.
    pub fn leaderboards(&self) -> LeaderboardsApi<'_> {
        LeaderboardsApi::new(self)
    }

    /// `/series`: listing, lookup and member games.
    pub fn series(&self) -> SeriesApi<'_> {
        SeriesApi::new(self)
    }

    /// `/platforms`.
    pub fn platforms(&self) -> PlatformsApi<'_> {
        PlatformsApi::new(self)
    }

    /// `/regions`.
    pub fn regions(&self) -> RegionsApi<'_> {
        RegionsApi::new(self)
    }

    /// `/genres`.
    pub fn genres(&self) -> NamedResourcesApi<'_> {
        NamedResourcesApi::new(self, "genres")
    }

    /// `/engines`.
    pub fn engines(&self) -> NamedResourcesApi<'_> {
        NamedResourcesApi::new(self, "engines")
    }

    /// `/developers`.
    pub fn developers(&self) -> NamedResourcesApi<'_> {
        NamedResourcesApi::new(self, "developers")
    }

    /// `/publishers`.
    pub fn publishers(&self) -> NamedResourcesApi<'_> {
        NamedResourcesApi::new(self, "publishers")
    }

    /// `/gametypes`.
    pub fn gametypes(&self) -> NamedResourcesApi<'_> {
        NamedResourcesApi::new(self, "gametypes")
    }

    /// Endpoints for the account behind the configured API key.
    pub fn profile(&self) -> ProfileApi<'_> {
        ProfileApi::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::models::Data;
    use crate::Backoff;
    use async_trait::async_trait;
    use http::{HeaderMap, StatusCode};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Replays canned outcomes in order and counts sends.
    struct Scripted {
        outcomes: Mutex<VecDeque<std::result::Result<(u16, &'static str), &'static str>>>,
        sends: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn new(
            outcomes: Vec<std::result::Result<(u16, &'static str), &'static str>>,
        ) -> (Self, Arc<AtomicUsize>) {
            let sends = Arc::new(AtomicUsize::new(0));
            let transport = Self {
                outcomes: Mutex::new(outcomes.into()),
                sends: Arc::clone(&sends),
            };
            (transport, sends)
        }
    }

    #[async_trait]
    impl Transport for Scripted {
        async fn send(&self, _request: &HttpRequest) -> std::result::Result<RawResponse, BoxError> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            let next = self.outcomes.lock().unwrap().pop_front();
            match next {
                Some(Ok((status, body))) => Ok(RawResponse {
                    status: StatusCode::from_u16(status).unwrap(),
                    headers: HeaderMap::new(),
                    body: body.as_bytes().to_vec(),
                }),
                Some(Err(message)) => Err(message.into()),
                None => Err("script exhausted".into()),
            }
        }
    }

    fn fast_config(max_retries: usize) -> Configuration {
        Configuration::builder()
            .max_retries(max_retries)
            .backoff(Backoff::exponential(Duration::from_millis(1)))
            .build()
            .unwrap()
    }

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Thing {
        id: String,
    }

    #[tokio::test]
    async fn network_errors_then_success() {
        let (transport, sends) = Scripted::new(vec![
            Err("connection reset"),
            Err("connection reset"),
            Ok((200, r#"{"data":{"id":"abc"}}"#)),
        ]);
        let client = Client::with_transport(fast_config(3), transport);

        let response = client.get::<Data<Thing>>("/things/abc").await.unwrap();

        assert_eq!(response.attempts, 3);
        assert_eq!(sends.load(Ordering::SeqCst), 3);
        assert_eq!(response.into_inner(), Thing { id: "abc".into() });
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[tokio::test]
    async fn debug_dumps_do_not_change_retries() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("srcom::dump=info"))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (transport, sends) = Scripted::new(vec![
            Err("connection reset"),
            Err("connection reset"),
            Ok((200, r#"{"data":{"id":"abc"}}"#)),
        ]);
        let config = Configuration::builder()
            .max_retries(3)
            .backoff(Backoff::exponential(Duration::from_millis(1)))
            .api_key("secret-key")
            .debug_logging(true)
            .build()
            .unwrap();
        let client = Client::with_transport(config, transport);

        let response = client.get::<Data<Thing>>("/things/abc").await.unwrap();

        assert_eq!(response.attempts, 3);
        assert_eq!(sends.load(Ordering::SeqCst), 3);

        let output = logs.contents();
        assert_eq!(
            output
                .matches("GET https://www.speedrun.com/api/v1/things/abc")
                .count(),
            3,
            "one request dump per attempt:\n{output}"
        );
        assert!(output.contains("x-api-key: <redacted>"), "{output}");
        assert!(!output.contains("secret-key"), "{output}");
        assert!(output.contains(r#"{"data":{"id":"abc"}}"#), "{output}");
    }

    #[tokio::test]
    async fn last_network_error_is_surfaced() {
        let (transport, sends) = Scripted::new(vec![Err("first"), Err("second"), Err("third")]);
        let client = Client::with_transport(fast_config(3), transport);

        let err = client.get::<Data<Thing>>("/things/abc").await.unwrap_err();

        assert_eq!(sends.load(Ordering::SeqCst), 3);
        match err {
            Error::Network(cause) => assert_eq!(cause.to_string(), "third"),
            other => panic!("expected Network, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn decode_failures_are_retried() {
        let (transport, sends) = Scripted::new(vec![
            Ok((200, r#"{"data":{"id":"#)),
            Ok((200, r#"{"data":{"id":"abc"}}"#)),
        ]);
        let client = Client::with_transport(fast_config(3), transport);

        let response = client.get::<Data<Thing>>("/things/abc").await.unwrap();

        assert_eq!(response.attempts, 2);
        assert_eq!(sends.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn terminal_errors_stop_immediately() {
        let (transport, sends) = Scripted::new(vec![
            Ok((404, r#"{"status":404,"message":"not found"}"#)),
            Ok((200, r#"{"data":{"id":"abc"}}"#)),
        ]);
        let client = Client::with_transport(fast_config(3), transport);

        let err = client.get::<Data<Thing>>("/things/abc").await.unwrap_err();

        assert!(matches!(err, Error::Api(ref body) if body.status == 404));
        assert_eq!(sends.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_retries_still_sends_once() {
        let (transport, sends) = Scripted::new(vec![Err("down")]);
        let client = Client::with_transport(fast_config(0), transport);

        let err = client.get::<Data<Thing>>("/things/abc").await.unwrap_err();

        assert!(matches!(err, Error::Network(_)));
        assert_eq!(sends.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_url_never_reaches_the_transport() {
        let (transport, sends) = Scripted::new(vec![]);
        let client = Client::with_transport(fast_config(3), transport);

        let err = client
            .get::<Data<Thing>>("/things?id=abc")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidUrl(_)));
        assert_eq!(sends.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn default_backoff_waits_one_then_two_seconds() {
        let (transport, _) = Scripted::new(vec![
            Err("connection reset"),
            Err("connection reset"),
            Ok((200, r#"{"data":{"id":"abc"}}"#)),
        ]);
        let config = Configuration::builder().max_retries(3).build().unwrap();
        let client = Client::with_transport(config, transport);

        let started = tokio::time::Instant::now();
        let response = client.get::<Data<Thing>>("/things/abc").await.unwrap();

        assert_eq!(response.attempts, 3);
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }
}
