//! # srcom - a typed client for the speedrun.com API
//!
//! `srcom` wraps the public REST API at `https://www.speedrun.com/api/v1`:
//! serde models for its resources, typed query builders, and a small
//! retrying executor that every endpoint goes through.
//!
//! ## Quick Start
//!
//! ```no_run
//! use srcom::query::{GameQuery, LeaderboardQuery};
//! use srcom::{Client, Configuration};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), srcom::Error> {
//!     let client = Client::new(Configuration::default())?;
//!
//!     let games = client.games().list(&GameQuery::named("super mario 64"), &[]).await?;
//!     for game in &games.data {
//!         println!("{} ({})", game.names.international, game.abbreviation);
//!     }
//!
//!     let board = client
//!         .leaderboards()
//!         .full_game("sm64", "120_Star", &LeaderboardQuery::default(), &[])
//!         .await?;
//!     println!("{} ranked runs", board.runs.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Retries
//!
//! A call makes at most [`Configuration::max_retries`] attempts. Rate limiting
//! (429), network failures and undecodable bodies are retried after 1s, 2s,
//! 4s, ...; authentication failures and other HTTP errors are returned
//! immediately. When every attempt fails, the error from the last one is
//! returned.
//!
//! ```no_run
//! use srcom::{Backoff, Client, Configuration, Error};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Error> {
//! let config = Configuration::builder()
//!     .api_key(std::env::var("SPEEDRUN_API_KEY").unwrap_or_default())
//!     .max_retries(5)
//!     .backoff(Backoff::exponential(Duration::from_millis(500)))
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//! let client = Client::new(config)?;
//!
//! match client.profile().get().await {
//!     Ok(me) => println!("signed in as {}", me.names.international),
//!     Err(Error::AuthenticationRequired) => eprintln!("set SPEEDRUN_API_KEY first"),
//!     Err(Error::RateLimitExceeded { rate_limit }) => {
//!         eprintln!("still rate limited, server suggests {:?}", rate_limit.suggested_wait());
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Everything is reported through `tracing`. With
//! [`ConfigurationBuilder::debug_logging`] enabled, full request and response
//! dumps (API key redacted) are emitted at `INFO` under the `srcom::dump`
//! target.

pub mod api;
mod client;
mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod query;
pub mod rate_limit;
pub mod request;
mod response;
pub mod retry;
pub mod transport;
pub mod validate;

pub use client::{Client, DUMP_TARGET};
pub use config::{Configuration, ConfigurationBuilder, DEFAULT_BASE_URL};
pub use error::{ApiErrorBody, Error, Result};
pub use response::Response;
pub use retry::Backoff;
pub use transport::{RawResponse, ReqwestTransport, Transport};
