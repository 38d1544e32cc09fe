//! One thin view over [`Client`](crate::Client) per resource family.
//!
//! Sections own nothing: each borrows the client, assembles a path and query,
//! and unwraps the `{"data": ...}` envelope of the result.

mod categories;
mod games;
mod leaderboards;
mod resources;
mod runs;
mod series;
mod users;

pub use categories::{CategoriesApi, LevelsApi, VariablesApi};
pub use games::GamesApi;
pub use leaderboards::LeaderboardsApi;
pub use resources::{NamedResourcesApi, PlatformsApi, RegionsApi};
pub use runs::RunsApi;
pub use series::SeriesApi;
pub use users::{ProfileApi, UsersApi};

use std::borrow::Cow;

/// Escapes the characters that would change the meaning of a path segment.
///
/// Everything else (spaces, non-ASCII) is percent-encoded by URL parsing.
/// Dot segments cannot be escaped and are rejected when the request is built.
pub(crate) fn segment(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['%', '/', '\\', '?', '#']) {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '/' => escaped.push_str("%2F"),
            '\\' => escaped.push_str("%5C"),
            '?' => escaped.push_str("%3F"),
            '#' => escaped.push_str("%23"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
