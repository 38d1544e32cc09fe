//! Query-string building for the API sections.
//!
//! [`QueryItems`] is an ordered list of key/value pairs: insertion order is kept
//! and repeated keys stay separate pairs, which is how the API expects
//! `var-<id>` filters. The typed query structs below append their set fields
//! to it via [`AppendQuery`].

use crate::dates;
use crate::models::TimingMethod;
use chrono::{DateTime, Utc};
use std::fmt;

/// Ordered, duplicate-preserving query parameters.
///
/// # Examples
///
/// ```
/// use srcom::query::QueryItems;
///
/// let mut query = QueryItems::new();
/// query
///     .push("top", 10)
///     .push("var-abc123", "def456")
///     .push("var-abc123", "ghi789")
///     .push_opt("platform", None::<&str>)
///     .embed(&["game", "players"]);
///
/// let pairs: Vec<_> = query.iter().collect();
/// assert_eq!(
///     pairs,
///     [
///         ("top", "10"),
///         ("var-abc123", "def456"),
///         ("var-abc123", "ghi789"),
///         ("embed", "game,players"),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryItems {
    items: Vec<(String, String)>,
}

impl QueryItems {
    /// An empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair, keeping any earlier pair with the same key.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.items.push((key.into(), value.to_string()));
        self
    }

    /// Appends a pair only when `value` is set.
    pub fn push_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Appends the comma-joined `embed` parameter. Nothing is added for an
    /// empty list.
    pub fn embed<E: AsRef<str>>(&mut self, embeds: &[E]) -> &mut Self {
        if !embeds.is_empty() {
            let joined = embeds
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(",");
            self.push("embed", joined);
        }
        self
    }

    /// Appends everything `params` sets.
    pub fn append(&mut self, params: &impl AppendQuery) -> &mut Self {
        params.append_to(self);
        self
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters, counting repeated keys separately.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no parameter has been added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryItems {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut items = QueryItems::new();
        for (key, value) in iter {
            items.push(key, value);
        }
        items
    }
}

impl IntoIterator for QueryItems {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// A set of optional parameters that knows how to write itself into a query.
pub trait AppendQuery {
    fn append_to(&self, query: &mut QueryItems);
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// The value sent on the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(SortDirection { Asc => "asc", Desc => "desc" });

wire_enum!(GameOrderBy {
    NameInternational => "name.int",
    NameJapanese => "name.jap",
    Abbreviation => "abbreviation",
    Released => "released",
    Created => "created",
    Similarity => "similarity",
});

wire_enum!(CategoryOrderBy {
    Name => "name",
    Miscellaneous => "miscellaneous",
    Pos => "pos",
});

wire_enum!(LevelOrderBy { Name => "name", Pos => "pos" });

wire_enum!(VariableOrderBy {
    Name => "name",
    Mandatory => "mandatory",
    UserDefined => "user-defined",
    Pos => "pos",
});

wire_enum!(RunOrderBy {
    Game => "game",
    Category => "category",
    Level => "level",
    Platform => "platform",
    Region => "region",
    Emulated => "emulated",
    Date => "date",
    Submitted => "submitted",
    Status => "status",
    VerifyDate => "verify-date",
});

wire_enum!(UserOrderBy {
    NameInternational => "name.int",
    NameJapanese => "name.jap",
    Signup => "signup",
    Role => "role",
});

wire_enum!(SeriesOrderBy {
    NameInternational => "name.int",
    NameJapanese => "name.jap",
    Abbreviation => "abbreviation",
    Created => "created",
});

wire_enum!(PlatformOrderBy { Name => "name", Released => "released" });

wire_enum!(
    /// Sort field for regions, genres, engines, developers, publishers and
    /// game types.
    NameOrderBy { Name => "name" }
);

wire_enum!(NotificationOrderBy { Created => "created" });

wire_enum!(
    /// Which boards a records request covers.
    RecordScope {
        FullGame => "full-game",
        Levels => "levels",
        All => "all",
    }
);

wire_enum!(
    /// Run status filter for run listings.
    RunStatusFilter {
        New => "new",
        Verified => "verified",
        Rejected => "rejected",
    }
);

/// `orderby` plus `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder<O> {
    pub orderby: Option<O>,
    pub direction: Option<SortDirection>,
}

impl<O> Default for SortOrder<O> {
    fn default() -> Self {
        Self {
            orderby: None,
            direction: None,
        }
    }
}

impl<O> SortOrder<O> {
    /// Sorts by `orderby` in the server's default direction.
    pub fn by(orderby: O) -> Self {
        Self {
            orderby: Some(orderby),
            direction: None,
        }
    }

    /// Sends `direction=asc`.
    pub fn ascending(mut self) -> Self {
        self.direction = Some(SortDirection::Asc);
        self
    }

    /// Sends `direction=desc`.
    pub fn descending(mut self) -> Self {
        self.direction = Some(SortDirection::Desc);
        self
    }
}

impl<O: fmt::Display> AppendQuery for SortOrder<O> {
    fn append_to(&self, query: &mut QueryItems) {
        query
            .push_opt("orderby", self.orderby.as_ref())
            .push_opt("direction", self.direction);
    }
}

/// `max` / `offset` paging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationParameters {
    /// Page size; the API caps this at 200 (1000 in bulk mode).
    pub max: Option<u32>,
    pub offset: Option<u32>,
}

impl PaginationParameters {
    /// Requests `max` items starting at `offset`.
    pub fn new(max: u32, offset: u32) -> Self {
        Self {
            max: Some(max),
            offset: Some(offset),
        }
    }
}

impl AppendQuery for PaginationParameters {
    fn append_to(&self, query: &mut QueryItems) {
        query.push_opt("max", self.max).push_opt("offset", self.offset);
    }
}

/// Filters for `GET /games`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameQuery {
    /// Fuzzy name search.
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub released: Option<i32>,
    pub gametype: Option<String>,
    pub platform: Option<String>,
    pub region: Option<String>,
    pub genre: Option<String>,
    pub engine: Option<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub moderator: Option<String>,
    /// Bulk mode: reduced game shape, larger pages, no embeds.
    pub bulk: bool,
    pub sort: SortOrder<GameOrderBy>,
    pub page: PaginationParameters,
}

impl GameQuery {
    /// Games whose name matches `name` (fuzzy, server-side).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl AppendQuery for GameQuery {
    fn append_to(&self, query: &mut QueryItems) {
        query
            .push_opt("name", self.name.as_ref())
            .push_opt("abbreviation", self.abbreviation.as_ref())
            .push_opt("released", self.released)
            .push_opt("gametype", self.gametype.as_ref())
            .push_opt("platform", self.platform.as_ref())
            .push_opt("region", self.region.as_ref())
            .push_opt("genre", self.genre.as_ref())
            .push_opt("engine", self.engine.as_ref())
            .push_opt("developer", self.developer.as_ref())
            .push_opt("publisher", self.publisher.as_ref())
            .push_opt("moderator", self.moderator.as_ref());
        if self.bulk {
            query.push("_bulk", "yes");
        }
        query.append(&self.sort).append(&self.page);
    }
}

/// Filters for `GET /runs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunQuery {
    pub user: Option<String>,
    pub guest: Option<String>,
    pub examiner: Option<String>,
    pub game: Option<String>,
    pub level: Option<String>,
    pub category: Option<String>,
    pub platform: Option<String>,
    pub region: Option<String>,
    pub emulated: Option<bool>,
    pub status: Option<RunStatusFilter>,
    pub sort: SortOrder<RunOrderBy>,
    pub page: PaginationParameters,
}

impl AppendQuery for RunQuery {
    fn append_to(&self, query: &mut QueryItems) {
        query
            .push_opt("user", self.user.as_ref())
            .push_opt("guest", self.guest.as_ref())
            .push_opt("examiner", self.examiner.as_ref())
            .push_opt("game", self.game.as_ref())
            .push_opt("level", self.level.as_ref())
            .push_opt("category", self.category.as_ref())
            .push_opt("platform", self.platform.as_ref())
            .push_opt("region", self.region.as_ref())
            .push_opt("emulated", self.emulated)
            .push_opt("status", self.status)
            .append(&self.sort)
            .append(&self.page);
    }
}

/// Filters for `GET /users`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Exact, case-insensitive match across names and social accounts.
    pub lookup: Option<String>,
    pub name: Option<String>,
    pub twitch: Option<String>,
    pub hitbox: Option<String>,
    pub twitter: Option<String>,
    pub speedrunslive: Option<String>,
    pub sort: SortOrder<UserOrderBy>,
    pub page: PaginationParameters,
}

impl UserQuery {
    /// Users whose name matches `name` (fuzzy, server-side).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl AppendQuery for UserQuery {
    fn append_to(&self, query: &mut QueryItems) {
        query
            .push_opt("lookup", self.lookup.as_ref())
            .push_opt("name", self.name.as_ref())
            .push_opt("twitch", self.twitch.as_ref())
            .push_opt("hitbox", self.hitbox.as_ref())
            .push_opt("twitter", self.twitter.as_ref())
            .push_opt("speedrunslive", self.speedrunslive.as_ref())
            .append(&self.sort)
            .append(&self.page);
    }
}

/// Filters for `GET /series`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesQuery {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub moderator: Option<String>,
    pub sort: SortOrder<SeriesOrderBy>,
    pub page: PaginationParameters,
}

impl AppendQuery for SeriesQuery {
    fn append_to(&self, query: &mut QueryItems) {
        query
            .push_opt("name", self.name.as_ref())
            .push_opt("abbreviation", self.abbreviation.as_ref())
            .push_opt("moderator", self.moderator.as_ref())
            .append(&self.sort)
            .append(&self.page);
    }
}

/// Options for leaderboard lookups.
///
/// Variable filters are kept in the order they were added and each becomes
/// its own `var-<variable>=<value>` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardQuery {
    /// Only include runs placed this high or better.
    pub top: Option<u32>,
    pub platform: Option<String>,
    pub region: Option<String>,
    /// `Some(false)` hides emulator runs, `Some(true)` shows only them.
    pub emulators: Option<bool>,
    pub video_only: Option<bool>,
    pub timing: Option<TimingMethod>,
    /// Board as it stood on this day.
    pub date: Option<DateTime<Utc>>,
    pub variables: Vec<(String, String)>,
}

impl LeaderboardQuery {
    /// Adds a `var-<variable>=<value>` filter.
    pub fn variable(mut self, variable: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push((variable.into(), value.into()));
        self
    }
}

impl AppendQuery for LeaderboardQuery {
    fn append_to(&self, query: &mut QueryItems) {
        query
            .push_opt("top", self.top)
            .push_opt("platform", self.platform.as_ref())
            .push_opt("region", self.region.as_ref())
            .push_opt("emulators", self.emulators)
            .push_opt("video-only", self.video_only)
            .push_opt("timing", self.timing.map(TimingMethod::as_str))
            .push_opt("date", self.date.as_ref().map(dates::format_date));
        for (variable, value) in &self.variables {
            query.push(format!("var-{variable}"), value);
        }
    }
}

/// Options for the `/records` endpoints of games, categories and levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordsQuery {
    /// Places to include per board; the API default is 3.
    pub top: Option<u32>,
    pub scope: Option<RecordScope>,
    pub miscellaneous: Option<bool>,
    /// Leave out boards without any runs.
    pub skip_empty: Option<bool>,
    pub page: PaginationParameters,
}

impl AppendQuery for RecordsQuery {
    fn append_to(&self, query: &mut QueryItems) {
        query
            .push_opt("top", self.top)
            .push_opt("scope", self.scope)
            .push_opt("miscellaneous", self.miscellaneous)
            .push_opt("skip-empty", self.skip_empty)
            .append(&self.page);
    }
}

/// Options for a user's personal bests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalBestsQuery {
    pub top: Option<u32>,
    /// Series ID or abbreviation.
    pub series: Option<String>,
    /// Game ID or abbreviation.
    pub game: Option<String>,
}

impl AppendQuery for PersonalBestsQuery {
    fn append_to(&self, query: &mut QueryItems) {
        query
            .push_opt("top", self.top)
            .push_opt("series", self.series.as_ref())
            .push_opt("game", self.game.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pairs(query: &QueryItems) -> Vec<(&str, &str)> {
        query.iter().collect()
    }

    #[test]
    fn duplicate_keys_are_kept_in_order() {
        let query: QueryItems = [
            ("top", "10"),
            ("var-abc123", "def456"),
            ("var-abc123", "ghi789"),
        ]
        .into_iter()
        .collect();

        assert_eq!(query.len(), 3);
        assert_eq!(
            pairs(&query),
            [
                ("top", "10"),
                ("var-abc123", "def456"),
                ("var-abc123", "ghi789")
            ]
        );
    }

    #[test]
    fn empty_embed_list_adds_nothing() {
        let mut query = QueryItems::new();
        query.embed::<&str>(&[]);
        assert!(query.is_empty());
    }

    #[test]
    fn game_query_serializes_set_fields_only() {
        let game = GameQuery {
            name: Some("mario".into()),
            bulk: true,
            sort: SortOrder::by(GameOrderBy::Similarity).descending(),
            page: PaginationParameters {
                max: Some(50),
                offset: None,
            },
            ..GameQuery::default()
        };

        let mut query = QueryItems::new();
        query.append(&game);

        assert_eq!(
            pairs(&query),
            [
                ("name", "mario"),
                ("_bulk", "yes"),
                ("orderby", "similarity"),
                ("direction", "desc"),
                ("max", "50"),
            ]
        );
    }

    #[test]
    fn leaderboard_query_formats_date_and_variables() {
        let board = LeaderboardQuery {
            top: Some(10),
            video_only: Some(true),
            timing: Some(TimingMethod::RealtimeNoloads),
            date: Some(Utc.with_ymd_and_hms(2021, 6, 15, 18, 45, 0).unwrap()),
            ..LeaderboardQuery::default()
        }
        .variable("abc123", "def456")
        .variable("abc123", "ghi789");

        let mut query = QueryItems::new();
        query.append(&board);

        assert_eq!(
            pairs(&query),
            [
                ("top", "10"),
                ("video-only", "true"),
                ("timing", "realtime_noloads"),
                ("date", "2021-06-15"),
                ("var-abc123", "def456"),
                ("var-abc123", "ghi789"),
            ]
        );
    }

    #[test]
    fn records_query_uses_kebab_keys() {
        let records = RecordsQuery {
            top: Some(1),
            scope: Some(RecordScope::FullGame),
            skip_empty: Some(true),
            ..RecordsQuery::default()
        };

        let mut query = QueryItems::new();
        query.append(&records);

        assert_eq!(
            pairs(&query),
            [("top", "1"), ("scope", "full-game"), ("skip-empty", "true")]
        );
    }

    #[test]
    fn wire_names() {
        assert_eq!(RunOrderBy::VerifyDate.to_string(), "verify-date");
        assert_eq!(VariableOrderBy::UserDefined.as_str(), "user-defined");
        assert_eq!(UserOrderBy::NameJapanese.as_str(), "name.jap");
    }
}
