//! Data models mirroring the speedrun.com JSON resources.
//!
//! Every model derives both `Deserialize` (for API responses) and `Serialize`
//! (so the command-line tool can re-emit them as JSON). Date fields go through
//! [`crate::dates`], which accepts every date shape the API produces.

mod category;
mod game;
mod leaderboard;
mod platform;
mod run;
mod series;
mod user;

pub use category::{
    Category, CategoryEmbed, CategoryType, Level, LevelEmbed, PlayerCount, PlayerCountType,
    ScopeType, Variable, VariableFlags, VariableScope, VariableValue, VariableValues,
};
pub use game::{Game, GameAssets, GameBulk, GameEmbed, ModeratorRole, Ruleset, TimingMethod};
pub use leaderboard::{Leaderboard, LeaderboardEmbed, PersonalBest, PersonalBestEmbed, RankedRun};
pub use platform::{NamedResource, Platform, Region};
pub use run::{
    Player, Run, RunEmbed, RunPlayer, RunSplits, RunState, RunStatus, RunSubmit, RunSystem,
    RunTimes, RunVideos, SubmitPlayer, SubmitTimes, SubmitVariable, VideoLink,
};
pub use series::{Series, SeriesEmbed};
pub use user::{
    Guest, Location, LocationArea, NameStyle, NameStyleKind, Notification, NotificationItem,
    NotificationItemKind, NotificationStatus, SocialLink, User, UserRole,
};

use serde::{Deserialize, Serialize};

/// A hyperlink to a related resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relationship type (`self`, `game`, `category`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    /// Absolute URI of the related resource
    pub uri: String,
}

impl Link {
    /// Creates a link with the given relationship.
    pub fn new(rel: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            rel: Some(rel.into()),
            uri: uri.into(),
        }
    }
}

/// Finds the first link with relationship `rel`.
pub fn find_link<'a>(links: &'a [Link], rel: &str) -> Option<&'a Link> {
    links.iter().find(|link| link.rel.as_deref() == Some(rel))
}

/// Localised names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Names {
    /// The international (usually English) name
    pub international: String,
    /// The Japanese name, when one exists
    #[serde(default)]
    pub japanese: Option<String>,
    /// Twitch directory name, present on games
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitch: Option<String>,
}

/// An image hosted by speedrun.com.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub uri: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// A colour pair for light and dark themes, as `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub light: String,
    pub dark: String,
}

/// Pagination block attached to collection responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Offset of the first item of this page
    pub offset: u32,
    /// Page size requested
    pub max: u32,
    /// Number of items actually returned
    pub size: u32,
    /// `next` / `prev` links
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Pagination {
    /// Returns `true` if the server advertised a further page.
    pub fn has_next(&self) -> bool {
        find_link(&self.links, "next").is_some()
    }

    /// Offset to request for the following page. Saturates at `u32::MAX`.
    pub fn next_offset(&self) -> u32 {
        self.offset.saturating_add(self.size)
    }
}

/// A paginated collection: `{"data": [...], "pagination": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> Paginated<T> {
    /// Returns `true` if another page can be requested.
    pub fn has_next(&self) -> bool {
        self.pagination.as_ref().is_some_and(Pagination::has_next)
    }
}

/// The `{"data": ...}` envelope wrapping single resources and embeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

/// A field the API replaces with an embedded resource when asked to.
///
/// Without an embed, `Game::platforms` is a list of IDs; with
/// `embed=platforms` it becomes `{"data": [ {platform}, ... ]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Embeddable<R, T> {
    /// The un-embedded shape (usually IDs)
    Plain(R),
    /// The embedded resource(s)
    Embedded(Data<T>),
}

impl<R, T> Embeddable<R, T> {
    /// Returns the plain value if the field was not embedded.
    pub fn plain(&self) -> Option<&R> {
        match self {
            Embeddable::Plain(value) => Some(value),
            Embeddable::Embedded(_) => None,
        }
    }

    /// Returns the embedded value if the field was embedded.
    pub fn embedded(&self) -> Option<&T> {
        match self {
            Embeddable::Plain(_) => None,
            Embeddable::Embedded(data) => Some(&data.data),
        }
    }
}

impl<R: Default, T> Default for Embeddable<R, T> {
    fn default() -> Self {
        Embeddable::Plain(R::default())
    }
}

/// A list of IDs, or the resources themselves once embedded.
pub type IdsOr<T> = Embeddable<Vec<String>, Vec<T>>;

/// A single ID, or the resource itself once embedded.
pub type IdOr<T> = Embeddable<String, Box<T>>;

impl<T> IdOr<T> {
    /// The referenced ID when not embedded.
    pub fn id(&self) -> Option<&str> {
        self.plain().map(String::as_str)
    }
}
