use super::{
    Asset, Category, Data, Embeddable, IdsOr, Level, Link, NamedResource, Names, Platform, Region,
    User, Variable,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A game and its leaderboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Game {
    pub id: String,
    pub names: Names,
    /// URL slug; can change over time, prefer `id` for storage.
    pub abbreviation: String,
    pub weblink: String,
    /// Release year. Older field, see `release_date`.
    #[serde(default)]
    pub released: Option<i32>,
    #[serde(default, with = "crate::dates::option")]
    pub release_date: Option<DateTime<Utc>>,
    pub ruleset: Ruleset,
    #[serde(default)]
    pub romhack: bool,
    #[serde(default)]
    pub gametypes: IdsOr<NamedResource>,
    #[serde(default)]
    pub platforms: IdsOr<Platform>,
    #[serde(default)]
    pub regions: IdsOr<Region>,
    #[serde(default)]
    pub genres: IdsOr<NamedResource>,
    #[serde(default)]
    pub engines: IdsOr<NamedResource>,
    #[serde(default)]
    pub developers: IdsOr<NamedResource>,
    #[serde(default)]
    pub publishers: IdsOr<NamedResource>,
    /// User ID to role, or the moderators themselves with `embed=moderators`.
    #[serde(default)]
    pub moderators: Embeddable<HashMap<String, ModeratorRole>, Vec<User>>,
    /// When the game was added to the site; `None` for very old entries.
    #[serde(default, with = "crate::dates::option")]
    pub created: Option<DateTime<Utc>>,
    pub assets: GameAssets,
    #[serde(default)]
    pub links: Vec<Link>,

    // Present only when embedded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Data<Vec<Category>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Data<Vec<Level>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Data<Vec<Variable>>>,
}

/// The reduced game shape returned in `_bulk` mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameBulk {
    pub id: String,
    pub names: Names,
    pub abbreviation: String,
    pub weblink: String,
}

/// Submission rules for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Ruleset {
    pub show_milliseconds: bool,
    pub require_verification: bool,
    pub require_video: bool,
    pub run_times: Vec<TimingMethod>,
    pub default_time: TimingMethod,
    pub emulators_allowed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingMethod {
    Realtime,
    RealtimeNoloads,
    Ingame,
}

impl TimingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            TimingMethod::Realtime => "realtime",
            TimingMethod::RealtimeNoloads => "realtime_noloads",
            TimingMethod::Ingame => "ingame",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeratorRole {
    Moderator,
    SuperModerator,
}

/// Images attached to a game page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GameAssets {
    #[serde(default)]
    pub logo: Option<Asset>,
    #[serde(default)]
    pub cover_tiny: Option<Asset>,
    #[serde(default)]
    pub cover_small: Option<Asset>,
    #[serde(default)]
    pub cover_medium: Option<Asset>,
    #[serde(default)]
    pub cover_large: Option<Asset>,
    #[serde(default)]
    pub icon: Option<Asset>,
    #[serde(default)]
    pub trophy_1st: Option<Asset>,
    #[serde(default)]
    pub trophy_2nd: Option<Asset>,
    #[serde(default)]
    pub trophy_3rd: Option<Asset>,
    #[serde(default)]
    pub trophy_4th: Option<Asset>,
    #[serde(default)]
    pub background: Option<Asset>,
    #[serde(default)]
    pub foreground: Option<Asset>,
}

/// Related resources that can be inlined into a game response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEmbed {
    Levels,
    Categories,
    Moderators,
    Gametypes,
    Platforms,
    Regions,
    Genres,
    Engines,
    Developers,
    Publishers,
    Variables,
}

impl AsRef<str> for GameEmbed {
    fn as_ref(&self) -> &str {
        match self {
            GameEmbed::Levels => "levels",
            GameEmbed::Categories => "categories",
            GameEmbed::Moderators => "moderators",
            GameEmbed::Gametypes => "gametypes",
            GameEmbed::Platforms => "platforms",
            GameEmbed::Regions => "regions",
            GameEmbed::Genres => "genres",
            GameEmbed::Engines => "engines",
            GameEmbed::Developers => "developers",
            GameEmbed::Publishers => "publishers",
            GameEmbed::Variables => "variables",
        }
    }
}
