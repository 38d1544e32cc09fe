use super::{Embeddable, GameAssets, Link, ModeratorRole, Names, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A group of related games sharing moderators, e.g. "Mario Series".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub names: Names,
    pub abbreviation: String,
    pub weblink: String,
    #[serde(default)]
    pub moderators: Embeddable<HashMap<String, ModeratorRole>, Vec<User>>,
    #[serde(default, with = "crate::dates::option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assets: GameAssets,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesEmbed {
    Moderators,
}

impl AsRef<str> for SeriesEmbed {
    fn as_ref(&self) -> &str {
        match self {
            SeriesEmbed::Moderators => "moderators",
        }
    }
}
