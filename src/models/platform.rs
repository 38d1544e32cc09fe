use super::Link;
use serde::{Deserialize, Serialize};

/// A console or other system runs are performed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub id: String,
    pub name: String,
    /// Release year.
    pub released: i32,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A game region, e.g. "JPN / NTSC".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// The shared shape of genres, engines, developers, publishers and gametypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub links: Vec<Link>,
}
