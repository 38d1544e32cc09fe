use super::{
    Category, Data, Game, IdOr, Level, Link, Platform, Player, Region, Run, TimingMethod, Variable,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A ranked board for one category, optionally narrowed by level, platform,
/// region and subcategory values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Leaderboard {
    pub weblink: String,
    pub game: IdOr<Game>,
    pub category: IdOr<Category>,
    #[serde(default)]
    pub level: Option<IdOr<Level>>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub emulators: Option<bool>,
    #[serde(default)]
    pub video_only: bool,
    #[serde(default)]
    pub timing: Option<TimingMethod>,
    /// Variable filters that were applied.
    #[serde(default)]
    pub values: HashMap<String, String>,
    pub runs: Vec<RankedRun>,
    #[serde(default)]
    pub links: Vec<Link>,

    // Present only when embedded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<Data<Vec<Player>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Data<Vec<Region>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Data<Vec<Platform>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Data<Vec<Variable>>>,
}

impl Leaderboard {
    /// Looks up an embedded player by user ID or guest name.
    pub fn player(&self, key: &str) -> Option<&Player> {
        self.players.as_ref()?.data.iter().find(|player| match player {
            Player::User(user) => user.id == key,
            Player::Guest(guest) => guest.name == key,
        })
    }
}

/// A run together with its position on a board. Tied runs share a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRun {
    pub place: u32,
    pub run: Run,
}

/// A user's best run in one category; same shape as a board entry.
pub type PersonalBest = RankedRun;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardEmbed {
    Game,
    Category,
    Level,
    Players,
    Regions,
    Platforms,
    Variables,
}

impl AsRef<str> for LeaderboardEmbed {
    fn as_ref(&self) -> &str {
        match self {
            LeaderboardEmbed::Game => "game",
            LeaderboardEmbed::Category => "category",
            LeaderboardEmbed::Level => "level",
            LeaderboardEmbed::Players => "players",
            LeaderboardEmbed::Regions => "regions",
            LeaderboardEmbed::Platforms => "platforms",
            LeaderboardEmbed::Variables => "variables",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalBestEmbed {
    Game,
    Category,
    Level,
    Players,
    Region,
    Platform,
}

impl AsRef<str> for PersonalBestEmbed {
    fn as_ref(&self) -> &str {
        match self {
            PersonalBestEmbed::Game => "game",
            PersonalBestEmbed::Category => "category",
            PersonalBestEmbed::Level => "level",
            PersonalBestEmbed::Players => "players",
            PersonalBestEmbed::Region => "region",
            PersonalBestEmbed::Platform => "platform",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_board_with_embedded_players() {
        let board: Leaderboard = serde_json::from_str(
            r#"{
                "weblink": "https://www.speedrun.com/sm64#120_Star",
                "game": "o1y9wo6q",
                "category": "wkpoo02r",
                "level": null,
                "platform": null,
                "region": null,
                "emulators": null,
                "video-only": false,
                "timing": "realtime",
                "values": {},
                "runs": [{
                    "place": 1,
                    "run": {
                        "id": "90y6pm7e",
                        "weblink": "https://www.speedrun.com/sm64/run/90y6pm7e",
                        "game": "o1y9wo6q",
                        "category": "wkpoo02r",
                        "status": {"status": "verified"},
                        "players": [{"rel": "guest", "name": "Couch Coop"}],
                        "date": "2021-06-15",
                        "submitted": null,
                        "times": {"primary": "PT1H38M3S", "primary_t": 5883},
                        "system": {"platform": "w89rwelk", "emulated": false, "region": null},
                        "values": {}
                    }
                }],
                "links": [],
                "players": {"data": [{"rel": "guest", "name": "Couch Coop", "links": []}]}
            }"#,
        )
        .unwrap();

        assert_eq!(board.timing, Some(TimingMethod::Realtime));
        assert_eq!(board.runs[0].place, 1);
        assert!(matches!(board.player("Couch Coop"), Some(Player::Guest(_))));
        assert!(board.player("nobody").is_none());
    }
}
