use super::{Category, Data, Embeddable, Game, Guest, IdOr, Level, Link, Platform, Region, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A submitted run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub weblink: String,
    pub game: IdOr<Game>,
    /// `None` for full-game runs.
    #[serde(default)]
    pub level: Option<IdOr<Level>>,
    pub category: IdOr<Category>,
    #[serde(default)]
    pub videos: Option<RunVideos>,
    #[serde(default)]
    pub comment: Option<String>,
    pub status: RunStatus,
    pub players: Embeddable<Vec<RunPlayer>, Vec<Player>>,
    /// The day the run was performed.
    #[serde(default, with = "crate::dates::option")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::dates::option")]
    pub submitted: Option<DateTime<Utc>>,
    pub times: RunTimes,
    pub system: RunSystem,
    #[serde(default)]
    pub splits: Option<RunSplits>,
    /// Variable ID to value ID.
    #[serde(default)]
    pub values: HashMap<String, String>,
    #[serde(default)]
    pub links: Vec<Link>,

    // Present only with `embed=platform` / `embed=region`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Data<Platform>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Data<Region>>,
}

impl Run {
    /// Display names of the runners, falling back to IDs when players were not
    /// embedded.
    pub fn player_names(&self) -> Vec<String> {
        match &self.players {
            Embeddable::Plain(players) => players
                .iter()
                .map(|player| {
                    player
                        .name
                        .clone()
                        .or_else(|| player.id.clone())
                        .unwrap_or_default()
                })
                .collect(),
            Embeddable::Embedded(data) => data
                .data
                .iter()
                .map(|player| match player {
                    Player::User(user) => user.names.international.clone(),
                    Player::Guest(guest) => guest.name.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunVideos {
    /// Free text when the video field holds something other than links.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<VideoLink>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoLink {
    pub uri: String,
}

/// Verification state of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunStatus {
    pub status: RunState,
    /// Moderator who verified or rejected the run.
    #[serde(default)]
    pub examiner: Option<String>,
    #[serde(default, with = "crate::dates::option")]
    pub verify_date: Option<DateTime<Utc>>,
    /// Only present for rejected runs.
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    New,
    Verified,
    Rejected,
}

impl RunState {
    pub fn as_str(self) -> &'static str {
        match self {
            RunState::New => "new",
            RunState::Verified => "verified",
            RunState::Rejected => "rejected",
        }
    }
}

/// A runner reference as it appears without `embed=players`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPlayer {
    /// `user` or `guest`
    pub rel: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// A runner as it appears with `embed=players`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rel", rename_all = "lowercase")]
pub enum Player {
    User(Box<User>),
    Guest(Guest),
}

/// Run durations. The `*_t` fields are seconds; the others ISO 8601 durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTimes {
    pub primary: String,
    pub primary_t: f64,
    #[serde(default)]
    pub realtime: Option<String>,
    #[serde(default)]
    pub realtime_t: f64,
    #[serde(default)]
    pub realtime_noloads: Option<String>,
    #[serde(default)]
    pub realtime_noloads_t: f64,
    #[serde(default)]
    pub ingame: Option<String>,
    #[serde(default)]
    pub ingame_t: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSystem {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub emulated: bool,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSplits {
    pub rel: String,
    pub uri: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEmbed {
    Game,
    Category,
    Level,
    Players,
    Region,
    Platform,
}

impl AsRef<str> for RunEmbed {
    fn as_ref(&self) -> &str {
        match self {
            RunEmbed::Game => "game",
            RunEmbed::Category => "category",
            RunEmbed::Level => "level",
            RunEmbed::Players => "players",
            RunEmbed::Region => "region",
            RunEmbed::Platform => "platform",
        }
    }
}

/// Body for `POST /runs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSubmit {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(
        with = "crate::dates::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub platform: String,
    /// Auto-verify; only honoured for moderators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    pub times: SubmitTimes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<SubmitPlayer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emulated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splitsio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<HashMap<String, SubmitVariable>>,
}

impl RunSubmit {
    /// A minimal submission for `category` on `platform`.
    pub fn new(
        category: impl Into<String>,
        platform: impl Into<String>,
        times: SubmitTimes,
    ) -> Self {
        Self {
            category: category.into(),
            level: None,
            date: None,
            region: None,
            platform: platform.into(),
            verified: None,
            times,
            players: None,
            emulated: None,
            video: None,
            comment: None,
            splitsio: None,
            variables: None,
        }
    }
}

/// Submitted durations in seconds. At least one must be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SubmitTimes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtime: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtime_noloads: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingame: Option<f64>,
}

impl SubmitTimes {
    pub fn realtime(seconds: f64) -> Self {
        Self {
            realtime: Some(seconds),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.realtime.is_none() && self.realtime_noloads.is_none() && self.ingame.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitPlayer {
    pub rel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SubmitPlayer {
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            rel: "user".to_string(),
            id: Some(id.into()),
            name: None,
        }
    }

    pub fn guest(name: impl Into<String>) -> Self {
        Self {
            rel: "guest".to_string(),
            id: None,
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitVariable {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl SubmitVariable {
    pub fn predefined(value: impl Into<String>) -> Self {
        Self {
            kind: "pre-defined".to_string(),
            value: value.into(),
        }
    }

    pub fn user_defined(value: impl Into<String>) -> Self {
        Self {
            kind: "user-defined".to_string(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RUN: &str = r#"{
        "id": "90y6pm7e",
        "weblink": "https://www.speedrun.com/sm64/run/90y6pm7e",
        "game": "o1y9wo6q",
        "level": null,
        "category": "wkpoo02r",
        "videos": {"links": [{"uri": "https://www.youtube.com/watch?v=abc"}]},
        "comment": "GG",
        "status": {
            "status": "verified",
            "examiner": "kj9v9dxn",
            "verify-date": "2021-06-16T08:15:42Z"
        },
        "players": [
            {"rel": "user", "id": "zxzno3jq", "uri": "https://www.speedrun.com/api/v1/users/zxzno3jq"},
            {"rel": "guest", "name": "Couch Coop", "uri": "https://www.speedrun.com/api/v1/guests/Couch%20Coop"}
        ],
        "date": "2021-06-15",
        "submitted": "2021-06-15T21:03:11.120Z",
        "times": {
            "primary": "PT1H38M3S", "primary_t": 5883.0,
            "realtime": "PT1H38M3S", "realtime_t": 5883.0,
            "realtime_noloads": null, "realtime_noloads_t": 0,
            "ingame": null, "ingame_t": 0
        },
        "system": {"platform": "w89rwelk", "emulated": false, "region": "o316x197"},
        "splits": null,
        "values": {"e8m7em86": "9qj7z0oq"},
        "links": []
    }"#;

    #[test]
    fn decodes_run_with_mixed_date_shapes() {
        let run: Run = serde_json::from_str(RUN).unwrap();

        assert_eq!(run.game.id(), Some("o1y9wo6q"));
        assert!(run.level.is_none());
        assert_eq!(run.status.status, RunState::Verified);
        assert_eq!(
            run.date,
            Some(Utc.with_ymd_and_hms(2021, 6, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(
            run.status.verify_date,
            Some(Utc.with_ymd_and_hms(2021, 6, 16, 8, 15, 42).unwrap())
        );
        assert!(run.submitted.is_some());
        assert_eq!(run.player_names(), vec!["zxzno3jq", "Couch Coop"]);
        assert_eq!(run.values["e8m7em86"], "9qj7z0oq");
    }

    #[test]
    fn run_with_bad_date_fails_to_decode() {
        let broken = RUN.replace("\"date\": \"2021-06-15\"", "\"date\": \"15/06/2021\"");
        let err = serde_json::from_str::<Run>(&broken).unwrap_err();
        assert!(err.to_string().contains("15/06/2021"));
    }

    #[test]
    fn submission_omits_unset_fields() {
        let mut submit = RunSubmit::new("wkpoo02r", "w89rwelk", SubmitTimes::realtime(5883.0));
        submit.players = Some(vec![SubmitPlayer::guest("Couch Coop")]);
        submit.date = Some(Utc.with_ymd_and_hms(2021, 6, 15, 0, 0, 0).unwrap());

        let json = serde_json::to_value(&submit).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "category": "wkpoo02r",
                "date": "2021-06-15T00:00:00Z",
                "platform": "w89rwelk",
                "times": {"realtime": 5883.0},
                "players": [{"rel": "guest", "name": "Couch Coop"}]
            })
        );
    }
}
