use super::{Data, Link};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A leaderboard category, e.g. "120 Star" or "Any%".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub weblink: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
    #[serde(default)]
    pub rules: Option<String>,
    pub players: PlayerCount,
    #[serde(default)]
    pub miscellaneous: bool,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Present with `embed=variables`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Data<Vec<Variable>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryType {
    PerGame,
    PerLevel,
}

/// How many players a run in this category has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCount {
    #[serde(rename = "type")]
    pub kind: PlayerCountType,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerCountType {
    Exactly,
    UpTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryEmbed {
    Game,
    Variables,
}

impl AsRef<str> for CategoryEmbed {
    fn as_ref(&self) -> &str {
        match self {
            CategoryEmbed::Game => "game",
            CategoryEmbed::Variables => "variables",
        }
    }
}

/// An individual level (IL) of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub name: String,
    pub weblink: String,
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Data<Vec<Category>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Data<Vec<Variable>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEmbed {
    Categories,
    Variables,
}

impl AsRef<str> for LevelEmbed {
    fn as_ref(&self) -> &str {
        match self {
            LevelEmbed::Categories => "categories",
            LevelEmbed::Variables => "variables",
        }
    }
}

/// A custom field on runs (platform tier, glitch rules, ...). Subcategory
/// variables split a leaderboard into separate boards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Variable {
    pub id: String,
    pub name: String,
    /// Restricts the variable to one category; `None` means every category.
    #[serde(default)]
    pub category: Option<String>,
    pub scope: VariableScope,
    pub mandatory: bool,
    pub user_defined: bool,
    pub obsoletes: bool,
    pub values: VariableValues,
    #[serde(default)]
    pub is_subcategory: bool,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableScope {
    #[serde(rename = "type")]
    pub kind: ScopeType,
    /// Set only for `single-level` scopes.
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeType {
    Global,
    FullGame,
    AllLevels,
    SingleLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableValues {
    /// Value ID to value.
    pub values: HashMap<String, VariableValue>,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableValue {
    pub label: String,
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub flags: Option<VariableFlags>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableFlags {
    #[serde(default)]
    pub miscellaneous: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_subcategory_variable() {
        let variable: Variable = serde_json::from_str(
            r#"{
                "id": "e8m7em86",
                "name": "Platform",
                "category": null,
                "scope": {"type": "full-game"},
                "mandatory": true,
                "user-defined": false,
                "obsoletes": true,
                "values": {
                    "values": {
                        "9qj7z0oq": {"label": "N64", "rules": null, "flags": {"miscellaneous": false}},
                        "jq64j9e1": {"label": "VC"}
                    },
                    "default": "9qj7z0oq"
                },
                "is-subcategory": true,
                "links": []
            }"#,
        )
        .unwrap();

        assert_eq!(variable.scope.kind, ScopeType::FullGame);
        assert!(variable.is_subcategory);
        assert_eq!(variable.values.values["jq64j9e1"].label, "VC");
        assert_eq!(variable.values.default.as_deref(), Some("9qj7z0oq"));
    }

    #[test]
    fn decodes_category_player_counts() {
        let category: Category = serde_json::from_str(
            r#"{
                "id": "wkpoo02r",
                "name": "120 Star",
                "weblink": "https://www.speedrun.com/sm64#120_Star",
                "type": "per-game",
                "rules": "Collect all 120 stars.",
                "players": {"type": "exactly", "value": 1},
                "miscellaneous": false,
                "links": []
            }"#,
        )
        .unwrap();

        assert_eq!(category.kind, CategoryType::PerGame);
        assert_eq!(
            category.players,
            PlayerCount {
                kind: PlayerCountType::Exactly,
                value: 1
            }
        );
    }
}
