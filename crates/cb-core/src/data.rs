//! Loading the static game data file.
//!
//! The file is a JSON object with three sections:
//!
//! ```json
//! {
//!   "system":  { "invalidAccessPenalty": 5 },
//!   "players": { "a1": { "name": "Subject A", "mp": 50, "cred": 0 } },
//!   "actions": [ { "action": "greet", "mp": -5, "cred": 1, "msg": "..." } ]
//! }
//! ```
//!
//! Loading never fails outright. An unreadable or unparsable file yields empty
//! data, a malformed section falls back on its own, and a malformed player or
//! rule is skipped. Every such decision is recorded as a [`DataIssue`].

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::{CoreError, CoreResult};
use crate::ledger::PlayerLedger;
use crate::player::Player;
use crate::rules::{ActionRule, RuleDefinition, RuleStore, SupplementFilter};
use crate::settings::SystemSettings;

/// Default location of the game data file, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "assets/data/game-data.json";

/// A problem found while loading game data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIssue {
    /// The whole file was replaced by empty data.
    #[error("data unusable, using empty data: {0}")]
    Unusable(String),

    /// A top-level section was replaced by its default.
    #[error("section \"{section}\" ignored: {reason}")]
    SectionIgnored {
        /// Section name.
        section: &'static str,
        /// What was wrong.
        reason: String,
    },

    /// A player entry could not be read.
    #[error("player \"{key}\" skipped: {reason}")]
    PlayerSkipped {
        /// Key in the `players` object.
        key: String,
        /// What was wrong.
        reason: String,
    },

    /// A rule entry could not be read.
    #[error("rule #{index} skipped: {reason}")]
    RuleSkipped {
        /// Position in the `actions` array.
        index: usize,
        /// What was wrong.
        reason: String,
    },

    /// A rule's supplement pattern does not compile; the rule never matches.
    #[error("rule #{index} ({action}): invalid supplementPattern \"{pattern}\": {error}")]
    InvalidPattern {
        /// Position in the `actions` array.
        index: usize,
        /// Rule action.
        action: String,
        /// Source pattern.
        pattern: String,
        /// Compilation error.
        error: String,
    },

    /// A rule sets both `supplement` and `supplementPattern`; the supplement must pass both.
    #[error("rule #{index} ({action}): both supplement and supplementPattern set, both must match")]
    ConflictingFilters {
        /// Position in the `actions` array.
        index: usize,
        /// Rule action.
        action: String,
    },
}

/// Everything loaded from the data file.
#[derive(Debug, Clone, Default)]
pub struct GameData {
    /// System settings.
    pub settings: SystemSettings,
    /// Initial player ledger.
    pub players: PlayerLedger,
    /// Compiled rules.
    pub rules: RuleStore,
    /// Problems encountered while loading.
    pub issues: Vec<DataIssue>,
}

impl GameData {
    /// Load from a file, falling back to empty data on any failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "using empty game data");
                Self {
                    issues: vec![DataIssue::Unusable(e.to_string())],
                    ..Self::default()
                }
            }
        }
    }

    /// Load from a file, failing if it cannot be read or is not a JSON object.
    /// Section-level problems are still recovered and reported as issues.
    pub fn try_load(path: &Path) -> CoreResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::parse(&text)?;
        tracing::info!(
            path = %path.display(),
            players = data.players.len(),
            rules = data.rules.len(),
            issues = data.issues.len(),
            "game data loaded"
        );
        Ok(data)
    }

    /// Parse a JSON document, failing only if it is not a JSON object.
    pub fn parse(json: &str) -> CoreResult<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(root) => Ok(Self::from_root(&root)),
            _ => Err(CoreError::NotAnObject),
        }
    }

    /// Parse a JSON document, falling back to empty data on failure.
    pub fn from_json_str(json: &str) -> Self {
        Self::parse(json).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using empty game data");
            Self {
                issues: vec![DataIssue::Unusable(e.to_string())],
                ..Self::default()
            }
        })
    }

    fn from_root(root: &Map<String, Value>) -> Self {
        let mut issues = Vec::new();
        let settings = load_settings(root.get("system"), &mut issues);
        let players = load_players(root.get("players"), &mut issues);
        let rules = load_rules(root.get("actions"), &mut issues);
        for issue in &issues {
            tracing::warn!("{issue}");
        }
        Self {
            settings,
            players,
            rules,
            issues,
        }
    }
}

fn load_settings(value: Option<&Value>, issues: &mut Vec<DataIssue>) -> SystemSettings {
    match value {
        None | Some(Value::Null) => SystemSettings::default(),
        Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|e| {
            issues.push(DataIssue::SectionIgnored {
                section: "system",
                reason: e.to_string(),
            });
            SystemSettings::default()
        }),
    }
}

fn load_players(value: Option<&Value>, issues: &mut Vec<DataIssue>) -> PlayerLedger {
    let mut ledger = PlayerLedger::new();
    let entries = match value {
        None | Some(Value::Null) => return ledger,
        Some(Value::Object(entries)) => entries,
        Some(_) => {
            issues.push(DataIssue::SectionIgnored {
                section: "players",
                reason: "expected an object".to_string(),
            });
            return ledger;
        }
    };
    for (key, entry) in entries {
        let player: Player = match serde_json::from_value(entry.clone()) {
            Ok(player) => player,
            Err(e) => {
                issues.push(DataIssue::PlayerSkipped {
                    key: key.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        if let Err(e) = ledger.insert(key.clone(), player) {
            issues.push(DataIssue::PlayerSkipped {
                key: key.clone(),
                reason: e.to_string(),
            });
        }
    }
    ledger
}

fn load_rules(value: Option<&Value>, issues: &mut Vec<DataIssue>) -> RuleStore {
    let entries = match value {
        None | Some(Value::Null) => return RuleStore::default(),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            issues.push(DataIssue::SectionIgnored {
                section: "actions",
                reason: "expected an array".to_string(),
            });
            return RuleStore::default();
        }
    };
    let mut rules = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let def: RuleDefinition = match serde_json::from_value(entry.clone()) {
            Ok(def) => def,
            Err(e) => {
                issues.push(DataIssue::RuleSkipped {
                    index,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let Some(rule) = ActionRule::compile(&def) else {
            issues.push(DataIssue::RuleSkipped {
                index,
                reason: "missing action".to_string(),
            });
            continue;
        };
        if def.supplement.is_some() && def.supplement_pattern.is_some() {
            issues.push(DataIssue::ConflictingFilters {
                index,
                action: rule.action.clone(),
            });
        }
        if let SupplementFilter::Broken { pattern, error } = &rule.supplement {
            issues.push(DataIssue::InvalidPattern {
                index,
                action: rule.action.clone(),
                pattern: pattern.clone(),
                error: error.clone(),
            });
        }
        rules.push(rule);
    }
    RuleStore::new(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "system": { "invalidAccessPenalty": 7 },
        "players": {
            "a1": { "name": "Subject A", "mp": 50, "cred": 0, "secret": "spoon" },
            "b2": { "name": "Subject B", "mp": 30, "cred": 2 }
        },
        "actions": [
            { "action": "greet", "mp": -5, "cred": 1, "msg": "The guard nods." },
            { "action": "pray", "supplementPattern": "go+d", "mp": 10, "effect": "glow" }
        ]
    }"#;

    #[test]
    fn parse_sample() {
        let data = GameData::parse(SAMPLE).unwrap();
        assert_eq!(data.settings.invalid_access_penalty(), 7);
        assert_eq!(data.players.len(), 2);
        assert_eq!(data.players.get("A1").unwrap().secret.as_deref(), Some("spoon"));
        assert_eq!(data.rules.len(), 2);
        assert!(data.issues.is_empty());
    }

    #[test]
    fn garbage_falls_back_to_empty() {
        let data = GameData::from_json_str("not json");
        assert!(data.players.is_empty());
        assert!(data.rules.is_empty());
        assert_eq!(data.settings, SystemSettings::default());
        assert!(matches!(data.issues[..], [DataIssue::Unusable(_)]));
    }

    #[test]
    fn non_object_root_rejected() {
        assert!(matches!(GameData::parse("[1,2]"), Err(CoreError::NotAnObject)));
    }

    #[test]
    fn missing_sections_default() {
        let data = GameData::parse("{}").unwrap();
        assert!(data.players.is_empty());
        assert!(data.rules.is_empty());
        assert_eq!(data.settings.invalid_access_penalty(), 5);
        assert!(data.issues.is_empty());
    }

    #[test]
    fn bad_section_falls_back_alone() {
        let data = GameData::parse(
            r#"{"system": 3, "players": [], "actions": [{"action":"greet"}]}"#,
        )
        .unwrap();
        assert_eq!(data.rules.len(), 1);
        assert_eq!(data.settings.invalid_access_penalty(), 5);
        assert!(data.players.is_empty());
        assert_eq!(data.issues.len(), 2);
    }

    #[test]
    fn bad_entries_skipped_individually() {
        let data = GameData::parse(
            r#"{
                "players": { "a1": {"name": "A"}, "bad": 4, "A1": {"name": "Dup"} },
                "actions": [ {"mp": 1}, 17, {"action": "greet"} ]
            }"#,
        )
        .unwrap();
        assert_eq!(data.players.len(), 1);
        assert_eq!(data.rules.len(), 1);
        let skipped_rules = data
            .issues
            .iter()
            .filter(|i| matches!(i, DataIssue::RuleSkipped { .. }))
            .count();
        let skipped_players = data
            .issues
            .iter()
            .filter(|i| matches!(i, DataIssue::PlayerSkipped { .. }))
            .count();
        assert_eq!((skipped_rules, skipped_players), (2, 2));
    }

    #[test]
    fn pattern_problems_reported_but_rule_kept() {
        let data = GameData::parse(
            r#"{"actions": [
                {"action": "pray", "supplementPattern": "(oops"},
                {"action": "dig", "supplement": "spoon", "supplementPattern": "fork"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(data.rules.len(), 2);
        assert!(matches!(
            &data.issues[0],
            DataIssue::InvalidPattern { index: 0, action, .. } if action == "pray"
        ));
        assert_eq!(
            data.issues[1],
            DataIssue::ConflictingFilters {
                index: 1,
                action: "dig".to_string()
            }
        );
    }

    #[test]
    fn issue_messages() {
        let issue = DataIssue::RuleSkipped {
            index: 3,
            reason: "missing action".to_string(),
        };
        insta::assert_snapshot!(issue, @"rule #3 skipped: missing action");
        let issue = DataIssue::ConflictingFilters {
            index: 1,
            action: "dig".to_string(),
        };
        insta::assert_snapshot!(issue, @"rule #1 (dig): both supplement and supplementPattern set, both must match");
    }

    #[test]
    fn missing_file_falls_back() {
        let data = GameData::load(Path::new("/definitely/not/here.json"));
        assert!(data.players.is_empty());
        assert_eq!(data.issues.len(), 1);
        assert!(GameData::try_load(Path::new("/definitely/not/here.json")).is_err());
    }
}
