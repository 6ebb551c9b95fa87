//! System-wide settings from the `system` section of the data file.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::lenient;

/// MP removed from every player on an unrecognized identity.
pub const DEFAULT_INVALID_ACCESS_PENALTY: i64 = 5;

/// Global game settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    #[serde(default = "default_penalty", deserialize_with = "penalty")]
    invalid_access_penalty: i64,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            invalid_access_penalty: DEFAULT_INVALID_ACCESS_PENALTY,
        }
    }
}

impl SystemSettings {
    /// Set the invalid-access penalty (clamped to be non-negative).
    pub fn with_invalid_access_penalty(mut self, penalty: i64) -> Self {
        self.invalid_access_penalty = penalty.max(0);
        self
    }

    /// MP removed from every player on an unrecognized identity.
    pub fn invalid_access_penalty(&self) -> i64 {
        self.invalid_access_penalty
    }
}

fn default_penalty() -> i64 {
    DEFAULT_INVALID_ACCESS_PENALTY
}

fn penalty<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient::coerce_integer(&value).map_or(DEFAULT_INVALID_ACCESS_PENALTY, |n| n.max(0)))
}
