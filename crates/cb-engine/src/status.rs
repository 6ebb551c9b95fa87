//! Read-only status check for a single player.

use std::fmt;

use cb_core::PlayerLedger;

use crate::narration::ACCESS_KEY_MISMATCH;

/// Result of looking up a player's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReport {
    /// The key matched a player.
    Found {
        /// Display name.
        name: String,
        /// Current MP.
        mp: i64,
        /// Current CRED.
        cred: i64,
        /// Secret, if any.
        secret: Option<String>,
    },
    /// No player with that key.
    NotFound,
}

impl StatusReport {
    /// Look up `key` (case-insensitive, trimmed). Never mutates the ledger.
    pub fn lookup(ledger: &PlayerLedger, key: &str) -> Self {
        match ledger.get(key) {
            Some(player) => Self::Found {
                name: player.name.clone(),
                mp: player.mp(),
                cred: player.cred(),
                secret: player.secret.clone(),
            },
            None => Self::NotFound,
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found {
                name,
                mp,
                cred,
                secret,
            } => {
                writeln!(f, "NAME: {name}")?;
                writeln!(f, "MP: {mp}")?;
                writeln!(f, "CRED: {cred}")?;
                write!(f, "SECRET: {}", secret.as_deref().unwrap_or("-"))
            }
            Self::NotFound => f.write_str(ACCESS_KEY_MISMATCH),
        }
    }
}
