//! The player ledger: identity key to mutable player record.
//!
//! Keys are stored verbatim so a snapshot writes back exactly what was loaded.
//! Lookups go through a normalized (trimmed, lowercased) index, so `" A1"`,
//! `"a1"` and `"A1"` all reach the same record.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::player::{Player, normalize_identity};

/// Ordered collection of players addressed by case-insensitive identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Player>", into = "BTreeMap<String, Player>")]
pub struct PlayerLedger {
    players: BTreeMap<String, Player>,
    by_identity: HashMap<String, String>,
}

impl PlayerLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player under `key`.
    ///
    /// Fails if the key is blank or normalizes to an identity already present.
    pub fn insert(&mut self, key: impl Into<String>, player: Player) -> CoreResult<()> {
        let key = key.into();
        let identity = normalize_identity(&key);
        if identity.is_empty() {
            return Err(CoreError::EmptyIdentity);
        }
        if self.by_identity.contains_key(&identity) {
            return Err(CoreError::DuplicateIdentity(key));
        }
        self.by_identity.insert(identity, key.clone());
        self.players.insert(key, player);
        Ok(())
    }

    /// Look up a player by identity (case-insensitive, trimmed).
    pub fn get(&self, identity: &str) -> Option<&Player> {
        self.key_for(identity).and_then(|key| self.players.get(key))
    }

    /// Mutable lookup by identity.
    pub fn get_mut(&mut self, identity: &str) -> Option<&mut Player> {
        let key = self.by_identity.get(&normalize_identity(identity))?;
        self.players.get_mut(key)
    }

    /// Stored key and mutable record for an identity, in one lookup.
    pub fn entry_mut(&mut self, identity: &str) -> Option<(&str, &mut Player)> {
        let key = self.by_identity.get(&normalize_identity(identity))?;
        let player = self.players.get_mut(key)?;
        Some((key.as_str(), player))
    }

    /// The stored key an identity resolves to.
    pub fn key_for(&self, identity: &str) -> Option<&str> {
        self.by_identity
            .get(&normalize_identity(identity))
            .map(String::as_str)
    }

    /// Whether an identity is known.
    pub fn contains(&self, identity: &str) -> bool {
        self.key_for(identity).is_some()
    }

    /// Iterate players in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Player)> {
        self.players.iter().map(|(k, p)| (k.as_str(), p))
    }

    /// Iterate players mutably in key order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Player)> {
        self.players.iter_mut().map(|(k, p)| (k.as_str(), p))
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the ledger holds no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Whether any player's MP is at or below `threshold`.
    pub fn any_low(&self, threshold: i64) -> bool {
        self.players.values().any(|p| p.is_low(threshold))
    }
}

/// Keys that normalize alike keep only the first in byte order (`A1` before `a1`).
impl From<BTreeMap<String, Player>> for PlayerLedger {
    fn from(players: BTreeMap<String, Player>) -> Self {
        let mut ledger = Self::new();
        for (key, player) in players {
            if let Err(e) = ledger.insert(key, player) {
                tracing::warn!(error = %e, "dropping player from ledger");
            }
        }
        ledger
    }
}

impl From<PlayerLedger> for BTreeMap<String, Player> {
    fn from(ledger: PlayerLedger) -> Self {
        ledger.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ledger() -> PlayerLedger {
        let mut ledger = PlayerLedger::new();
        ledger.insert("A1", Player::new("Subject A", 50, 0)).unwrap();
        ledger.insert("b2", Player::new("Subject B", 15, 3)).unwrap();
        ledger
    }

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        let ledger = test_ledger();
        assert_eq!(ledger.get("a1").unwrap().name, "Subject A");
        assert_eq!(ledger.get(" A1 ").unwrap().name, "Subject A");
        assert_eq!(ledger.get("B2").unwrap().name, "Subject B");
        assert!(ledger.get("c3").is_none());
    }

    #[test]
    fn stored_key_preserved() {
        let ledger = test_ledger();
        assert_eq!(ledger.key_for("a1"), Some("A1"));
        let keys: Vec<&str> = ledger.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A1", "b2"]);
    }

    #[test]
    fn duplicate_identity_rejected() {
        let mut ledger = test_ledger();
        let err = ledger.insert("a1", Player::new("Impostor", 1, 1)).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateIdentity(k) if k == "a1"));
        assert_eq!(ledger.get("a1").unwrap().name, "Subject A");
    }

    #[test]
    fn blank_key_rejected() {
        let mut ledger = PlayerLedger::new();
        assert!(matches!(
            ledger.insert("  ", Player::new("X", 1, 1)),
            Err(CoreError::EmptyIdentity)
        ));
    }

    #[test]
    fn get_mut_updates_record() {
        let mut ledger = test_ledger();
        ledger.get_mut("A1").unwrap().apply(-10, 1);
        assert_eq!(ledger.get("a1").unwrap().mp(), 40);
    }

    #[test]
    fn entry_mut_returns_stored_key() {
        let mut ledger = test_ledger();
        let (key, player) = ledger.entry_mut(" a1").unwrap();
        assert_eq!(key, "A1");
        player.apply(-5, 0);
        assert_eq!(ledger.get("A1").unwrap().mp(), 45);
        assert!(ledger.entry_mut("c3").is_none());
    }

    #[test]
    fn any_low() {
        let ledger = test_ledger();
        assert!(ledger.any_low(20));
        assert!(!ledger.any_low(10));
        assert!(!PlayerLedger::new().any_low(20));
    }

    #[test]
    fn serde_roundtrip_keeps_keys_and_index() {
        let ledger = test_ledger();
        let json = serde_json::to_string(&ledger).unwrap();
        assert!(json.contains("\"A1\""));
        let back: PlayerLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
        assert!(back.contains("a1"));
    }

    #[test]
    fn deserialize_drops_colliding_keys() {
        let json = r#"{"A1":{"name":"First","mp":1},"a1":{"name":"Second","mp":2}}"#;
        let ledger: PlayerLedger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("a1").unwrap().name, "First");
    }
}
