//! Player records and identity normalization.

use serde::{Deserialize, Serialize};

use crate::lenient;

/// Normalize an identity for lookup: trimmed and lowercased.
pub fn normalize_identity(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Normalize an action for matching: trimmed, case preserved.
pub fn normalize_action(input: &str) -> &str {
    input.trim()
}

/// Deltas actually applied to a player after clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedDelta {
    /// Change in MP.
    pub mp: i64,
    /// Change in CRED.
    pub cred: i64,
}

/// One inmate's record.
///
/// `mp` never drops below zero; `cred` is unbounded in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name used in narration and logs.
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::non_negative")]
    mp: i64,
    #[serde(default, deserialize_with = "lenient::integer")]
    cred: i64,
    /// Private note revealed only by a status check.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::non_empty_string"
    )]
    pub secret: Option<String>,
}

impl Player {
    /// Create a player. Negative `mp` is clamped to zero.
    pub fn new(name: impl Into<String>, mp: i64, cred: i64) -> Self {
        Self {
            name: name.into(),
            mp: mp.max(0),
            cred,
            secret: None,
        }
    }

    /// Attach a secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        self.secret = (!secret.is_empty()).then_some(secret);
        self
    }

    /// Current MP.
    pub fn mp(&self) -> i64 {
        self.mp
    }

    /// Current CRED.
    pub fn cred(&self) -> i64 {
        self.cred
    }

    /// Apply rule deltas and return what actually changed.
    pub fn apply(&mut self, mp_delta: i64, cred_delta: i64) -> AppliedDelta {
        let (mp_before, cred_before) = (self.mp, self.cred);
        self.mp = self.mp.saturating_add(mp_delta).max(0);
        self.cred = self.cred.saturating_add(cred_delta);
        AppliedDelta {
            mp: self.mp - mp_before,
            cred: self.cred.saturating_sub(cred_before),
        }
    }

    /// Lower MP by up to `amount`, returning the actual decrease.
    pub fn drain_mp(&mut self, amount: i64) -> i64 {
        let drained = amount.clamp(0, self.mp);
        self.mp -= drained;
        drained
    }

    /// Whether MP is at or below `threshold`.
    pub fn is_low(&self, threshold: i64) -> bool {
        self.mp <= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_normalization() {
        assert_eq!(normalize_identity("  A1 "), "a1");
        assert_eq!(normalize_identity("\tGM\n"), "gm");
        assert_eq!(normalize_action("  Greet "), "Greet");
    }

    #[test]
    fn new_clamps_negative_mp() {
        let p = Player::new("X", -3, -3);
        assert_eq!(p.mp(), 0);
        assert_eq!(p.cred(), -3);
    }

    #[test]
    fn apply_reports_clamped_delta() {
        let mut p = Player::new("X", 10, 0);
        let applied = p.apply(-25, -4);
        assert_eq!(p.mp(), 0);
        assert_eq!(p.cred(), -4);
        assert_eq!(applied, AppliedDelta { mp: -10, cred: -4 });
    }

    #[test]
    fn apply_positive() {
        let mut p = Player::new("X", 10, 2);
        let applied = p.apply(5, 1);
        assert_eq!((p.mp(), p.cred()), (15, 3));
        assert_eq!(applied, AppliedDelta { mp: 5, cred: 1 });
    }

    #[test]
    fn drain_never_goes_negative() {
        let mut p = Player::new("X", 3, 0);
        assert_eq!(p.drain_mp(5), 3);
        assert_eq!(p.mp(), 0);
        assert_eq!(p.drain_mp(5), 0);
    }

    #[test]
    fn lenient_deserialize() {
        let p: Player =
            serde_json::from_str(r#"{"name":"X","mp":-8,"cred":"4","secret":""}"#).unwrap();
        assert_eq!(p.mp(), 0);
        assert_eq!(p.cred(), 4);
        assert_eq!(p.secret, None);
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let p: Player = serde_json::from_str(r#"{"name":"X"}"#).unwrap();
        assert_eq!((p.mp(), p.cred()), (0, 0));
    }

    #[test]
    fn secret_omitted_when_absent() {
        let json = serde_json::to_string(&Player::new("X", 1, 2)).unwrap();
        assert_eq!(json, r#"{"name":"X","mp":1,"cred":2}"#);
    }

    #[test]
    fn low_threshold_inclusive() {
        assert!(Player::new("X", 20, 0).is_low(20));
        assert!(!Player::new("X", 21, 0).is_low(20));
    }
}
