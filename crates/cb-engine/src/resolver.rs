//! Action resolution against the rule store and player ledger.

use cb_core::{PlayerLedger, RuleStore, SystemSettings, normalize_action, normalize_identity};

use crate::outcome::Outcome;

/// Raw input from the terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionInput {
    /// Who is acting.
    pub identity: String,
    /// What they do.
    pub action: String,
    /// Optional qualifier.
    pub supplement: String,
}

impl ActionInput {
    /// Build an input from its three fields.
    pub fn new(
        identity: impl Into<String>,
        action: impl Into<String>,
        supplement: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            action: action.into(),
            supplement: supplement.into(),
        }
    }
}

/// Resolves input into an [`Outcome`], mutating the ledger.
#[derive(Debug, Clone, Copy)]
pub struct ActionResolver<'a> {
    rules: &'a RuleStore,
    settings: &'a SystemSettings,
    low_mp_threshold: i64,
}

impl<'a> ActionResolver<'a> {
    /// Create a resolver over a rule store and settings.
    pub fn new(rules: &'a RuleStore, settings: &'a SystemSettings, low_mp_threshold: i64) -> Self {
        Self {
            rules,
            settings,
            low_mp_threshold,
        }
    }

    /// Resolve one input.
    ///
    /// Only the penalty path and a matched rule touch the ledger; the penalty
    /// touches every player, a rule touches only the actor.
    pub fn resolve(&self, ledger: &mut PlayerLedger, input: &ActionInput) -> Outcome {
        let identity = normalize_identity(&input.identity);
        let action = normalize_action(&input.action);
        let supplement = input.supplement.trim();

        if identity.is_empty() || action.is_empty() {
            tracing::debug!("input rejected: identity or action missing");
            return Outcome::input_rejected();
        }

        let others_low = ledger
            .iter()
            .any(|(k, p)| normalize_identity(k) != identity && p.is_low(self.low_mp_threshold));
        let Some((key, player)) = ledger.entry_mut(&identity) else {
            return self.penalize(ledger, &identity);
        };
        let Some(rule) = self.rules.find_best(&identity, action, supplement) else {
            return Outcome::undefined_command(key, player, action);
        };

        let applied = player.apply(rule.mp, rule.cred);
        let danger = player.is_low(self.low_mp_threshold) || others_low;
        tracing::debug!(
            player = %key,
            action,
            mp = applied.mp,
            cred = applied.cred,
            danger,
            "rule applied"
        );
        Outcome::resolved(key, player, action, supplement, rule, applied, danger)
    }

    fn penalize(&self, ledger: &mut PlayerLedger, identity: &str) -> Outcome {
        let penalty = self.settings.invalid_access_penalty();
        for (_, player) in ledger.iter_mut() {
            player.drain_mp(penalty);
        }
        tracing::warn!(identity, penalty, players = ledger.len(), "unknown identity, penalty applied");
        Outcome::security_penalty(penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::OutcomeKind;
    use cb_core::{AppliedDelta, GameData, Player};

    const DATA: &str = r#"{
        "players": {
            "a1": { "name": "Subject A", "mp": 50, "cred": 0 },
            "B2": { "name": "Subject B", "mp": 30, "cred": 2 }
        },
        "actions": [
            { "action": "greet", "mp": -5, "cred": 1, "msg": "The guard nods." },
            { "action": "greet", "identity": "b2", "mp": 0, "cred": 3, "msg": "Old friends.", "effect": "glow" },
            { "action": "dig", "supplement": "spoon", "mp": -40, "cred": 2, "msg": "Progress.", "effect": "dust" }
        ]
    }"#;

    fn test_data() -> GameData {
        GameData::parse(DATA).unwrap()
    }

    fn resolve(data: &mut GameData, identity: &str, action: &str, supplement: &str) -> Outcome {
        let resolver = ActionResolver::new(&data.rules, &data.settings, 20);
        resolver.resolve(&mut data.players, &ActionInput::new(identity, action, supplement))
    }

    #[test]
    fn greet_applies_deltas() {
        let mut data = test_data();
        let outcome = resolve(&mut data, "a1", "greet", "");
        let a1 = data.players.get("a1").unwrap();
        assert_eq!((a1.mp(), a1.cred()), (45, 1));
        assert_eq!(
            outcome.kind,
            OutcomeKind::Resolved {
                key: "a1".to_string(),
                applied: AppliedDelta { mp: -5, cred: 1 }
            }
        );
        assert!(!outcome.danger);
        insta::assert_snapshot!(outcome.status, @"MP 45 (-5) / CRED 1 (+1)");
        insta::assert_snapshot!(outcome.log, @"Subject A / greet / MP -5 / CRED +1");
    }

    #[test]
    fn unknown_identity_penalizes_everyone() {
        let mut data = test_data();
        let outcome = resolve(&mut data, "ghost", "greet", "");
        assert_eq!(outcome.kind, OutcomeKind::SecurityPenalty { penalty: 5 });
        assert!(outcome.danger);
        assert_eq!(data.players.get("a1").unwrap().mp(), 45);
        assert_eq!(data.players.get("b2").unwrap().mp(), 25);
    }

    #[test]
    fn unknown_action_changes_nothing() {
        let mut data = test_data();
        let before = data.players.clone();
        let outcome = resolve(&mut data, "a1", "fly", "");
        assert!(matches!(outcome.kind, OutcomeKind::UndefinedCommand { .. }));
        assert!(!outcome.danger);
        assert_eq!(outcome.status, "NO STATE CHANGE");
        assert_eq!(data.players, before);
    }

    #[test]
    fn missing_input_rejected_before_identity_check() {
        let mut data = test_data();
        let before = data.players.clone();
        for (identity, action) in [("", "greet"), ("ghost", "  "), ("   ", "")] {
            let outcome = resolve(&mut data, identity, action, "");
            assert_eq!(outcome.kind, OutcomeKind::InputRejected);
        }
        assert_eq!(data.players, before);
    }

    #[test]
    fn input_is_normalized() {
        let mut data = test_data();
        let outcome = resolve(&mut data, "  A1 ", " greet ", "  ");
        assert!(outcome.text.starts_with("Subject A >> greet\nSupplement: none"));
        assert_eq!(data.players.get("a1").unwrap().mp(), 45);
    }

    #[test]
    fn identity_specific_rule_reports_stored_key() {
        let mut data = test_data();
        let outcome = resolve(&mut data, "b2", "greet", "");
        assert_eq!(outcome.effect.as_deref(), Some("glow"));
        assert!(matches!(&outcome.kind, OutcomeKind::Resolved { key, .. } if key == "B2"));
        insta::assert_snapshot!(outcome.status, @"MP 30 (±0) / CRED 5 (+3)");
    }

    #[test]
    fn mp_clamps_and_danger_triggers() {
        let mut data = test_data();
        let outcome = resolve(&mut data, "a1", "dig", "spoon");
        assert_eq!(data.players.get("a1").unwrap().mp(), 10);
        assert!(outcome.danger);
        let outcome = resolve(&mut data, "a1", "dig", "spoon");
        assert_eq!(data.players.get("a1").unwrap().mp(), 0);
        assert!(matches!(
            outcome.kind,
            OutcomeKind::Resolved { applied: AppliedDelta { mp: -10, cred: 2 }, .. }
        ));
    }

    #[test]
    fn danger_when_bystander_is_low() {
        let mut data = test_data();
        data.players.get_mut("b2").unwrap().apply(-15, 0);
        let outcome = resolve(&mut data, "a1", "greet", "");
        assert!(outcome.danger);
    }

    #[test]
    fn rule_with_exact_and_pattern_needs_both() {
        let mut data = GameData::parse(
            r#"{
                "players": { "a1": { "name": "Subject A", "mp": 50, "cred": 0 } },
                "actions": [
                    { "action": "dig", "supplement": "spoon", "supplementPattern": "fork", "mp": -5 }
                ]
            }"#,
        )
        .unwrap();
        let outcome = resolve(&mut data, "a1", "dig", "spoon");
        assert!(matches!(outcome.kind, OutcomeKind::UndefinedCommand { .. }));
        assert_eq!(data.players.get("a1").unwrap().mp(), 50);
    }

    #[test]
    fn danger_reflects_actor_after_the_rule() {
        let mut data = test_data();
        let outcome = resolve(&mut data, "a1", "dig", "spoon");
        assert!(outcome.danger);
        assert_eq!(data.players.get("a1").unwrap().mp(), 10);
        assert!(!data.players.get("b2").unwrap().is_low(20));
    }

    #[test]
    fn empty_ledger_penalty_is_harmless() {
        let rules = cb_core::RuleStore::default();
        let settings = SystemSettings::default();
        let mut ledger = PlayerLedger::new();
        let outcome = ActionResolver::new(&rules, &settings, 20)
            .resolve(&mut ledger, &ActionInput::new("a1", "greet", ""));
        assert_eq!(outcome.kind, OutcomeKind::SecurityPenalty { penalty: 5 });
        assert!(ledger.is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn ledger_from(mps: &[i64]) -> PlayerLedger {
            let mut ledger = PlayerLedger::new();
            for (i, mp) in mps.iter().enumerate() {
                ledger.insert(format!("p{i}"), Player::new(format!("P{i}"), *mp, 0)).unwrap();
            }
            ledger
        }

        proptest! {
            #[test]
            fn mp_never_negative(
                mps in prop::collection::vec(0i64..200, 1..6),
                deltas in prop::collection::vec(-300i64..300, 1..10),
                actor in 0usize..6,
                penalty in 0i64..60,
            ) {
                let mut ledger = ledger_from(&mps);
                let settings = SystemSettings::default().with_invalid_access_penalty(penalty);
                for delta in deltas {
                    let json = format!(r#"{{"actions":[{{"action":"act","mp":{delta}}}]}}"#);
                    let rules = GameData::parse(&json).unwrap().rules;
                    let resolver = ActionResolver::new(&rules, &settings, 20);
                    resolver.resolve(&mut ledger, &ActionInput::new(format!("p{actor}"), "act", ""));
                    for (_, p) in ledger.iter() {
                        prop_assert!(p.mp() >= 0);
                    }
                }
            }

            #[test]
            fn penalty_is_exact(
                mps in prop::collection::vec(0i64..60, 0..6),
                penalty in 0i64..40,
            ) {
                let mut ledger = ledger_from(&mps);
                let rules = RuleStore::default();
                let settings = SystemSettings::default().with_invalid_access_penalty(penalty);
                let outcome = ActionResolver::new(&rules, &settings, 20)
                    .resolve(&mut ledger, &ActionInput::new("stranger", "greet", ""));
                prop_assert_eq!(outcome.kind, OutcomeKind::SecurityPenalty { penalty });
                for (i, mp) in mps.iter().enumerate() {
                    let after = ledger.get(&format!("p{i}")).unwrap().mp();
                    prop_assert_eq!(after, mp - (*mp).min(penalty));
                }
            }
        }
    }
}
