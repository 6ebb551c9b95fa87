//! Structured result of resolving one input.

use cb_core::{AppliedDelta, ActionRule, Player};

use crate::narration;

/// What kind of resolution happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    /// Identity or action was empty. Nothing changed.
    InputRejected,
    /// Identity unknown; every player lost up to `penalty` MP.
    SecurityPenalty {
        /// Configured penalty amount.
        penalty: i64,
    },
    /// Identity known but no rule matched. Nothing changed.
    UndefinedCommand {
        /// Stored key of the acting player.
        key: String,
    },
    /// A rule matched and was applied to the acting player.
    Resolved {
        /// Stored key of the acting player.
        key: String,
        /// Deltas actually applied after clamping.
        applied: AppliedDelta,
    },
}

/// Everything a front end needs to present a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Resolution kind and its details.
    pub kind: OutcomeKind,
    /// Narration to reveal.
    pub text: String,
    /// Status line shown once narration is revealed.
    pub status: String,
    /// One-line log entry, unstamped.
    pub log: String,
    /// Rule effect to play.
    pub effect: Option<String>,
    /// Whether the danger effect should play.
    pub danger: bool,
}

impl Outcome {
    /// Identity or action missing.
    pub fn input_rejected() -> Self {
        Self {
            kind: OutcomeKind::InputRejected,
            text: narration::MISSING_INPUT.to_string(),
            status: narration::NO_STATE_CHANGE.to_string(),
            log: narration::MISSING_INPUT_LOG.to_string(),
            effect: None,
            danger: false,
        }
    }

    /// Unknown identity; penalty already applied.
    pub fn security_penalty(penalty: i64) -> Self {
        Self {
            kind: OutcomeKind::SecurityPenalty { penalty },
            text: narration::penalty_text(penalty),
            status: narration::SYSTEM_PENALTY.to_string(),
            log: narration::penalty_log(penalty),
            effect: None,
            danger: true,
        }
    }

    /// No rule for a known player.
    pub fn undefined_command(key: &str, player: &Player, action: &str) -> Self {
        Self {
            kind: OutcomeKind::UndefinedCommand {
                key: key.to_string(),
            },
            text: narration::undefined_text(&player.name, action),
            status: narration::NO_STATE_CHANGE.to_string(),
            log: narration::undefined_log(&player.name, action),
            effect: None,
            danger: false,
        }
    }

    /// Rule applied; `player` is the record after the change.
    pub fn resolved(
        key: &str,
        player: &Player,
        action: &str,
        supplement: &str,
        rule: &ActionRule,
        applied: AppliedDelta,
        danger: bool,
    ) -> Self {
        Self {
            kind: OutcomeKind::Resolved {
                key: key.to_string(),
                applied,
            },
            text: narration::resolved_text(&player.name, action, supplement, &rule.msg),
            status: narration::status_line(player, applied),
            log: narration::resolved_log(&player.name, action, applied),
            effect: rule.effect.clone(),
            danger,
        }
    }

    /// Whether the ledger was modified.
    pub fn changed_ledger(&self) -> bool {
        matches!(
            self.kind,
            OutcomeKind::SecurityPenalty { .. } | OutcomeKind::Resolved { .. }
        )
    }
}
