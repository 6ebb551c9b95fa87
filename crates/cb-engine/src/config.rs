//! Engine configuration: GM sentinel, danger threshold, presentation timings.

use std::time::Duration;

use cb_core::{normalize_action, normalize_identity};

/// Configuration for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Identity that, with [`gm_action`](Self::gm_action), opens the GM console.
    pub gm_identity: String,
    /// Action that, with [`gm_identity`](Self::gm_identity), opens the GM console.
    pub gm_action: String,
    /// MP at or below this puts an outcome in danger.
    pub low_mp_threshold: i64,
    /// Delay between narration characters.
    pub narration_char_delay: Duration,
    /// How long a rule effect plays.
    pub effect_duration: Duration,
    /// How long the danger effect plays on its own.
    pub danger_duration: Duration,
    /// How long the danger effect plays when following a rule effect.
    pub danger_after_effect_duration: Duration,
    /// Delay before the danger effect when following a rule effect.
    pub danger_after_effect_delay: Duration,
    /// How long the submit flash lasts.
    pub flash_duration: Duration,
    /// How long a GM result message stays before the console settles.
    pub gm_settle_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gm_identity: "gm".to_string(),
            gm_action: "9999".to_string(),
            low_mp_threshold: 20,
            narration_char_delay: Duration::from_millis(18),
            effect_duration: Duration::from_millis(1800),
            danger_duration: Duration::from_millis(2400),
            danger_after_effect_duration: Duration::from_millis(2000),
            danger_after_effect_delay: Duration::from_millis(900),
            flash_duration: Duration::from_millis(600),
            gm_settle_delay: Duration::from_millis(1200),
        }
    }
}

impl EngineConfig {
    /// Set the GM sentinel pair.
    pub fn with_gm_sentinel(mut self, identity: impl Into<String>, action: impl Into<String>) -> Self {
        self.gm_identity = identity.into();
        self.gm_action = action.into();
        self
    }

    /// Set the low-MP danger threshold.
    pub fn with_low_mp_threshold(mut self, threshold: i64) -> Self {
        self.low_mp_threshold = threshold;
        self
    }

    /// Set the per-character narration delay.
    pub fn with_narration_char_delay(mut self, delay: Duration) -> Self {
        self.narration_char_delay = delay;
        self
    }

    /// Set the GM settle delay.
    pub fn with_gm_settle_delay(mut self, delay: Duration) -> Self {
        self.gm_settle_delay = delay;
        self
    }

    /// Zero every timing, for headless runs.
    pub fn without_delays(mut self) -> Self {
        self.narration_char_delay = Duration::ZERO;
        self.effect_duration = Duration::ZERO;
        self.danger_duration = Duration::ZERO;
        self.danger_after_effect_duration = Duration::ZERO;
        self.danger_after_effect_delay = Duration::ZERO;
        self.flash_duration = Duration::ZERO;
        self.gm_settle_delay = Duration::ZERO;
        self
    }

    /// Whether raw input is the GM sentinel pair.
    pub fn is_gm_sentinel(&self, identity: &str, action: &str) -> bool {
        normalize_identity(identity) == normalize_identity(&self.gm_identity)
            && normalize_action(action) == normalize_action(&self.gm_action)
    }
}
