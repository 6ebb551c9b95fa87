//! Mutable game state owned by a session.

use cb_core::{GameData, LogHistory, PlayerLedger, RuleStore, SystemSettings};

use crate::snapshot::Snapshot;

/// Settings, ledger, rules and log history for one session.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    /// System settings from the data file.
    pub settings: SystemSettings,
    /// Player records.
    pub ledger: PlayerLedger,
    /// Action rules.
    pub rules: RuleStore,
    /// Recorded log lines.
    pub history: LogHistory,
}

impl GameState {
    /// Replace ledger and history with a snapshot's. Settings and rules stay.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.ledger = snapshot.players;
        self.history = snapshot.log_history;
    }
}

impl From<GameData> for GameState {
    fn from(data: GameData) -> Self {
        Self {
            settings: data.settings,
            ledger: data.players,
            rules: data.rules,
            history: LogHistory::new(),
        }
    }
}
