//! The GM console: a confirmation-gated save/load sub-flow.
//!
//! ```text
//! Closed --open--> Open --request--> ConfirmPending --confirm--> Settling --settle--> Open
//!                                     |                            |
//!                                     +--decline--> Open           +--request--> ConfirmPending
//! any state --close--> Closed
//! ```

use crate::error::{EngineError, EngineResult};
use crate::snapshot::{SlotId, SlotStorage, SnapshotStore};
use crate::state::GameState;

/// Whether the GM is saving or loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GmMode {
    /// Write the current state to a slot.
    Save,
    /// Replace the current state from a slot.
    Load,
}

/// A save or load awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingGmAction {
    /// Save or load.
    pub mode: GmMode,
    /// Target slot.
    pub slot: SlotId,
}

impl PendingGmAction {
    /// Confirmation prompt, e.g. `Save to SLOT 1?`.
    pub fn prompt(&self) -> String {
        match self.mode {
            GmMode::Save => format!("Save to {}?", self.slot),
            GmMode::Load => format!("Load {}?", self.slot),
        }
    }
}

/// GM console state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GmPhase {
    /// Console hidden.
    #[default]
    Closed,
    /// Console shown, nothing pending.
    Open,
    /// Waiting for the GM to confirm or decline.
    ConfirmPending(PendingGmAction),
    /// Showing the result of a confirmed action until the settle timer fires.
    Settling {
        /// Result message on display.
        message: String,
    },
}

/// How a confirmed action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GmResult {
    /// Snapshot written.
    Saved,
    /// Snapshot restored.
    Loaded,
    /// Load from a slot with nothing in it.
    EmptySlot,
    /// Snapshot could not be written.
    SaveFailed(String),
}

/// Outcome of [`GmConsole::confirm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmReport {
    /// The action that was confirmed.
    pub action: PendingGmAction,
    /// How it ended.
    pub result: GmResult,
    /// Message for the console.
    pub message: String,
}

/// The GM console state machine.
#[derive(Debug, Clone, Default)]
pub struct GmConsole {
    phase: GmPhase,
}

impl GmConsole {
    /// A closed console.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> &GmPhase {
        &self.phase
    }

    /// Whether the console is shown.
    pub fn is_open(&self) -> bool {
        self.phase != GmPhase::Closed
    }

    /// Show the console with nothing pending.
    pub fn open(&mut self) {
        self.phase = GmPhase::Open;
    }

    /// Stage a save or load and return its confirmation prompt.
    ///
    /// Accepted while open or settling; a newer request replaces an older one.
    pub fn request(&mut self, mode: GmMode, slot: SlotId) -> EngineResult<String> {
        if self.phase == GmPhase::Closed {
            return Err(EngineError::GmConsoleClosed);
        }
        let pending = PendingGmAction { mode, slot };
        self.phase = GmPhase::ConfirmPending(pending);
        Ok(pending.prompt())
    }

    /// Carry out the pending action and enter `Settling`.
    ///
    /// A failed save becomes a [`GmResult::SaveFailed`] message rather than an
    /// error; the console always ends up settling.
    pub fn confirm<S: SlotStorage>(
        &mut self,
        snapshots: &mut SnapshotStore<S>,
        state: &mut GameState,
    ) -> EngineResult<GmReport> {
        let GmPhase::ConfirmPending(action) = self.phase else {
            return Err(EngineError::NoPendingAction);
        };
        let slot = action.slot;
        let result = match action.mode {
            GmMode::Save => match snapshots.save(slot, &state.ledger, &state.history) {
                Ok(_) => GmResult::Saved,
                Err(e) => {
                    tracing::warn!(slot = slot.number(), error = %e, "save failed");
                    GmResult::SaveFailed(e.to_string())
                }
            },
            GmMode::Load => match snapshots.load(slot) {
                Some(snapshot) => {
                    state.restore(snapshot);
                    tracing::info!(slot = slot.number(), "snapshot restored");
                    GmResult::Loaded
                }
                None => GmResult::EmptySlot,
            },
        };
        let message = match &result {
            GmResult::Saved => format!("{slot} saved."),
            GmResult::Loaded => format!("{slot} loaded."),
            GmResult::EmptySlot => format!("{slot} is empty."),
            GmResult::SaveFailed(reason) => format!("{slot} save failed: {reason}"),
        };
        self.phase = GmPhase::Settling {
            message: message.clone(),
        };
        Ok(GmReport {
            action,
            result,
            message,
        })
    }

    /// Drop the pending action without side effects.
    pub fn decline(&mut self) -> EngineResult<()> {
        match self.phase {
            GmPhase::ConfirmPending(_) => {
                self.phase = GmPhase::Open;
                Ok(())
            }
            _ => Err(EngineError::NoPendingAction),
        }
    }

    /// Return from `Settling` to `Open`. Returns whether anything changed.
    pub fn settle(&mut self) -> bool {
        if matches!(self.phase, GmPhase::Settling { .. }) {
            self.phase = GmPhase::Open;
            true
        } else {
            false
        }
    }

    /// Hide the console and forget anything pending.
    pub fn close(&mut self) {
        self.phase = GmPhase::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MemorySlotStorage;
    use cb_core::{GameData, LogHistory};

    fn test_state() -> GameState {
        let data = GameData::parse(
            r#"{"players": {"a1": {"name": "Subject A", "mp": 50, "cred": 0}}}"#,
        )
        .unwrap();
        GameState::from(data)
    }

    fn slot(n: u8) -> SlotId {
        SlotId::new(n).unwrap()
    }

    #[test]
    fn request_requires_open_console() {
        let mut gm = GmConsole::new();
        assert!(matches!(
            gm.request(GmMode::Save, slot(1)),
            Err(EngineError::GmConsoleClosed)
        ));
        gm.open();
        assert_eq!(gm.request(GmMode::Save, slot(1)).unwrap(), "Save to SLOT 1?");
        assert_eq!(gm.request(GmMode::Load, slot(2)).unwrap(), "Load SLOT 2?");
        assert_eq!(
            gm.phase(),
            &GmPhase::ConfirmPending(PendingGmAction {
                mode: GmMode::Load,
                slot: slot(2)
            })
        );
    }

    #[test]
    fn confirm_without_request() {
        let mut gm = GmConsole::new();
        gm.open();
        let mut store = SnapshotStore::new(MemorySlotStorage::new());
        let mut state = test_state();
        assert!(matches!(
            gm.confirm(&mut store, &mut state),
            Err(EngineError::NoPendingAction)
        ));
    }

    #[test]
    fn save_then_load_restores_state() {
        let mut gm = GmConsole::new();
        let mut store = SnapshotStore::new(MemorySlotStorage::new());
        let mut state = test_state();
        state.history.record("first");
        gm.open();

        gm.request(GmMode::Save, slot(1)).unwrap();
        let report = gm.confirm(&mut store, &mut state).unwrap();
        assert_eq!(report.result, GmResult::Saved);
        assert_eq!(report.message, "SLOT 1 saved.");
        assert_eq!(
            gm.phase(),
            &GmPhase::Settling {
                message: "SLOT 1 saved.".to_string()
            }
        );

        state.ledger.get_mut("a1").unwrap().apply(-30, 0);
        state.history = LogHistory::new();

        gm.request(GmMode::Load, slot(1)).unwrap();
        let report = gm.confirm(&mut store, &mut state).unwrap();
        assert_eq!(report.result, GmResult::Loaded);
        assert_eq!(state.ledger.get("a1").unwrap().mp(), 50);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn load_from_empty_slot_changes_nothing() {
        let mut gm = GmConsole::new();
        let mut store = SnapshotStore::new(MemorySlotStorage::new());
        let mut state = test_state();
        let before = state.ledger.clone();
        gm.open();
        gm.request(GmMode::Load, slot(3)).unwrap();
        let report = gm.confirm(&mut store, &mut state).unwrap();
        assert_eq!(report.result, GmResult::EmptySlot);
        assert_eq!(report.message, "SLOT 3 is empty.");
        assert_eq!(state.ledger, before);
    }

    #[test]
    fn failed_save_is_reported_not_raised() {
        let mut gm = GmConsole::new();
        let mut store = SnapshotStore::new(MemorySlotStorage::read_only());
        let mut state = test_state();
        gm.open();
        gm.request(GmMode::Save, slot(2)).unwrap();
        let report = gm.confirm(&mut store, &mut state).unwrap();
        assert!(matches!(report.result, GmResult::SaveFailed(_)));
        assert!(report.message.starts_with("SLOT 2 save failed: "));
        assert!(matches!(gm.phase(), GmPhase::Settling { .. }));
    }

    #[test]
    fn decline_returns_to_open() {
        let mut gm = GmConsole::new();
        gm.open();
        assert!(gm.decline().is_err());
        gm.request(GmMode::Save, slot(1)).unwrap();
        gm.decline().unwrap();
        assert_eq!(gm.phase(), &GmPhase::Open);
    }

    #[test]
    fn settle_is_noop_outside_settling() {
        let mut gm = GmConsole::new();
        assert!(!gm.settle());
        gm.open();
        gm.request(GmMode::Save, slot(1)).unwrap();
        assert!(!gm.settle());
        assert!(matches!(gm.phase(), GmPhase::ConfirmPending(_)));
    }

    #[test]
    fn request_while_settling_supersedes_message() {
        let mut gm = GmConsole::new();
        let mut store = SnapshotStore::new(MemorySlotStorage::new());
        let mut state = test_state();
        gm.open();
        gm.request(GmMode::Save, slot(1)).unwrap();
        gm.confirm(&mut store, &mut state).unwrap();
        gm.request(GmMode::Load, slot(1)).unwrap();
        assert!(!gm.settle());
        assert!(matches!(gm.phase(), GmPhase::ConfirmPending(_)));
    }

    #[test]
    fn close_from_anywhere() {
        let mut gm = GmConsole::new();
        gm.open();
        gm.request(GmMode::Save, slot(1)).unwrap();
        gm.close();
        assert_eq!(gm.phase(), &GmPhase::Closed);
        assert!(!gm.is_open());
    }
}
