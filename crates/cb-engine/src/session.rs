//! The session controller: one resolve cycle at a time.
//!
//! A cycle runs submit, then present, then acknowledge. Submitting flashes
//! the alert, resolves the input, records and renders the log line, plays
//! effects, then reveals narration. The status line follows once narration
//! has been revealed. Acknowledging clears the result and returns to idle.

use cb_core::{GameData, LogHistory, PlayerLedger, history::stamped_line};
use chrono::Local;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::gm::{GmConsole, GmMode, GmPhase, GmReport, GmResult};
use crate::narration::IDLE_LINE;
use crate::outcome::Outcome;
use crate::presenter::{Presenter, Reveal, effect_plan};
use crate::resolver::{ActionInput, ActionResolver};
use crate::snapshot::{SlotId, SlotStorage, SnapshotStore};
use crate::state::GameState;
use crate::status::StatusReport;

/// Progress of the narration reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationState {
    /// Still being revealed by the presenter.
    Revealing,
    /// Fully shown, status line displayed.
    Revealed,
}

/// Where the session is in its cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for input.
    #[default]
    Idle,
    /// Resolving a submission.
    Resolving,
    /// Showing a result until acknowledged.
    Presenting {
        /// The result on display.
        outcome: Outcome,
        /// Narration progress.
        narration: NarrationState,
    },
}

/// What a submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The GM sentinel opened the console; nothing was resolved.
    GmConsoleOpened,
    /// The input was resolved and is now being presented.
    Resolved(Outcome),
}

/// Drives sessions over a game state and a snapshot store.
#[derive(Debug)]
pub struct SessionController<S> {
    config: EngineConfig,
    state: GameState,
    snapshots: SnapshotStore<S>,
    phase: SessionPhase,
    gm: GmConsole,
}

impl<S: SlotStorage> SessionController<S> {
    /// Create a controller over loaded game data.
    pub fn new(data: GameData, storage: S, config: EngineConfig) -> Self {
        Self {
            config,
            state: GameState::from(data),
            snapshots: SnapshotStore::new(storage),
            phase: SessionPhase::Idle,
            gm: GmConsole::new(),
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Current GM console phase.
    pub fn gm_phase(&self) -> &GmPhase {
        self.gm.phase()
    }

    /// Player records.
    pub fn ledger(&self) -> &PlayerLedger {
        &self.state.ledger
    }

    /// Recorded log lines.
    pub fn history(&self) -> &LogHistory {
        &self.state.history
    }

    /// Game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Snapshot store.
    pub fn snapshots(&self) -> &SnapshotStore<S> {
        &self.snapshots
    }

    /// Render the idle log line.
    pub fn start(&mut self, presenter: &mut dyn Presenter) {
        render_idle(presenter);
    }

    /// Submit raw input.
    pub fn submit(
        &mut self,
        presenter: &mut dyn Presenter,
        input: &ActionInput,
    ) -> EngineResult<Submission> {
        if self.gm.is_open() {
            return Err(EngineError::GmConsoleOpen);
        }
        if self.phase != SessionPhase::Idle {
            return Err(EngineError::Busy);
        }
        if self.config.is_gm_sentinel(&input.identity, &input.action) {
            tracing::info!("GM console opened");
            self.gm.open();
            self.refresh_slots(presenter);
            return Ok(Submission::GmConsoleOpened);
        }

        presenter.flash_alert();
        self.phase = SessionPhase::Resolving;
        let resolver = ActionResolver::new(
            &self.state.rules,
            &self.state.settings,
            self.config.low_mp_threshold,
        );
        let outcome = resolver.resolve(&mut self.state.ledger, input);

        let line = self.state.history.record(&outcome.log);
        presenter.render_log_line(&line);
        for request in effect_plan(&self.config, &outcome) {
            presenter.play_effect(&request);
        }
        let narration = match presenter.reveal_narration(&outcome.text) {
            Reveal::Complete => {
                presenter.show_status(&outcome.status);
                NarrationState::Revealed
            }
            Reveal::Pending => NarrationState::Revealing,
        };
        self.phase = SessionPhase::Presenting {
            outcome: outcome.clone(),
            narration,
        };
        Ok(Submission::Resolved(outcome))
    }

    /// Report that a pending narration reveal finished. Shows the status line.
    /// Returns whether anything changed.
    pub fn narration_finished(&mut self, presenter: &mut dyn Presenter) -> bool {
        let SessionPhase::Presenting { outcome, narration } = &mut self.phase else {
            return false;
        };
        if *narration != NarrationState::Revealing {
            return false;
        }
        presenter.show_status(&outcome.status);
        *narration = NarrationState::Revealed;
        true
    }

    /// Dismiss the result and return to idle.
    pub fn acknowledge(&mut self, presenter: &mut dyn Presenter) -> EngineResult<()> {
        match &self.phase {
            SessionPhase::Presenting {
                narration: NarrationState::Revealed,
                ..
            } => {
                self.phase = SessionPhase::Idle;
                presenter.clear_result();
                render_idle(presenter);
                Ok(())
            }
            SessionPhase::Presenting { .. } => Err(EngineError::NarrationInProgress),
            SessionPhase::Idle | SessionPhase::Resolving => Err(EngineError::NothingToAcknowledge),
        }
    }

    /// Look up a player's status. Never mutates state.
    pub fn status_check(&self, key: &str) -> StatusReport {
        StatusReport::lookup(&self.state.ledger, key)
    }

    /// Stage a GM save or load; returns the confirmation prompt.
    pub fn gm_request(&mut self, mode: GmMode, slot: SlotId) -> EngineResult<String> {
        self.gm.request(mode, slot)
    }

    /// Confirm the staged GM action.
    pub fn gm_confirm(&mut self, presenter: &mut dyn Presenter) -> EngineResult<GmReport> {
        let report = self.gm.confirm(&mut self.snapshots, &mut self.state)?;
        if report.result == GmResult::Loaded {
            render_idle(presenter);
        }
        presenter.show_gm_message(&report.message);
        self.refresh_slots(presenter);
        Ok(report)
    }

    /// Decline the staged GM action and clear the confirmation message.
    pub fn gm_decline(&mut self, presenter: &mut dyn Presenter) -> EngineResult<()> {
        self.gm.decline()?;
        presenter.show_gm_message("");
        Ok(())
    }

    /// Settle timer fired. Returns whether the console went back to open.
    pub fn gm_settle(&mut self, presenter: &mut dyn Presenter) -> bool {
        let settled = self.gm.settle();
        if settled {
            presenter.show_gm_message("");
        }
        settled
    }

    /// Close the GM console.
    pub fn gm_close(&mut self) {
        if self.gm.is_open() {
            tracing::info!("GM console closed");
        }
        self.gm.close();
    }

    fn refresh_slots(&self, presenter: &mut dyn Presenter) {
        for (slot, summary) in self.snapshots.summaries() {
            presenter.show_slot_metadata(slot, summary.as_ref());
        }
    }
}

fn render_idle(presenter: &mut dyn Presenter) {
    presenter.render_log_line(&stamped_line(&Local::now(), IDLE_LINE));
}
