//! Cellblock engine.
//!
//! Turns identity/action/supplement input into outcomes against a
//! [`cb_core::PlayerLedger`], drives the session cycle (submit, present,
//! acknowledge), runs the GM console's save/load flow, and persists snapshots
//! to three local slots. Presentation is delegated to a [`Presenter`].

pub mod config;
pub mod error;
pub mod gm;
pub mod narration;
pub mod outcome;
pub mod presenter;
pub mod resolver;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod status;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use gm::{GmConsole, GmMode, GmPhase, GmReport, GmResult, PendingGmAction};
pub use outcome::{Outcome, OutcomeKind};
pub use presenter::{EffectRequest, Presenter, PresenterCall, RecordingPresenter, Reveal};
pub use resolver::{ActionInput, ActionResolver};
pub use session::{NarrationState, SessionController, SessionPhase, Submission};
pub use snapshot::{
    FileSlotStorage, MemorySlotStorage, SlotId, SlotStorage, SlotSummary, Snapshot, SnapshotStore,
    StorageError,
};
pub use state::GameState;
pub use status::StatusReport;
