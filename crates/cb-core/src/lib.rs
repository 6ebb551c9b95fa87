//! Core data model for Cellblock.
//!
//! Player records and the ledger that owns them, action rules with their
//! supplement filters and best-match lookup, system settings, the timestamped
//! log history, and lenient loading of the static game data file. Everything
//! here is plain data plus pure lookups; resolution, sessions and persistence
//! live in `cb-engine`.

pub mod data;
pub mod error;
pub mod history;
pub mod ledger;
mod lenient;
pub mod player;
pub mod rules;
pub mod settings;

pub use data::{DataIssue, GameData};
pub use error::{CoreError, CoreResult};
pub use history::LogHistory;
pub use ledger::PlayerLedger;
pub use player::{AppliedDelta, Player, normalize_action, normalize_identity};
pub use rules::{ActionRule, RuleDefinition, RuleStore, SupplementFilter};
pub use settings::SystemSettings;
