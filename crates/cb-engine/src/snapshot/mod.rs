//! Versioned snapshots of the ledger and log history in three local slots.

mod file;
mod memory;
mod storage;

use std::fmt;
use std::str::FromStr;

use cb_core::{LogHistory, PlayerLedger};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub use file::FileSlotStorage;
pub use memory::MemorySlotStorage;
pub use storage::{SlotStorage, StorageError};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

const SLOT_KEY_PREFIX: &str = "cellblock-slot-";

/// A save slot number, 1 through 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u8);

impl SlotId {
    /// Every slot, in order.
    pub const ALL: [SlotId; 3] = [SlotId(1), SlotId(2), SlotId(3)];

    /// Validate a slot number.
    pub fn new(number: u8) -> EngineResult<Self> {
        if (1..=3).contains(&number) {
            Ok(Self(number))
        } else {
            Err(EngineError::InvalidSlot(number.to_string()))
        }
    }

    /// The slot number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// Storage key, e.g. `cellblock-slot-2`.
    pub fn storage_key(self) -> String {
        format!("{SLOT_KEY_PREFIX}{}", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SLOT {}", self.0)
    }
}

impl TryFrom<u8> for SlotId {
    type Error = EngineError;

    fn try_from(number: u8) -> EngineResult<Self> {
        Self::new(number)
    }
}

impl FromStr for SlotId {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| EngineError::InvalidSlot(s.to_string()))
            .and_then(Self::new)
    }
}

/// A complete copy of the ledger and history at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Format version.
    #[serde(default = "current_version")]
    pub version: u32,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
    /// Player records, keyed as stored.
    pub players: PlayerLedger,
    /// Log lines.
    #[serde(default)]
    pub log_history: LogHistory,
}

fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

impl Snapshot {
    /// Deep-copy the ledger and history, stamped now.
    pub fn capture(ledger: &PlayerLedger, history: &LogHistory) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            players: ledger.clone(),
            log_history: history.clone(),
        }
    }

    /// Metadata for slot listings.
    pub fn summary(&self) -> SlotSummary {
        SlotSummary {
            version: self.version,
            saved_at: self.saved_at,
            log_count: self.log_history.len(),
            player_count: self.players.len(),
        }
    }
}

/// What a slot listing shows about a saved snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSummary {
    /// Format version.
    pub version: u32,
    /// When it was saved.
    pub saved_at: DateTime<Utc>,
    /// Number of log lines.
    pub log_count: usize,
    /// Number of players.
    pub player_count: usize,
}

impl SlotSummary {
    /// Save time in local time, `YYYY/MM/DD HH:MM:SS`.
    pub fn saved_at_local(&self) -> String {
        self.saved_at
            .with_timezone(&Local)
            .format("%Y/%m/%d %H:%M:%S")
            .to_string()
    }

    /// Two-line description, or `EMPTY` for an unused slot.
    pub fn describe(summary: Option<&SlotSummary>) -> String {
        match summary {
            Some(s) => format!("SAVED: {}\nLOGS: {}", s.saved_at_local(), s.log_count),
            None => "EMPTY".to_string(),
        }
    }
}

/// Reads and writes snapshots through a [`SlotStorage`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore<S> {
    storage: S,
}

impl<S: SlotStorage> SnapshotStore<S> {
    /// Wrap a storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Capture and persist a snapshot.
    pub fn save(
        &mut self,
        slot: SlotId,
        ledger: &PlayerLedger,
        history: &LogHistory,
    ) -> EngineResult<Snapshot> {
        let snapshot = Snapshot::capture(ledger, history);
        let payload = serde_json::to_string_pretty(&snapshot)?;
        self.storage.write(&slot.storage_key(), &payload)?;
        tracing::info!(
            slot = slot.number(),
            players = snapshot.players.len(),
            logs = snapshot.log_history.len(),
            "snapshot saved"
        );
        Ok(snapshot)
    }

    /// Read a snapshot. Missing, unreadable and unparsable slots are all `None`.
    pub fn load(&self, slot: SlotId) -> Option<Snapshot> {
        let payload = match self.storage.read(&slot.storage_key()) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(slot = slot.number(), error = %e, "slot unreadable");
                return None;
            }
        };
        let snapshot: Snapshot = match serde_json::from_str(&payload) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(slot = slot.number(), error = %e, "slot holds an invalid snapshot");
                return None;
            }
        };
        if snapshot.version != SNAPSHOT_VERSION {
            tracing::warn!(
                slot = slot.number(),
                version = snapshot.version,
                expected = SNAPSHOT_VERSION,
                "snapshot version mismatch, loading anyway"
            );
        }
        Some(snapshot)
    }

    /// Metadata for one slot.
    pub fn summary(&self, slot: SlotId) -> Option<SlotSummary> {
        self.load(slot).map(|s| s.summary())
    }

    /// Metadata for every slot, in order.
    pub fn summaries(&self) -> Vec<(SlotId, Option<SlotSummary>)> {
        SlotId::ALL
            .iter()
            .map(|&slot| (slot, self.summary(slot)))
            .collect()
    }
}
