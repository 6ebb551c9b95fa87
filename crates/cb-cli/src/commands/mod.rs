pub mod check;
pub mod init;
pub mod play;
pub mod resolve;
pub mod slots;
pub mod status;

use std::path::{Path, PathBuf};

use cb_core::GameData;
use cb_engine::{FileSlotStorage, SnapshotStore};
use directories::ProjectDirs;

/// Load game data, printing a note when it fell back to empty data.
fn load_data(path: &Path) -> GameData {
    let data = GameData::load(path);
    tracing::debug!(
        path = %path.display(),
        players = data.players.len(),
        rules = data.rules.len(),
        "game data ready"
    );
    if !data.issues.is_empty() {
        eprintln!(
            "  {} problem(s) in {}; run `cellblock check` for details",
            data.issues.len(),
            path.display()
        );
    }
    data
}

/// Save slot directory: the explicit one, else the platform data directory.
fn slot_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    ProjectDirs::from("", "", "cellblock")
        .map(|dirs| dirs.data_dir().join("slots"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Open file-backed slot storage in the slot directory.
fn open_storage(explicit: Option<&Path>) -> Result<FileSlotStorage, String> {
    let dir = slot_dir(explicit);
    FileSlotStorage::open(&dir)
        .map_err(|e| format!("cannot open slot directory {}: {e}", dir.display()))
}

/// Open the snapshot store over the slot directory.
fn open_snapshots(explicit: Option<&Path>) -> Result<SnapshotStore<FileSlotStorage>, String> {
    open_storage(explicit).map(SnapshotStore::new)
}
