use std::path::Path;

use cb_engine::{SlotId, StatusReport};

pub fn run(
    key: &str,
    data_path: &Path,
    slot: Option<u8>,
    slots_dir: Option<&Path>,
) -> Result<(), String> {
    let report = match slot {
        Some(number) => {
            let slot = SlotId::new(number).map_err(|e| e.to_string())?;
            let store = super::open_snapshots(slots_dir)?;
            let snapshot = store
                .load(slot)
                .ok_or_else(|| format!("{slot} is empty"))?;
            StatusReport::lookup(&snapshot.players, key)
        }
        None => {
            let data = super::load_data(data_path);
            StatusReport::lookup(&data.players, key)
        }
    };

    println!("{report}");

    Ok(())
}
