use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(slots_dir: Option<&Path>) -> Result<(), String> {
    let store = super::open_snapshots(slots_dir)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Slot", "Saved", "Logs", "Players"]);

    for (slot, summary) in store.summaries() {
        match summary {
            Some(s) => table.add_row(vec![
                slot.to_string(),
                s.saved_at_local(),
                s.log_count.to_string(),
                s.player_count.to_string(),
            ]),
            None => table.add_row(vec![
                slot.to_string(),
                "EMPTY".to_string(),
                "-".to_string(),
                "-".to_string(),
            ]),
        };
    }

    println!("{table}");
    println!();
    println!("  slots in {}", store.storage().dir().display());

    Ok(())
}
