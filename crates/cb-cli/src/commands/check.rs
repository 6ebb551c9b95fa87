use std::path::Path;

use colored::Colorize;

use cb_core::GameData;

pub fn run(path: &Path) -> Result<(), String> {
    let data = GameData::try_load(path).map_err(|e| e.to_string())?;

    for issue in &data.issues {
        println!("  {} {issue}", "warning:".yellow().bold());
    }

    println!(
        "  {} players, {} rules, invalid access penalty {}",
        data.players.len(),
        data.rules.len(),
        data.settings.invalid_access_penalty()
    );

    if data.issues.is_empty() {
        println!("  All checks passed for '{}'.", path.display());
        Ok(())
    } else {
        Err(format!("{} problem(s) found", data.issues.len()))
    }
}
