use std::fs;
use std::path::Path;

const TEMPLATE: &str = include_str!("../../../../assets/data/game-data.json");

pub fn run(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("'{}' already exists", path.display()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| format!("cannot create directory: {e}"))?;
    }
    fs::write(path, TEMPLATE).map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    println!("Created game data at {}", path.display());
    println!();
    println!("Get started:");
    println!("  cellblock check --data {}", path.display());
    println!("  cellblock play --data {}", path.display());

    Ok(())
}
