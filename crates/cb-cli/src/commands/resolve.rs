use std::path::Path;

use colored::Colorize;

use cb_engine::{ActionInput, ActionResolver, EngineConfig};

pub fn run(
    data_path: &Path,
    identity: &str,
    action: &str,
    supplement: Option<&str>,
) -> Result<(), String> {
    let mut data = super::load_data(data_path);
    let config = EngineConfig::default();
    let resolver = ActionResolver::new(&data.rules, &data.settings, config.low_mp_threshold);
    let input = ActionInput::new(identity, action, supplement.unwrap_or_default());
    let outcome = resolver.resolve(&mut data.players, &input);

    println!("{}", outcome.text.bold());
    println!("{}", outcome.status.cyan());
    println!("  log: {}", outcome.log);
    if let Some(effect) = &outcome.effect {
        println!("  effect: {effect}");
    }
    if outcome.danger {
        println!("  {}", "DANGER".red().bold());
    }

    Ok(())
}
