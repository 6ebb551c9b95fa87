use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use colored::Colorize;

use cb_engine::{
    ActionInput, EngineConfig, GmMode, Presenter, SessionController, SlotId, SlotStorage,
    StatusReport, Submission,
};

use crate::presenter::TerminalPresenter;

const HELP: &str = "\
  Enter an identity, then an action, then an optional supplement.
  Commands at the identity prompt:
    :status <key>   show a player's status
    :log            show recent log lines
    :help           show this help
    :quit           leave the terminal";

const GM_HELP: &str = "\
  GM CONSOLE
    save <1-3>   save the current state to a slot
    load <1-3>   load a slot
    close        leave the console";

pub fn run(
    data_path: &Path,
    slots_dir: Option<&Path>,
    speed_ms: u64,
    no_typing: bool,
) -> Result<(), String> {
    let data = super::load_data(data_path);
    let storage = super::open_storage(slots_dir)?;

    let config = if no_typing {
        EngineConfig::default().without_delays()
    } else {
        EngineConfig::default().with_narration_char_delay(Duration::from_millis(speed_ms))
    };
    let mut presenter = TerminalPresenter::new(config.narration_char_delay);
    let mut session = SessionController::new(data, storage, config);

    println!("  {} Cellblock terminal", "Connecting".bold());
    println!(
        "  {} inmates on file | {} rules loaded",
        session.ledger().len(),
        session.state().rules.len()
    );
    println!("  Type :help for commands, :quit to exit.\n");
    session.start(&mut presenter);

    let stdin = io::stdin();
    let mut reader = stdin.lock();

    loop {
        let Some(identity) = prompt(&mut reader, "identity> ")? else {
            break;
        };
        if let Some(command) = identity.trim().strip_prefix(':') {
            if !meta_command(&session, command) {
                break;
            }
            continue;
        }
        let Some(action) = prompt(&mut reader, "action> ")? else {
            break;
        };
        let Some(supplement) = prompt(&mut reader, "supplement> ")? else {
            break;
        };

        let input = ActionInput::new(identity, action, supplement);
        match session.submit(&mut presenter, &input) {
            Ok(Submission::GmConsoleOpened) => gm_console(&mut session, &mut presenter, &mut reader)?,
            Ok(Submission::Resolved(_)) => {
                let more = prompt(&mut reader, "[Enter] ")?.is_some();
                session
                    .acknowledge(&mut presenter)
                    .map_err(|e| e.to_string())?;
                if !more {
                    break;
                }
            }
            Err(e) => println!("{}\n", e.to_string().yellow()),
        }
    }

    println!("\n  Connection closed.");
    Ok(())
}

/// Handle a `:command`. Returns `false` to leave the terminal.
fn meta_command<S: SlotStorage>(session: &SessionController<S>, command: &str) -> bool {
    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, arg)| (name, arg.trim()));
    match name {
        "quit" | "q" => return false,
        "status" if !arg.is_empty() => match session.status_check(arg) {
            StatusReport::NotFound => println!("{}\n", StatusReport::NotFound.to_string().yellow()),
            report => println!("{report}\n"),
        },
        "log" => {
            for line in session.history().recent(10) {
                println!("  {line}");
            }
            println!();
        }
        "help" => println!("{HELP}\n"),
        _ => println!("{}\n", format!("unknown command: :{command}").yellow()),
    }
    true
}

fn gm_console<S: SlotStorage>(
    session: &mut SessionController<S>,
    presenter: &mut dyn Presenter,
    reader: &mut impl BufRead,
) -> Result<(), String> {
    println!("{GM_HELP}");

    loop {
        let Some(line) = prompt(reader, "gm> ")? else {
            break;
        };
        let mut words = line.split_whitespace();
        let mode = match words.next() {
            Some("save") => GmMode::Save,
            Some("load") => GmMode::Load,
            Some("close" | "exit" | "quit") => break,
            Some(other) => {
                println!("{}", format!("unknown GM command: {other}").yellow());
                continue;
            }
            None => continue,
        };
        let slot = match words.next().map(str::parse::<SlotId>) {
            Some(Ok(slot)) => slot,
            Some(Err(e)) => {
                println!("{}", e.to_string().yellow());
                continue;
            }
            None => {
                println!("{}", "which slot? (1-3)".yellow());
                continue;
            }
        };

        let question = session.gm_request(mode, slot).map_err(|e| e.to_string())?;
        let answer = prompt(reader, &format!("{question} [y/N] "))?;
        if answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y")) {
            session.gm_confirm(presenter).map_err(|e| e.to_string())?;
            thread::sleep(session.config().gm_settle_delay);
            session.gm_settle(presenter);
        } else {
            session.gm_decline(presenter).map_err(|e| e.to_string())?;
            println!("  cancelled");
        }
    }

    session.gm_close();
    println!("  GM console closed.\n");
    Ok(())
}

/// Print a prompt and read one line. `None` at end of input.
fn prompt(reader: &mut impl BufRead, label: &str) -> Result<Option<String>, String> {
    print!("{label}");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(line.trim_end_matches(['\n', '\r']).to_string())),
        Err(e) => Err(e.to_string()),
    }
}
