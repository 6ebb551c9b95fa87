use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use colored::Colorize;

use cb_engine::presenter::DANGER_EFFECT;
use cb_engine::{EffectRequest, Presenter, Reveal, SlotId, SlotSummary};

/// Line-oriented presenter that types narration into stdout.
///
/// Narration is revealed synchronously, so every reveal is complete by the
/// time it returns.
pub struct TerminalPresenter {
    char_delay: Duration,
}

impl TerminalPresenter {
    pub fn new(char_delay: Duration) -> Self {
        Self { char_delay }
    }
}

impl Presenter for TerminalPresenter {
    fn reveal_narration(&mut self, text: &str) -> Reveal {
        println!();
        if self.char_delay.is_zero() {
            println!("{}", text.bold());
            return Reveal::Complete;
        }
        let mut out = io::stdout().lock();
        for ch in text.chars() {
            // A closed stdout just ends the reveal early.
            if write!(out, "{}", ch.to_string().bold())
                .and_then(|()| out.flush())
                .is_err()
            {
                break;
            }
            thread::sleep(self.char_delay);
        }
        let _ = writeln!(out);
        Reveal::Complete
    }

    fn show_status(&mut self, status: &str) {
        println!("{}", status.cyan());
    }

    fn play_effect(&mut self, request: &EffectRequest) {
        let tag = if request.name == DANGER_EFFECT {
            "[!! DANGER !!]".red().bold()
        } else {
            format!("[{}]", request.name).magenta()
        };
        println!("{tag}");
    }

    fn flash_alert(&mut self) {
        println!("{}", ">>> TRANSMITTING <<<".reversed());
    }

    fn render_log_line(&mut self, line: &str) {
        println!("{}", line.dimmed());
    }

    fn show_slot_metadata(&mut self, slot: SlotId, summary: Option<&SlotSummary>) {
        let description = SlotSummary::describe(summary).replace('\n', " / ");
        println!("  {}  {description}", slot.to_string().bold());
    }

    fn show_gm_message(&mut self, message: &str) {
        if !message.is_empty() {
            println!("  {}", message.green());
        }
    }

    fn clear_result(&mut self) {
        println!("{}", "-".repeat(40).dimmed());
    }
}
