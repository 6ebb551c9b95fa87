//! Fixed wording for outcomes, status lines and log entries.

use cb_core::{AppliedDelta, Player};

/// Idle log line shown when the terminal is waiting for input. Never recorded.
pub const IDLE_LINE: &str = "SYSTEM READY. INPUT WAITING...";
/// Status line for outcomes that change nothing.
pub const NO_STATE_CHANGE: &str = "NO STATE CHANGE";
/// Status line for the invalid-access penalty.
pub const SYSTEM_PENALTY: &str = "SYSTEM PENALTY";
/// Narration when identity or action is missing.
pub const MISSING_INPUT: &str = "SYSTEM >> Identity and Action are required.";
/// Log entry when identity or action is missing.
pub const MISSING_INPUT_LOG: &str = "SYSTEM / missing input";
/// Status check reply for an unknown key.
pub const ACCESS_KEY_MISMATCH: &str = "SYSTEM >> Access key mismatch. No data to display.";

/// Signed delta: `+3`, `-2`, or `±0`.
pub fn format_delta(value: i64) -> String {
    match value {
        0 => "±0".to_string(),
        v if v > 0 => format!("+{v}"),
        v => v.to_string(),
    }
}

/// `MP <mp> (<Δ>) / CRED <cred> (<Δ>)`.
pub fn status_line(player: &Player, applied: AppliedDelta) -> String {
    format!(
        "MP {} ({}) / CRED {} ({})",
        player.mp(),
        format_delta(applied.mp),
        player.cred(),
        format_delta(applied.cred)
    )
}

/// Narration for a resolved rule.
pub fn resolved_text(name: &str, action: &str, supplement: &str, msg: &str) -> String {
    let supplement = if supplement.is_empty() { "none" } else { supplement };
    format!("{name} >> {action}\nSupplement: {supplement}\n{msg}")
        .trim()
        .to_string()
}

/// Log entry for a resolved rule.
pub fn resolved_log(name: &str, action: &str, applied: AppliedDelta) -> String {
    format!(
        "{name} / {action} / MP {} / CRED {}",
        format_delta(applied.mp),
        format_delta(applied.cred)
    )
}

/// Narration for the invalid-access penalty.
pub fn penalty_text(penalty: i64) -> String {
    format!(
        "WARDEN >> Oh? A suspicious access. Some re-education is in order.\n\
         WARNING: access key mismatch. All inmates MP -{penalty}."
    )
}

/// Log entry for the invalid-access penalty.
pub fn penalty_log(penalty: i64) -> String {
    format!("SYSTEM / suspicious access / MP -{penalty} (ALL)")
}

/// Narration for an action with no matching rule.
pub fn undefined_text(name: &str, action: &str) -> String {
    format!("{name} >> Undefined command \"{action}\".")
}

/// Log entry for an action with no matching rule.
pub fn undefined_log(name: &str, action: &str) -> String {
    format!("{name} / {action} / undefined")
}
