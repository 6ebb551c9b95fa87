//! The presentation boundary.
//!
//! The engine decides *what* to show; a [`Presenter`] decides *how*. Timers
//! belong to the presenter: a presenter that reveals narration over time
//! returns [`Reveal::Pending`] and the front end later reports completion to
//! the session.

use std::time::Duration;

use crate::config::EngineConfig;
use crate::outcome::Outcome;
use crate::snapshot::{SlotId, SlotSummary};

/// Name of the effect played for dangerous outcomes.
pub const DANGER_EFFECT: &str = "danger";

/// Whether narration finished during [`Presenter::reveal_narration`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reveal {
    /// Fully shown.
    #[default]
    Complete,
    /// Still revealing; completion is reported later.
    Pending,
}

/// A timed presentation effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectRequest {
    /// Symbolic effect name.
    pub name: String,
    /// How long the effect plays.
    pub duration: Duration,
    /// How long to wait before starting.
    pub delay: Duration,
}

/// Effects to play for an outcome, in order.
///
/// A rule effect plays first. Danger plays alone, or after a delay when a rule
/// effect is already playing.
pub fn effect_plan(config: &EngineConfig, outcome: &Outcome) -> Vec<EffectRequest> {
    let mut plan = Vec::new();
    if let Some(name) = &outcome.effect {
        plan.push(EffectRequest {
            name: name.clone(),
            duration: config.effect_duration,
            delay: Duration::ZERO,
        });
    }
    if outcome.danger {
        let (duration, delay) = if plan.is_empty() {
            (config.danger_duration, Duration::ZERO)
        } else {
            (config.danger_after_effect_duration, config.danger_after_effect_delay)
        };
        plan.push(EffectRequest {
            name: DANGER_EFFECT.to_string(),
            duration,
            delay,
        });
    }
    plan
}

/// Front-end hooks invoked by the session.
pub trait Presenter {
    /// Start revealing narration.
    fn reveal_narration(&mut self, text: &str) -> Reveal;
    /// Show the status line.
    fn show_status(&mut self, status: &str);
    /// Play a timed effect.
    fn play_effect(&mut self, request: &EffectRequest);
    /// Brief alert flash on submit.
    fn flash_alert(&mut self);
    /// Show a log line.
    fn render_log_line(&mut self, line: &str);
    /// Show one slot's metadata in the GM console.
    fn show_slot_metadata(&mut self, slot: SlotId, summary: Option<&SlotSummary>);
    /// Show a GM console message.
    fn show_gm_message(&mut self, message: &str);
    /// Clear the result display.
    fn clear_result(&mut self);
}

/// One recorded presenter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    /// [`Presenter::reveal_narration`].
    Narration(String),
    /// [`Presenter::show_status`].
    Status(String),
    /// [`Presenter::play_effect`].
    Effect(EffectRequest),
    /// [`Presenter::flash_alert`].
    Flash,
    /// [`Presenter::render_log_line`].
    LogLine(String),
    /// [`Presenter::show_slot_metadata`].
    SlotMetadata {
        /// Slot shown.
        slot: SlotId,
        /// Its metadata, if saved.
        summary: Option<SlotSummary>,
    },
    /// [`Presenter::show_gm_message`].
    GmMessage(String),
    /// [`Presenter::clear_result`].
    ClearResult,
}

/// Presenter that records every call, for headless use and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    calls: Vec<PresenterCall>,
    reveal: Reveal,
}

impl RecordingPresenter {
    /// A presenter whose narration completes immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// A presenter whose narration stays pending.
    pub fn deferred() -> Self {
        Self {
            calls: Vec::new(),
            reveal: Reveal::Pending,
        }
    }

    /// Calls so far.
    pub fn calls(&self) -> &[PresenterCall] {
        &self.calls
    }

    /// Drain recorded calls.
    pub fn take(&mut self) -> Vec<PresenterCall> {
        std::mem::take(&mut self.calls)
    }

    /// Log lines rendered so far.
    pub fn log_lines(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PresenterCall::LogLine(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    /// GM messages shown so far.
    pub fn gm_messages(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PresenterCall::GmMessage(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn reveal_narration(&mut self, text: &str) -> Reveal {
        self.calls.push(PresenterCall::Narration(text.to_string()));
        self.reveal
    }

    fn show_status(&mut self, status: &str) {
        self.calls.push(PresenterCall::Status(status.to_string()));
    }

    fn play_effect(&mut self, request: &EffectRequest) {
        self.calls.push(PresenterCall::Effect(request.clone()));
    }

    fn flash_alert(&mut self) {
        self.calls.push(PresenterCall::Flash);
    }

    fn render_log_line(&mut self, line: &str) {
        self.calls.push(PresenterCall::LogLine(line.to_string()));
    }

    fn show_slot_metadata(&mut self, slot: SlotId, summary: Option<&SlotSummary>) {
        self.calls.push(PresenterCall::SlotMetadata {
            slot,
            summary: summary.cloned(),
        });
    }

    fn show_gm_message(&mut self, message: &str) {
        self.calls.push(PresenterCall::GmMessage(message.to_string()));
    }

    fn clear_result(&mut self) {
        self.calls.push(PresenterCall::ClearResult);
    }
}
