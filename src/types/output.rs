//! Per-tick output for the visualization sink

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CountdownPhase, CountdownState, FrameResult, GameSymbol, IntentKind, ReasonCode};

/// Discrete event produced by one engine tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TickEvent {
    /// A hold countdown armed this tick
    CountdownStarted { kind: IntentKind },
    /// One whole second of hold elapsed
    CountdownTicked { kind: IntentKind, ticks_remaining: u8 },
    /// The running countdown was cancelled before completion
    CountdownCancelled { kind: IntentKind, reason: ReasonCode },
    /// Main move confirmed; label is the re-sampled gesture, None on fallback
    MoveConfirmed {
        symbol: GameSymbol,
        label: Option<String>,
        reason: ReasonCode,
    },
    /// A special intent completed and its effect should fire
    SpecialFired { kind: IntentKind },
    /// A special intent completed but re-validation failed; no effect
    SpecialSkipped { kind: IntentKind, reason: ReasonCode },
    /// A special intent's refractory period expired
    CooldownEnded { kind: IntentKind },
}

/// Snapshot of one engine tick: inputs, per-kind countdown state and the
/// events the tick produced. Purely observational; nothing feeds back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickOutput {
    pub timestamp: DateTime<Utc>,
    pub hand_present: bool,
    pub confidence: f64,
    pub gesture_label: Option<String>,
    pub round_active: bool,
    pub countdowns: Vec<CountdownState>,
    pub events: Vec<TickEvent>,
}

impl TickOutput {
    /// Build a snapshot from the tick's inputs and results
    pub fn new(
        frame: &FrameResult,
        round_active: bool,
        countdowns: Vec<CountdownState>,
        events: Vec<TickEvent>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            hand_present: frame.hand_present,
            confidence: frame.confidence,
            gesture_label: frame.label().map(str::to_string),
            round_active,
            countdowns,
            events,
        }
    }

    /// State record for one kind
    pub fn countdown(&self, kind: IntentKind) -> &CountdownState {
        &self.countdowns[kind.index()]
    }

    /// The kind currently counting, if any
    pub fn counting_kind(&self) -> Option<IntentKind> {
        self.countdowns.iter().find(|s| s.is_counting()).map(|s| s.kind)
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let phase = self
            .counting_kind()
            .map(|k| self.countdown(k).phase)
            .unwrap_or(CountdownPhase::Idle);
        let color = phase.color_code();
        let reset = CountdownPhase::color_reset();

        let hand = if self.hand_present {
            format!(
                "{} {:.0}%",
                self.gesture_label.as_deref().unwrap_or("?"),
                self.confidence
            )
        } else {
            "no hand".to_string()
        };

        let countdown = match self.counting_kind() {
            Some(kind) => format!(
                "{} holding, {}s left",
                kind,
                self.countdown(kind).ticks_remaining
            ),
            None => "idle".to_string(),
        };

        format!("{}[{}] {} | round={}{}", color, hand, countdown, self.round_active, reset)
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let label = self.gesture_label.as_deref().unwrap_or("-");
        let countdown = match self.counting_kind() {
            Some(kind) => format!("{}:{}", kind, self.countdown(kind).ticks_remaining),
            None => "-".to_string(),
        };
        format!(
            "hand={} | label={} | conf={:.0} | counting={} | round={} | events={}",
            self.hand_present,
            label,
            self.confidence,
            countdown,
            self.round_active,
            self.events.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CountdownState;

    fn idle_states() -> Vec<CountdownState> {
        IntentKind::EVAL_ORDER.iter().map(|k| CountdownState::idle(*k)).collect()
    }

    #[test]
    fn test_counting_kind_none_when_idle() {
        let out = TickOutput::new(&FrameResult::no_hand(), false, idle_states(), vec![]);
        assert_eq!(out.counting_kind(), None);
    }

    #[test]
    fn test_counting_kind_reported() {
        let mut states = idle_states();
        states[IntentKind::SpecialA.index()].start();
        let out = TickOutput::new(&FrameResult::hand("Three", 95.0), true, states, vec![]);
        assert_eq!(out.counting_kind(), Some(IntentKind::SpecialA));
    }

    #[test]
    fn test_skipped_event_carries_reason() {
        let e = TickEvent::SpecialSkipped {
            kind: IntentKind::SpecialA,
            reason: ReasonCode::R303_SPECIAL_SKIPPED,
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("SPECIAL_SKIPPED"));
        assert!(json.contains("R303_SPECIAL_SKIPPED"));
    }

    #[test]
    fn test_parseable_string_has_no_ansi() {
        let out = TickOutput::new(&FrameResult::hand("Open_Palm", 90.0), true, idle_states(), vec![]);
        assert!(!out.to_parseable_string().contains('\x1b'));
    }
}
