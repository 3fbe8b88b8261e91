//! Per-intent countdown state

use serde::{Deserialize, Serialize};

use crate::types::IntentKind;
use crate::HOLD_TICKS;

/// Phase of one intent's hold-to-confirm timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CountdownPhase {
    /// No countdown running, eligible to start
    Idle,
    /// Hold in progress, ticking down
    Counting,
    /// Completed recently, re-arm suppressed (special intents only)
    Cooldown,
}

impl CountdownPhase {
    /// ANSI color for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            CountdownPhase::Idle => "\x1b[90m",     // Gray
            CountdownPhase::Counting => "\x1b[33m", // Yellow
            CountdownPhase::Cooldown => "\x1b[36m", // Cyan
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for CountdownPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CountdownPhase::Idle => "IDLE",
            CountdownPhase::Counting => "COUNTING",
            CountdownPhase::Cooldown => "COOLDOWN",
        };
        write!(f, "{}", name)
    }
}

/// Mutable countdown record for one intent kind.
///
/// One instance per kind, created at engine construction and reset in place,
/// never replaced. At most one instance across all kinds is Counting at any
/// instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    pub kind: IntentKind,
    pub phase: CountdownPhase,
    /// Whole seconds left before the hold confirms
    pub ticks_remaining: u8,
    /// Sub-second accumulator toward the next tick (milliseconds)
    #[serde(skip)]
    pub hold_acc_ms: u64,
    /// Remaining refractory time (milliseconds, special intents only)
    pub cooldown_remaining_ms: u64,
}

impl CountdownState {
    /// Fresh idle state for a kind
    pub fn idle(kind: IntentKind) -> Self {
        Self {
            kind,
            phase: CountdownPhase::Idle,
            ticks_remaining: HOLD_TICKS,
            hold_acc_ms: 0,
            cooldown_remaining_ms: 0,
        }
    }

    /// Is the hold timer running?
    pub fn is_counting(&self) -> bool {
        self.phase == CountdownPhase::Counting
    }

    /// Is re-arming suppressed?
    pub fn on_cooldown(&self) -> bool {
        self.cooldown_remaining_ms > 0
    }

    /// Enter Counting with a full hold
    pub fn start(&mut self) {
        self.phase = CountdownPhase::Counting;
        self.ticks_remaining = HOLD_TICKS;
        self.hold_acc_ms = 0;
    }

    /// Back to Idle with the visual count reset. Used for both cancellation
    /// and post-completion reset; preserves any running cooldown clock.
    pub fn reset_hold(&mut self) {
        self.phase = if self.on_cooldown() {
            CountdownPhase::Cooldown
        } else {
            CountdownPhase::Idle
        };
        self.ticks_remaining = HOLD_TICKS;
        self.hold_acc_ms = 0;
    }

    /// Enter the post-completion refractory period
    pub fn enter_cooldown(&mut self, duration_ms: u64) {
        self.phase = CountdownPhase::Cooldown;
        self.ticks_remaining = HOLD_TICKS;
        self.hold_acc_ms = 0;
        self.cooldown_remaining_ms = duration_ms;
    }

    /// Advance the cooldown clock; returns true when it expires this call.
    /// Runs independently of hand presence and qualification.
    pub fn advance_cooldown(&mut self, delta_ms: u64) -> bool {
        if self.cooldown_remaining_ms == 0 {
            return false;
        }
        self.cooldown_remaining_ms = self.cooldown_remaining_ms.saturating_sub(delta_ms);
        if self.cooldown_remaining_ms == 0 {
            if self.phase == CountdownPhase::Cooldown {
                self.phase = CountdownPhase::Idle;
            }
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_initial_values() {
        let s = CountdownState::idle(IntentKind::MainMove);
        assert_eq!(s.phase, CountdownPhase::Idle);
        assert_eq!(s.ticks_remaining, HOLD_TICKS);
        assert!(!s.on_cooldown());
    }

    #[test]
    fn test_reset_hold_restores_ticks() {
        let mut s = CountdownState::idle(IntentKind::MainMove);
        s.start();
        s.ticks_remaining = 1;
        s.reset_hold();
        assert_eq!(s.phase, CountdownPhase::Idle);
        assert_eq!(s.ticks_remaining, HOLD_TICKS);
        assert_eq!(s.hold_acc_ms, 0);
    }

    #[test]
    fn test_cooldown_expiry() {
        let mut s = CountdownState::idle(IntentKind::SpecialA);
        s.enter_cooldown(2000);
        assert!(s.on_cooldown());
        assert!(!s.advance_cooldown(1000));
        assert!(s.on_cooldown());
        assert!(s.advance_cooldown(1000));
        assert!(!s.on_cooldown());
        assert_eq!(s.phase, CountdownPhase::Idle);
    }

    #[test]
    fn test_advance_cooldown_noop_when_idle() {
        let mut s = CountdownState::idle(IntentKind::SpecialB);
        assert!(!s.advance_cooldown(5000));
        assert_eq!(s.phase, CountdownPhase::Idle);
    }
}
