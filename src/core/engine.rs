//! Countdown engine: three mutually-exclusive hold-to-confirm timers
//!
//! Transitions per intent kind:
//! - IDLE → COUNTING: kind qualifies, nothing else counting, not on cooldown
//! - COUNTING → IDLE: qualification lost (hand gone, round over, confidence
//!   drop, gesture change); count resets to 3, nothing is emitted
//! - COUNTING → confirmed: 3 whole seconds of continuous qualification;
//!   exactly one confirmation, resolved against the completing tick's frame
//! - Special kinds enter a 2-second COOLDOWN after completion
//!
//! The engine is advanced only by `tick(frame, round_active, delta_ms)`.
//! There are no timers and no shared flags; the cancel conditions are
//! re-checked at entry to every tick, so a qualification loss observed
//! between two countdown seconds always wins over the decrement.

use crate::types::{
    CountdownState, FrameResult, GestureMap, IntentKind, ReasonCode, TickEvent, TickOutput,
};
use crate::core::evaluator::{QualifySet, SignalEvaluator};
use crate::{HOLD_TICK_MS, SPECIAL_COOLDOWN_MS};

/// The countdown controller plus cooldown gate
#[derive(Debug)]
pub struct ConfirmEngine {
    evaluator: SignalEvaluator,
    states: [CountdownState; 3],
    torn_down: bool,
    tick_count: u64,
}

impl Default for ConfirmEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmEngine {
    /// Engine over the default gesture map
    pub fn new() -> Self {
        Self::with_map(GestureMap::new())
    }

    /// Engine over a custom gesture map
    pub fn with_map(map: GestureMap) -> Self {
        Self {
            evaluator: SignalEvaluator::with_map(map),
            states: [
                CountdownState::idle(IntentKind::MainMove),
                CountdownState::idle(IntentKind::SpecialA),
                CountdownState::idle(IntentKind::SpecialB),
            ],
            torn_down: false,
            tick_count: 0,
        }
    }

    /// Advance the machine by one sampling tick.
    ///
    /// `delta_ms` is the wall-clock time since the previous tick. A single
    /// large delta can complete a countdown but still emits at most one
    /// confirmation; leftover time is discarded.
    pub fn tick(&mut self, frame: &FrameResult, round_active: bool, delta_ms: u64) -> TickOutput {
        // Torn down: inert forever, no events, actions dropped
        if self.torn_down {
            return TickOutput::new(frame, round_active, self.snapshot(), Vec::new());
        }

        self.tick_count += 1;
        let mut events = Vec::new();

        // Cooldown clocks run regardless of hand presence or qualification
        for state in &mut self.states {
            if state.advance_cooldown(delta_ms) {
                events.push(TickEvent::CooldownEnded { kind: state.kind });
            }
        }

        let qualify = self.evaluator.evaluate(frame, round_active);

        match self.counting_kind() {
            Some(kind) => {
                if !qualify.get(kind) {
                    // Cancel: reset the visual count, emit nothing downstream
                    let reason = cancel_reason(frame, round_active);
                    self.states[kind.index()].reset_hold();
                    events.push(TickEvent::CountdownCancelled { kind, reason });
                } else {
                    self.advance_hold(kind, frame, round_active, delta_ms, &mut events);
                }
            }
            None => {
                if let Some(kind) = self.pick_start(&qualify) {
                    self.states[kind.index()].start();
                    events.push(TickEvent::CountdownStarted { kind });
                    // The starting tick's delta counts toward the hold
                    self.advance_hold(kind, frame, round_active, delta_ms, &mut events);
                }
            }
        }

        TickOutput::new(frame, round_active, self.snapshot(), events)
    }

    /// First kind eligible to arm, in canonical order. Losers of a
    /// same-tick tie are silently ignored, never queued.
    fn pick_start(&self, qualify: &QualifySet) -> Option<IntentKind> {
        IntentKind::EVAL_ORDER
            .iter()
            .copied()
            .find(|kind| qualify.get(*kind) && !self.states[kind.index()].on_cooldown())
    }

    /// Accumulate hold time for the counting kind and complete at zero
    fn advance_hold(
        &mut self,
        kind: IntentKind,
        frame: &FrameResult,
        round_active: bool,
        delta_ms: u64,
        events: &mut Vec<TickEvent>,
    ) {
        let idx = kind.index();
        self.states[idx].hold_acc_ms += delta_ms;

        while self.states[idx].hold_acc_ms >= HOLD_TICK_MS && self.states[idx].ticks_remaining > 0 {
            self.states[idx].hold_acc_ms -= HOLD_TICK_MS;
            self.states[idx].ticks_remaining -= 1;

            if self.states[idx].ticks_remaining > 0 {
                events.push(TickEvent::CountdownTicked {
                    kind,
                    ticks_remaining: self.states[idx].ticks_remaining,
                });
            } else {
                self.complete(kind, frame, round_active, events);
                // Exactly one confirmation; surplus delta is discarded
                break;
            }
        }
    }

    /// Completion: re-sample against the freshest frame and emit one action
    fn complete(
        &mut self,
        kind: IntentKind,
        frame: &FrameResult,
        round_active: bool,
        events: &mut Vec<TickEvent>,
    ) {
        match kind {
            IntentKind::MainMove => {
                // A round must always resolve: unusable re-sample → Rock
                let resolved = frame
                    .label()
                    .filter(|_| frame.hand_present)
                    .and_then(|l| self.evaluator.map().symbol_for(l).map(|s| (s, l.to_string())));
                let (symbol, label, reason) = match resolved {
                    Some((symbol, label)) => (symbol, Some(label), ReasonCode::R301_CONFIRMED),
                    None => (
                        crate::types::GameSymbol::Rock,
                        None,
                        ReasonCode::R302_FALLBACK_ROCK,
                    ),
                };
                self.states[kind.index()].reset_hold();
                events.push(TickEvent::MoveConfirmed { symbol, label, reason });
            }
            IntentKind::SpecialA | IntentKind::SpecialB => {
                // Cooldown starts whether or not the effect fires
                let valid = self.evaluator.qualifies(frame, round_active, kind);
                self.states[kind.index()].enter_cooldown(SPECIAL_COOLDOWN_MS);
                if valid {
                    events.push(TickEvent::SpecialFired { kind });
                } else {
                    events.push(TickEvent::SpecialSkipped {
                        kind,
                        reason: ReasonCode::R303_SPECIAL_SKIPPED,
                    });
                }
            }
        }
    }

    /// The kind currently counting, if any
    pub fn counting_kind(&self) -> Option<IntentKind> {
        self.states.iter().find(|s| s.is_counting()).map(|s| s.kind)
    }

    /// Countdown record for one kind
    pub fn state(&self, kind: IntentKind) -> &CountdownState {
        &self.states[kind.index()]
    }

    /// Clone of all three countdown records
    pub fn snapshot(&self) -> Vec<CountdownState> {
        self.states.to_vec()
    }

    /// The evaluator and its gesture map
    pub fn evaluator(&self) -> &SignalEvaluator {
        &self.evaluator
    }

    /// Number of ticks processed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Tear down: every countdown resets to idle and no event is ever
    /// emitted again, even if pending deadlines would have fired.
    pub fn shutdown(&mut self) {
        self.torn_down = true;
        for state in &mut self.states {
            *state = CountdownState::idle(state.kind);
        }
    }

    /// Has the engine been torn down?
    pub fn is_shutdown(&self) -> bool {
        self.torn_down
    }

    /// Reset to a fresh engine with the same gesture map
    pub fn reset(&mut self) {
        for state in &mut self.states {
            *state = CountdownState::idle(state.kind);
        }
        self.torn_down = false;
        self.tick_count = 0;
    }
}

/// Why did the running countdown stop qualifying?
fn cancel_reason(frame: &FrameResult, round_active: bool) -> ReasonCode {
    if !frame.hand_present {
        ReasonCode::R101_HAND_LOST
    } else if !round_active {
        ReasonCode::R102_ROUND_ENDED
    } else if frame.confidence <= crate::CONFIDENCE_THRESHOLD {
        ReasonCode::R103_CONFIDENCE_DROPPED
    } else {
        ReasonCode::R104_GESTURE_CHANGED
    }
}

// =============================================================================
// TESTS
// =============================================================================
