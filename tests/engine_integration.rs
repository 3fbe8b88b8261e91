//! Integration tests for the confirmation engine
//!
//! Full path: FrameResult stream → evaluator → countdown engine → dispatcher

use handlock::core::{ActionDispatcher, ConfirmEngine, RoundSink};
use handlock::types::{FrameResult, GameSymbol, GestureMap, IntentKind, ReasonCode, TickEvent};
use handlock::{HOLD_TICKS, SPECIAL_COOLDOWN_MS};

#[derive(Default)]
struct RecordingSink {
    moves: Vec<GameSymbol>,
    special_a: usize,
    special_b: usize,
}

impl RoundSink for RecordingSink {
    fn on_move_confirmed(&mut self, symbol: GameSymbol) {
        self.moves.push(symbol);
    }
    fn on_special_a(&mut self) {
        self.special_a += 1;
    }
    fn on_special_b(&mut self) {
        self.special_b += 1;
    }
}

struct Harness {
    engine: ConfirmEngine,
    dispatcher: ActionDispatcher,
    sink: RecordingSink,
}

impl Harness {
    fn new() -> Self {
        Self {
            engine: ConfirmEngine::new(),
            dispatcher: ActionDispatcher::new(),
            sink: RecordingSink::default(),
        }
    }

    fn tick(&mut self, frame: &FrameResult, round_active: bool) -> Vec<TickEvent> {
        let output = self.engine.tick(frame, round_active, 1000);
        self.dispatcher.dispatch(&output, &mut self.sink);
        output.events
    }
}

/// Three consecutive qualifying Open_Palm ticks confirm Paper
#[test]
fn test_three_palm_ticks_emit_paper() {
    let mut h = Harness::new();
    let palm = FrameResult::hand("Open_Palm", 95.0);

    h.tick(&palm, true);
    h.tick(&palm, true);
    assert!(h.sink.moves.is_empty());
    h.tick(&palm, true);

    assert_eq!(h.sink.moves, vec![GameSymbol::Paper]);
}

/// Two qualifying ticks then hand loss: cancel, reset, no action
#[test]
fn test_hand_loss_mid_hold_emits_nothing() {
    let mut h = Harness::new();
    let palm = FrameResult::hand("Open_Palm", 95.0);

    h.tick(&palm, true);
    h.tick(&palm, true);
    let events = h.tick(&FrameResult::no_hand(), true);

    assert!(h.sink.moves.is_empty());
    assert!(events.contains(&TickEvent::CountdownCancelled {
        kind: IntentKind::MainMove,
        reason: ReasonCode::R101_HAND_LOST,
    }));
    assert_eq!(h.engine.state(IntentKind::MainMove).ticks_remaining, HOLD_TICKS);
}

/// Mutual exclusion holds across arbitrary frame sequences
#[test]
fn test_at_most_one_countdown_active() {
    let mut h = Harness::new();
    let frames = [
        FrameResult::hand("Open_Palm", 95.0),
        FrameResult::hand("Three", 99.0),
        FrameResult::hand("One", 85.0),
        FrameResult::no_hand(),
        FrameResult::hand("Closed_Fist", 81.0),
        FrameResult::hand("Victory", 95.0),
        FrameResult::hand("Three", 95.0),
        FrameResult::hand("Three", 95.0),
        FrameResult::hand("Three", 95.0),
        FrameResult::hand("One", 95.0),
    ];

    for (i, frame) in frames.iter().enumerate() {
        h.tick(frame, true);
        let counting = h
            .engine
            .snapshot()
            .iter()
            .filter(|s| s.is_counting())
            .count();
        assert!(counting <= 1, "tick {}: {} countdowns counting", i, counting);
    }
}

/// Special cooldown suppresses re-arm for 2 simulated seconds
#[test]
fn test_special_cooldown_window() {
    let mut h = Harness::new();
    let three = FrameResult::hand("Three", 95.0);

    // Complete SpecialA
    for _ in 0..3 {
        h.tick(&three, true);
    }
    assert_eq!(h.sink.special_a, 1);
    assert!(h.engine.state(IntentKind::SpecialA).on_cooldown());

    // Qualifying frames during the cooldown never re-arm it
    let events = h.tick(&three, true);
    assert!(!events.iter().any(|e| matches!(e, TickEvent::CountdownStarted { .. })));

    // Once 2 simulated seconds have elapsed, the next qualifying frame arms
    let events = h.tick(&three, true);
    assert!(events.contains(&TickEvent::CooldownEnded { kind: IntentKind::SpecialA }));
    assert_eq!(h.engine.counting_kind(), Some(IntentKind::SpecialA));

    // And completes a second time
    h.tick(&three, true);
    h.tick(&three, true);
    assert_eq!(h.sink.special_a, 2);
}

/// MainMove wins a same-tick start race per canonical order, and SpecialA
/// stays out until the main countdown finishes or cancels
#[test]
fn test_fixed_evaluation_order_start_race() {
    let mut h = Harness::new();

    // MainMove armed first
    h.tick(&FrameResult::hand("Closed_Fist", 95.0), true);
    assert_eq!(h.engine.counting_kind(), Some(IntentKind::MainMove));

    // SpecialA qualifying frames cannot start while MainMove counts;
    // they cancel it (gesture change) without arming in the same tick
    let events = h.tick(&FrameResult::hand("Three", 95.0), true);
    assert!(events.contains(&TickEvent::CountdownCancelled {
        kind: IntentKind::MainMove,
        reason: ReasonCode::R104_GESTURE_CHANGED,
    }));
    assert_eq!(h.engine.counting_kind(), None);

    h.tick(&FrameResult::hand("Three", 95.0), true);
    assert_eq!(h.engine.counting_kind(), Some(IntentKind::SpecialA));
}

/// Round deactivation cancels a running countdown within the same tick
#[test]
fn test_round_close_cancels_hold() {
    let mut h = Harness::new();
    let palm = FrameResult::hand("Open_Palm", 95.0);

    h.tick(&palm, true);
    let events = h.tick(&palm, false);

    assert!(events.contains(&TickEvent::CountdownCancelled {
        kind: IntentKind::MainMove,
        reason: ReasonCode::R102_ROUND_ENDED,
    }));
    assert!(h.sink.moves.is_empty());
}

/// Inactive round also blocks special intents from arming
#[test]
fn test_inactive_round_blocks_specials() {
    let mut h = Harness::new();
    h.tick(&FrameResult::hand("Three", 95.0), false);
    h.tick(&FrameResult::hand("One", 95.0), false);
    assert_eq!(h.engine.counting_kind(), None);
}

/// Teardown during an active countdown: nothing fires afterwards, even past
/// every pending deadline
#[test]
fn test_teardown_mid_countdown() {
    let mut h = Harness::new();
    let palm = FrameResult::hand("Open_Palm", 95.0);

    h.tick(&palm, true);
    h.tick(&palm, true);
    h.engine.shutdown();

    // Advance simulated time far past the hold and cooldown deadlines
    for _ in 0..(HOLD_TICKS as u64 + SPECIAL_COOLDOWN_MS / 1000 + 5) {
        let events = h.tick(&palm, true);
        assert!(events.is_empty());
    }
    assert!(h.sink.moves.is_empty());
    assert_eq!(h.sink.special_a + h.sink.special_b, 0);
}

/// Confirmation resolves against the freshest frame, not the arming frame
#[test]
fn test_confirmation_uses_final_resample() {
    let mut h = Harness::new();
    h.tick(&FrameResult::hand("Open_Palm", 95.0), true);
    h.tick(&FrameResult::hand("Open_Palm", 95.0), true);
    h.tick(&FrameResult::hand("Closed_Fist", 95.0), true);

    assert_eq!(h.sink.moves, vec![GameSymbol::Rock]);
}

/// The symbol the sink receives comes from the dispatcher's map, not the
/// engine's event record
#[test]
fn test_sink_symbol_comes_from_dispatcher_map() {
    let mut map = GestureMap::new();
    map.symbol_labels.insert("Open_Palm".to_string(), GameSymbol::Scissors);
    let mut engine = ConfirmEngine::new();
    let dispatcher = ActionDispatcher::with_map(map);
    let mut sink = RecordingSink::default();

    let palm = FrameResult::hand("Open_Palm", 95.0);
    for _ in 0..3 {
        let output = engine.tick(&palm, true, 1000);
        dispatcher.dispatch(&output, &mut sink);
    }

    assert_eq!(sink.moves, vec![GameSymbol::Scissors]);
}

/// Both specials can run their full cycles independently
#[test]
fn test_special_cooldowns_independent_end_to_end() {
    let mut h = Harness::new();
    let three = FrameResult::hand("Three", 95.0);
    let one = FrameResult::hand("One", 95.0);

    for _ in 0..3 {
        h.tick(&three, true);
    }
    // SpecialA cooling down; SpecialB arms and completes immediately after
    for _ in 0..3 {
        h.tick(&one, true);
    }

    assert_eq!(h.sink.special_a, 1);
    assert_eq!(h.sink.special_b, 1);
}
