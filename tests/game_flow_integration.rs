//! Integration tests for the full game path
//!
//! Frame lines → FrameParser → FrameSampler → engine → dispatcher → GameTable

use handlock::core::{
    ActionDispatcher, ConfirmEngine, FrameParser, FrameSampler, GameTable, ItemKind,
    ScriptedRecognizer,
};
use handlock::types::{GameSymbol, IntentKind};
use handlock::MAX_HEALTH;
use pretty_assertions::assert_eq;

/// Feed a parsed script through the whole stack and return the table
fn play_script(script: &str, game: &mut GameTable) {
    let parser = FrameParser::new();
    let frames = parser.parse_script(script).expect("script should parse");
    let ticks = frames.len();
    let mut sampler = FrameSampler::new(ScriptedRecognizer::from_frames(frames));
    let mut engine = ConfirmEngine::new();
    let dispatcher = ActionDispatcher::new();

    for _ in 0..ticks {
        let frame = sampler.sample();
        let output = engine.tick(&frame, game.round_active(), 1000);
        dispatcher.dispatch(&output, game);
    }
    engine.shutdown();
}

#[test]
fn test_scripted_round_resolves() {
    let mut game = GameTable::with_seed(11);
    game.start_round();

    play_script(
        "# hold paper for three ticks\n\
         hand Open_Palm 95\n\
         hand Open_Palm 92\n\
         hand Open_Palm 97\n\
         none\n",
        &mut game,
    );

    let record = game.last_round().expect("round should have resolved");
    assert_eq!(record.player, GameSymbol::Paper);
    assert!(!game.round_active());
}

#[test]
fn test_wobbly_hold_does_not_resolve() {
    let mut game = GameTable::with_seed(11);
    game.start_round();

    // Hand drops out after two ticks; the round stays open
    play_script(
        "hand Victory 95\n\
         hand Victory 95\n\
         none\n",
        &mut game,
    );

    assert_eq!(game.last_round(), None);
    assert!(game.round_active());
}

#[test]
fn test_low_confidence_never_arms() {
    let mut game = GameTable::with_seed(11);
    game.start_round();

    play_script(
        "hand Closed_Fist 80\n\
         hand Closed_Fist 79\n\
         hand Closed_Fist 75\n\
         hand Closed_Fist 80\n\
         none\n",
        &mut game,
    );

    assert_eq!(game.last_round(), None);
}

#[test]
fn test_peek_then_winning_round() {
    // Reroll starting inventory until it holds a Peek
    let mut game = GameTable::with_seed(23);
    while !game.items().contains(&ItemKind::Peek) {
        game.reset();
    }

    // Fire Peek by holding the One gesture outside any countdown conflicts
    game.start_round();
    play_script(
        "hand One 95\n\
         hand One 95\n\
         hand One 95\n\
         none\n",
        &mut game,
    );
    let revealed = game.peeked().expect("peek should pin the opponent move");

    // Now beat the revealed move
    let counter_label = match revealed {
        GameSymbol::Rock => "Open_Palm",
        GameSymbol::Paper => "Victory",
        GameSymbol::Scissors => "Closed_Fist",
    };
    let script = format!(
        "hand {l} 95\nhand {l} 95\nhand {l} 95\nnone\n",
        l = counter_label
    );
    play_script(&script, &mut game);

    let record = game.last_round().expect("round should resolve");
    assert_eq!(record.computer, revealed);
    assert_eq!(game.computer_health(), MAX_HEALTH - 1);
}

#[test]
fn test_recognizer_failure_cancels_but_recovers() {
    let parser = FrameParser::new();
    let frames = parser
        .parse_script("hand Open_Palm 95\nhand Open_Palm 95\n")
        .unwrap();
    let mut rec = ScriptedRecognizer::from_frames(frames);
    rec.push(handlock::types::FrameResult::hand("Open_Palm", 95.0));

    let mut sampler = FrameSampler::new(rec);
    let mut engine = ConfirmEngine::new();
    let dispatcher = ActionDispatcher::new();
    let mut game = GameTable::with_seed(5);
    game.start_round();

    // Two good ticks
    for _ in 0..2 {
        let frame = sampler.sample();
        let output = engine.tick(&frame, game.round_active(), 1000);
        dispatcher.dispatch(&output, &mut game);
    }
    assert_eq!(engine.counting_kind(), Some(IntentKind::MainMove));

    // An inference failure mid-hold degrades to no-hand and cancels
    // (simulate by sampling with the recognizer released)
    let failed_frame = handlock::types::FrameResult::no_hand();
    let output = engine.tick(&failed_frame, game.round_active(), 1000);
    dispatcher.dispatch(&output, &mut game);
    assert_eq!(engine.counting_kind(), None);
    assert_eq!(game.last_round(), None);

    // The loop keeps sampling; the next good frame starts over
    let frame = sampler.sample();
    assert!(frame.hand_present);
    engine.tick(&frame, game.round_active(), 1000);
    assert_eq!(engine.counting_kind(), Some(IntentKind::MainMove));
}

#[test]
fn test_not_ready_sampler_keeps_engine_idle() {
    let mut sampler: FrameSampler<ScriptedRecognizer> = FrameSampler::not_ready();
    let mut engine = ConfirmEngine::new();

    for _ in 0..5 {
        let frame = sampler.sample();
        let output = engine.tick(&frame, true, 1000);
        assert!(output.events.is_empty());
    }
    assert_eq!(engine.counting_kind(), None);
}
