//! Handlock CLI
//!
//! Usage:
//!   handlock --frame "hand Open_Palm 95"    # Single tick evaluation
//!   handlock --interactive                  # Interactive frame feed
//!   handlock --script frames.txt            # Replay a frame script
//!   handlock --serve                        # HTTP API server
//!   handlock --frame "none" --json          # JSON output

use clap::Parser;
use std::io::{self, BufRead, Write};

use handlock::core::{ActionDispatcher, ConfirmEngine, FrameParser, GameTable, RoundOutcome, Winner};
use handlock::types::{CountdownPhase, TickEvent, TickOutput};
use handlock::{HOLD_TICK_MS, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "handlock",
    version = VERSION,
    about = "Handlock - gesture hold-to-confirm engine with a playable round loop",
    long_about = "Handlock converts a noisy stream of per-frame hand-gesture\n\
                  classifications into confirmed game actions: hold a gesture\n\
                  for 3 seconds to lock it in.\n\n\
                  Frame lines:\n  \
                  hand <Label> <confidence>   e.g. 'hand Open_Palm 95'\n  \
                  none                        hand absent\n\n\
                  Interactive commands:\n  \
                  start / end    open or close the round\n  \
                  status         print countdown and health state\n  \
                  reset          fresh match\n  \
                  quit           exit"
)]
struct Args {
    /// Single frame line to evaluate
    #[arg(short, long)]
    frame: Option<String>,

    /// Interactive mode - read frame lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Replay a frame script file (one frame line per tick)
    #[arg(long)]
    script: Option<String>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Wall-clock milliseconds represented by one tick
    #[arg(long, default_value_t = HOLD_TICK_MS)]
    tick_ms: u64,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show per-kind countdown breakdown every tick
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.serve {
        run_serve(&args).await;
    } else if let Some(ref path) = args.script {
        run_script(path, &args);
    } else if let Some(ref line) = args.frame {
        run_single(line, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args);
    }
}

/// Run single frame evaluation against a fresh engine with an open round
fn run_single(line: &str, args: &Args) {
    let parser = FrameParser::new();
    let mut engine = ConfirmEngine::new();

    let frame = match parser.parse(line) {
        Ok(Some(frame)) => frame,
        Ok(None) => return,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let output = engine.tick(&frame, true, args.tick_ms);
    print_tick(&output, args);
}

/// Run interactive mode
fn run_interactive(args: &Args) {
    let parser = FrameParser::new();
    let mut engine = ConfirmEngine::new();
    let dispatcher = ActionDispatcher::new();
    let mut game = GameTable::new();

    print_header("Interactive Mode", args.no_color);
    println!("Feed frame lines ('hand <Label> <conf>' or 'none'), one per tick.");
    println!("Hold a qualifying gesture for 3 ticks to confirm. Type 'start' to");
    println!("open a round, 'status' for state, 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let prompt = format_prompt(&engine, &game, args.no_color);
        print!("{}", prompt);
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            engine.shutdown();
            println!("\nSession ended. Ticks: {}", engine.tick_count());
            break;
        }
        if line.is_empty() {
            continue;
        }

        match line.to_ascii_lowercase().as_str() {
            "start" => {
                game.start_round();
                println!("Round open. Show your gesture.");
                continue;
            }
            "end" => {
                game.end_round();
                println!("Round closed.");
                continue;
            }
            "reset" => {
                engine.reset();
                game.reset();
                println!("Fresh match.");
                continue;
            }
            "status" => {
                print_status(&engine, &game, args.no_color);
                continue;
            }
            _ => {}
        }

        let frame = match parser.parse(line) {
            Ok(Some(frame)) => frame,
            Ok(None) => continue,
            Err(e) => {
                println!(
                    "{}⚠ {}{}",
                    if args.no_color { "" } else { "\x1b[33m" },
                    e,
                    if args.no_color { "" } else { "\x1b[0m" }
                );
                continue;
            }
        };

        let output = engine.tick(&frame, game.round_active(), args.tick_ms);
        dispatcher.dispatch(&output, &mut game);

        print_tick(&output, args);
        print_event_messages(&output, &game, args.no_color);
    }
}

/// Replay a script: one frame line per tick, rounds auto-opened
fn run_script(path: &str, args: &Args) {
    let parser = FrameParser::new();
    let mut engine = ConfirmEngine::new();
    let dispatcher = ActionDispatcher::new();
    let mut game = GameTable::new();

    let script = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Cannot read {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let frames = match parser.parse_script(&script) {
        Ok(frames) => frames,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    print_header("Script Replay", args.no_color);
    println!("{} frames, {}ms per tick", frames.len(), args.tick_ms);
    println!();

    for frame in &frames {
        if !game.round_active() && !game.game_over() {
            game.start_round();
        }

        let output = engine.tick(frame, game.round_active(), args.tick_ms);
        dispatcher.dispatch(&output, &mut game);

        print_tick(&output, args);
        print_event_messages(&output, &game, args.no_color);

        if game.game_over() {
            break;
        }
    }

    engine.shutdown();
    if !args.json {
        println!();
        print_status(&engine, &game, args.no_color);
    }
}

/// Print one tick's output in the selected format
fn print_tick(output: &TickOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("JSON error: {}", e),
        }
    } else if args.verbose {
        print_verbose(output, args.no_color);
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
}

/// Print human-facing messages for this tick's events
fn print_event_messages(output: &TickOutput, game: &GameTable, no_color: bool) {
    let (green, yellow, red, gray, reset) = if no_color {
        ("", "", "", "", "")
    } else {
        ("\x1b[32m", "\x1b[33m", "\x1b[31m", "\x1b[90m", "\x1b[0m")
    };

    for event in &output.events {
        match event {
            TickEvent::CountdownStarted { kind } => {
                println!("{}  {} hold started - keep it steady{}", gray, kind, reset);
            }
            TickEvent::CountdownTicked { kind, ticks_remaining } => {
                println!("{}  {} ... {}{}", gray, kind, ticks_remaining, reset);
            }
            TickEvent::CountdownCancelled { kind, reason } => {
                println!("{}  ⚠ {} cancelled: {}{}", yellow, kind, reason.description(), reset);
            }
            TickEvent::MoveConfirmed { symbol, .. } => {
                println!("{}  ✓ YOU PLAYED {} {}{}", green, symbol.glyph(), symbol, reset);
                if let Some(record) = game.last_round() {
                    let verdict = match record.outcome {
                        RoundOutcome::Win => format!("{}WIN{}", green, reset),
                        RoundOutcome::Lose => format!("{}LOSE{}", red, reset),
                        RoundOutcome::Draw => format!("{}DRAW{}", yellow, reset),
                    };
                    println!(
                        "    opponent played {} {} → {}  [you {} | them {}]",
                        record.computer.glyph(),
                        record.computer,
                        verdict,
                        game.player_health(),
                        game.computer_health()
                    );
                }
                if let Some(winner) = game.winner() {
                    let line = match winner {
                        Winner::Player => format!("{}  ✓ GAME OVER - YOU SURVIVED{}", green, reset),
                        Winner::Computer => format!("{}  ✗ GAME OVER - IT GOT YOU{}", red, reset),
                    };
                    println!("{}", line);
                }
            }
            TickEvent::SpecialFired { kind } => {
                println!("{}  ✓ {} triggered{}", green, kind, reset);
            }
            TickEvent::SpecialSkipped { kind, .. } => {
                println!("{}  {} completed but re-validation failed{}", yellow, kind, reset);
            }
            TickEvent::CooldownEnded { kind } => {
                println!("{}  {} ready again{}", gray, kind, reset);
            }
        }
    }
}

/// Print header
fn print_header(mode: &str, no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  Handlock v{} - {}", VERSION, mode);
        println!("========================================");
    } else {
        println!("\x1b[1m╔═══════════════════════════════════════╗\x1b[0m");
        println!("\x1b[1m║  Handlock v{} - {:<22}║\x1b[0m", VERSION, mode);
        println!("\x1b[1m╚═══════════════════════════════════════╝\x1b[0m");
    }
    println!();
}

/// Format the interactive prompt from countdown phase and health
fn format_prompt(engine: &ConfirmEngine, game: &GameTable, no_color: bool) -> String {
    let (phase, label) = match engine.counting_kind() {
        Some(kind) => (
            engine.state(kind).phase,
            format!("{} {}s", kind, engine.state(kind).ticks_remaining),
        ),
        None => (
            CountdownPhase::Idle,
            if game.round_active() { "round".to_string() } else { "idle".to_string() },
        ),
    };

    if no_color {
        format!("[{} | {}♥ vs {}♥] > ", label, game.player_health(), game.computer_health())
    } else {
        format!(
            "{}[{} | {}♥ vs {}♥]{} > ",
            phase.color_code(),
            label,
            game.player_health(),
            game.computer_health(),
            CountdownPhase::color_reset()
        )
    }
}

/// Print countdown and game state
fn print_status(engine: &ConfirmEngine, game: &GameTable, no_color: bool) {
    let gray = if no_color { "" } else { "\x1b[90m" };
    let reset = if no_color { "" } else { "\x1b[0m" };

    println!("{}┌─────────────────────────────────────────┐{}", gray, reset);
    for state in engine.snapshot() {
        println!(
            "{}│ {:<10} {:<9} ticks={} cooldown={}ms{}",
            gray, state.kind, state.phase, state.ticks_remaining, state.cooldown_remaining_ms, reset
        );
    }
    println!("{}├─────────────────────────────────────────┤{}", gray, reset);
    println!(
        "{}│ you {}♥  opponent {}♥  round_active={}{}",
        gray,
        game.player_health(),
        game.computer_health(),
        game.round_active(),
        reset
    );
    println!("{}│ items: {:?}{}", gray, game.items(), reset);
    if let Some(winner) = game.winner() {
        println!("{}│ winner: {:?}{}", gray, winner, reset);
    }
    println!("{}└─────────────────────────────────────────┘{}", gray, reset);
}

/// Print per-kind breakdown for one tick
fn print_verbose(output: &TickOutput, no_color: bool) {
    let phase = output
        .counting_kind()
        .map(|k| output.countdown(k).phase)
        .unwrap_or(CountdownPhase::Idle);
    let color = if no_color { "" } else { phase.color_code() };
    let reset = if no_color { "" } else { CountdownPhase::color_reset() };

    println!("{}┌─────────────────────────────────────────┐{}", color, reset);
    println!(
        "{}│ hand={} label={} conf={:.0}%{}",
        color,
        output.hand_present,
        output.gesture_label.as_deref().unwrap_or("-"),
        output.confidence,
        reset
    );
    println!("{}├─────────────────────────────────────────┤{}", color, reset);
    for state in &output.countdowns {
        println!(
            "{}│ {:<10} {:<9} ticks={} cooldown={}ms{}",
            color, state.kind, state.phase, state.ticks_remaining, state.cooldown_remaining_ms, reset
        );
    }
    println!("{}├─────────────────────────────────────────┤{}", color, reset);
    println!("{}│ round_active={} events={}{}", color, output.round_active, output.events.len(), reset);
    println!("{}└─────────────────────────────────────────┘{}", color, reset);
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    print_header("API Server", args.no_color);

    if let Err(e) = handlock::core::run_server(&args.addr).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
