//! Handlock: gesture hold-to-confirm engine
//!
//! Pipeline: frame sampler → signal evaluator → countdown engine → action
//! dispatcher → round container. The engine is a pure tick-driven state
//! machine; scheduling lives entirely in the caller.

pub mod core;
pub mod types;

// =============================================================================
// CONFIRMATION THRESHOLDS [C]
// =============================================================================

/// Minimum classifier confidence for a frame to qualify (strictly greater)
pub const CONFIDENCE_THRESHOLD: f64 = 80.0;

/// Countdown length in whole ticks (hold duration = 3 seconds)
pub const HOLD_TICKS: u8 = 3;

/// Wall-clock length of one countdown tick (milliseconds)
pub const HOLD_TICK_MS: u64 = 1000;

/// Refractory period after a special intent completes (milliseconds)
pub const SPECIAL_COOLDOWN_MS: u64 = 2000;

// =============================================================================
// DEFAULT RECOGNIZER LABELS [C]
// =============================================================================
// The label set is recognizer-specific configuration (see GestureMap); these
// are the defaults matching the canned hand-gesture model plus the two
// numeral poses the item gestures use.

/// Label mapped to Paper
pub const LABEL_PAPER: &str = "Open_Palm";

/// Label mapped to Scissors
pub const LABEL_SCISSORS: &str = "Victory";

/// Alternate label mapped to Scissors
pub const LABEL_SCISSORS_ALT: &str = "ILoveYou";

/// Label mapped to Rock
pub const LABEL_ROCK: &str = "Closed_Fist";

/// Distinguished label arming special intent A (cola / heal)
pub const LABEL_SPECIAL_A: &str = "Three";

/// Distinguished label arming special intent B (peek)
pub const LABEL_SPECIAL_B: &str = "One";

// =============================================================================
// GAME CONSTANTS [C]
// =============================================================================

/// Health pool size for both sides
pub const MAX_HEALTH: u8 = 5;

/// Items each player starts with
pub const STARTING_ITEMS: usize = 2;

/// Damage applied to the loser of a round
pub const ROUND_DAMAGE: u8 = 1;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
