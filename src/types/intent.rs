//! Intent and game-symbol enumerations

use serde::{Deserialize, Serialize};

/// The three purposeful hand signals the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentKind {
    /// Confirm the player's move for the current round
    MainMove,
    /// Item gesture A (cola / heal)
    SpecialA,
    /// Item gesture B (peek)
    SpecialB,
}

impl IntentKind {
    /// Canonical evaluation order for same-tick ties. Fixed so that
    /// simultaneous qualifying intents resolve deterministically.
    pub const EVAL_ORDER: [IntentKind; 3] =
        [IntentKind::MainMove, IntentKind::SpecialA, IntentKind::SpecialB];

    /// Dense index for per-kind state arrays
    pub fn index(&self) -> usize {
        match self {
            IntentKind::MainMove => 0,
            IntentKind::SpecialA => 1,
            IntentKind::SpecialB => 2,
        }
    }

    /// Special intents have a post-completion cooldown; the main move does not
    pub fn has_cooldown(&self) -> bool {
        !matches!(self, IntentKind::MainMove)
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IntentKind::MainMove => "MAIN_MOVE",
            IntentKind::SpecialA => "SPECIAL_A",
            IntentKind::SpecialB => "SPECIAL_B",
        };
        write!(f, "{}", name)
    }
}

/// The three symbols a confirmed main move resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameSymbol {
    Rock,
    Paper,
    Scissors,
}

impl GameSymbol {
    /// Glyph for terminal display
    pub fn glyph(&self) -> &'static str {
        match self {
            GameSymbol::Rock => "✊",
            GameSymbol::Paper => "✋",
            GameSymbol::Scissors => "✌️",
        }
    }

    /// The symbol this one defeats
    pub fn beats(&self) -> GameSymbol {
        match self {
            GameSymbol::Rock => GameSymbol::Scissors,
            GameSymbol::Paper => GameSymbol::Rock,
            GameSymbol::Scissors => GameSymbol::Paper,
        }
    }
}

impl std::fmt::Display for GameSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameSymbol::Rock => "ROCK",
            GameSymbol::Paper => "PAPER",
            GameSymbol::Scissors => "SCISSORS",
        };
        write!(f, "{}", name)
    }
}
