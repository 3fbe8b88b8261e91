//! Round, health and item container
//!
//! Consumes already-resolved actions from the dispatcher. Owns the
//! `round_active` gate the engine reads back as a plain tick input.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::dispatcher::RoundSink;
use crate::types::GameSymbol;
use crate::{MAX_HEALTH, ROUND_DAMAGE, STARTING_ITEMS};

/// Outcome of one round from the player's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundOutcome {
    Win,
    Lose,
    Draw,
}

/// Who took the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Winner {
    Player,
    Computer,
}

/// Consumable item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    /// Restores one health point
    Cola,
    /// Reveals the opponent's next move
    Peek,
}

/// Resolved record of the last round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub player: GameSymbol,
    pub computer: GameSymbol,
    pub outcome: RoundOutcome,
}

/// The round/health/inventory state machine
#[derive(Debug)]
pub struct GameTable {
    player_health: u8,
    computer_health: u8,
    items: Vec<ItemKind>,
    round_active: bool,
    game_over: bool,
    winner: Option<Winner>,
    last_round: Option<RoundRecord>,
    /// Opponent move revealed by a Peek; consumed by the next resolution
    peeked: Option<GameSymbol>,
    rng_state: u64,
}

impl Default for GameTable {
    fn default() -> Self {
        Self::new()
    }
}

impl GameTable {
    /// Fresh table, seeded from system time
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5eed)
            | 1;
        Self::with_seed(seed)
    }

    /// Fresh table with a fixed RNG seed (deterministic tests)
    pub fn with_seed(seed: u64) -> Self {
        let mut table = Self {
            player_health: MAX_HEALTH,
            computer_health: MAX_HEALTH,
            items: Vec::new(),
            round_active: false,
            game_over: false,
            winner: None,
            last_round: None,
            peeked: None,
            rng_state: seed.max(1),
        };
        for _ in 0..STARTING_ITEMS {
            let item = table.random_item();
            table.items.push(item);
        }
        table
    }

    // xorshift64; entropy needs here are cosmetic, not cryptographic
    fn next_rand(&mut self) -> u64 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        x
    }

    fn random_symbol(&mut self) -> GameSymbol {
        match self.next_rand() % 3 {
            0 => GameSymbol::Rock,
            1 => GameSymbol::Paper,
            _ => GameSymbol::Scissors,
        }
    }

    fn random_item(&mut self) -> ItemKind {
        if self.next_rand() % 2 == 0 {
            ItemKind::Cola
        } else {
            ItemKind::Peek
        }
    }

    /// Open a new round; clears the previous result
    pub fn start_round(&mut self) {
        if self.game_over {
            return;
        }
        self.round_active = true;
        self.last_round = None;
    }

    /// Close the round without a move (e.g. player gave up); occasionally
    /// grants an item, as after a resolved round
    pub fn end_round(&mut self) {
        self.round_active = false;
        self.maybe_grant_item();
    }

    fn maybe_grant_item(&mut self) {
        // Roughly 30% of rounds award an item
        if self.next_rand() % 10 >= 7 {
            let item = self.random_item();
            self.items.push(item);
        }
    }

    fn resolve(&mut self, player: GameSymbol) {
        let computer = match self.peeked.take() {
            Some(symbol) => symbol,
            None => self.random_symbol(),
        };

        let outcome = if player == computer {
            RoundOutcome::Draw
        } else if player.beats() == computer {
            RoundOutcome::Win
        } else {
            RoundOutcome::Lose
        };

        match outcome {
            RoundOutcome::Win => {
                self.computer_health = self.computer_health.saturating_sub(ROUND_DAMAGE)
            }
            RoundOutcome::Lose => {
                self.player_health = self.player_health.saturating_sub(ROUND_DAMAGE)
            }
            RoundOutcome::Draw => {}
        }

        self.last_round = Some(RoundRecord { player, computer, outcome });
        self.round_active = false;

        if self.player_health == 0 {
            self.game_over = true;
            self.winner = Some(Winner::Computer);
        } else if self.computer_health == 0 {
            self.game_over = true;
            self.winner = Some(Winner::Player);
        } else {
            self.maybe_grant_item();
        }
    }

    fn consume_item(&mut self, kind: ItemKind) -> bool {
        match self.items.iter().position(|i| *i == kind) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Back to a fresh match, keeping the RNG stream
    pub fn reset(&mut self) {
        self.player_health = MAX_HEALTH;
        self.computer_health = MAX_HEALTH;
        self.items.clear();
        for _ in 0..STARTING_ITEMS {
            let item = self.random_item();
            self.items.push(item);
        }
        self.round_active = false;
        self.game_over = false;
        self.winner = None;
        self.last_round = None;
        self.peeked = None;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn player_health(&self) -> u8 {
        self.player_health
    }

    pub fn computer_health(&self) -> u8 {
        self.computer_health
    }

    pub fn items(&self) -> &[ItemKind] {
        &self.items
    }

    /// The gate the engine reads each tick
    pub fn round_active(&self) -> bool {
        self.round_active
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn last_round(&self) -> Option<&RoundRecord> {
        self.last_round.as_ref()
    }

    /// Revealed opponent move, if a Peek is pending
    pub fn peeked(&self) -> Option<GameSymbol> {
        self.peeked
    }
}

impl RoundSink for GameTable {
    fn on_move_confirmed(&mut self, symbol: GameSymbol) {
        // Late confirmations after the round closed are dropped, not queued
        if !self.round_active || self.game_over {
            return;
        }
        self.resolve(symbol);
    }

    fn on_special_a(&mut self) {
        // Cola: heal 1, capped; no-op without the item
        if self.consume_item(ItemKind::Cola) {
            self.player_health = (self.player_health + 1).min(MAX_HEALTH);
        }
    }

    fn on_special_b(&mut self) {
        // Peek: reveal and pin the opponent's next move
        if self.consume_item(ItemKind::Peek) {
            let symbol = self.random_symbol();
            self.peeked = Some(symbol);
        }
    }
}
