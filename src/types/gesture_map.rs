//! Pluggable label-to-intent configuration
//!
//! The recognizer's label vocabulary varies per model, so the mapping from
//! labels to symbols and special intents is session configuration rather
//! than engine logic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::GameSymbol;
use crate::{
    LABEL_PAPER, LABEL_ROCK, LABEL_SCISSORS, LABEL_SCISSORS_ALT, LABEL_SPECIAL_A,
    LABEL_SPECIAL_B,
};

/// Mapping table from recognizer labels to game meaning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureMap {
    /// Labels counting as a valid main-move gesture, with their symbol
    pub symbol_labels: HashMap<String, GameSymbol>,
    /// Distinguished label for special intent A
    pub special_a_label: String,
    /// Distinguished label for special intent B
    pub special_b_label: String,
}

impl Default for GestureMap {
    fn default() -> Self {
        let mut symbol_labels = HashMap::new();
        symbol_labels.insert(LABEL_PAPER.to_string(), GameSymbol::Paper);
        symbol_labels.insert(LABEL_SCISSORS.to_string(), GameSymbol::Scissors);
        symbol_labels.insert(LABEL_SCISSORS_ALT.to_string(), GameSymbol::Scissors);
        symbol_labels.insert(LABEL_ROCK.to_string(), GameSymbol::Rock);

        Self {
            symbol_labels,
            special_a_label: LABEL_SPECIAL_A.to_string(),
            special_b_label: LABEL_SPECIAL_B.to_string(),
        }
    }
}

impl GestureMap {
    /// Default mapping table
    pub fn new() -> Self {
        Self::default()
    }

    /// Is this label a valid main-move gesture?
    pub fn is_move_label(&self, label: &str) -> bool {
        self.symbol_labels.contains_key(label)
    }

    /// Symbol for a main-move label, if mapped
    pub fn symbol_for(&self, label: &str) -> Option<GameSymbol> {
        self.symbol_labels.get(label).copied()
    }

    /// Override the special labels (e.g. for numeral-variant models)
    pub fn with_special_labels(
        mut self,
        special_a: impl Into<String>,
        special_b: impl Into<String>,
    ) -> Self {
        self.special_a_label = special_a.into();
        self.special_b_label = special_b.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let map = GestureMap::new();
        assert_eq!(map.symbol_for("Open_Palm"), Some(GameSymbol::Paper));
        assert_eq!(map.symbol_for("Victory"), Some(GameSymbol::Scissors));
        assert_eq!(map.symbol_for("ILoveYou"), Some(GameSymbol::Scissors));
        assert_eq!(map.symbol_for("Closed_Fist"), Some(GameSymbol::Rock));
        assert_eq!(map.symbol_for("Thumb_Up"), None);
    }

    #[test]
    fn test_special_labels_are_not_move_labels() {
        let map = GestureMap::new();
        assert!(!map.is_move_label(&map.special_a_label.clone()));
        assert!(!map.is_move_label(&map.special_b_label.clone()));
    }

    #[test]
    fn test_special_label_override() {
        let map = GestureMap::new().with_special_labels("Number_Three", "Number_One");
        assert_eq!(map.special_a_label, "Number_Three");
        assert_eq!(map.special_b_label, "Number_One");
    }
}
