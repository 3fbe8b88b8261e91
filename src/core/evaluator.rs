//! Signal evaluator: per-frame qualification for each intent
//!
//! Pure function of (frame, round_active) and the gesture map. A missing
//! hand forces every intent false so stale labels from earlier frames can
//! never qualify.

use serde::{Deserialize, Serialize};

use crate::types::{FrameResult, GestureMap, IntentKind};
use crate::CONFIDENCE_THRESHOLD;

/// Qualification verdict for all three intents on one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifySet {
    pub main_move: bool,
    pub special_a: bool,
    pub special_b: bool,
}

impl QualifySet {
    /// All-false verdict
    pub fn none() -> Self {
        Self { main_move: false, special_a: false, special_b: false }
    }

    /// Verdict for one kind
    pub fn get(&self, kind: IntentKind) -> bool {
        match kind {
            IntentKind::MainMove => self.main_move,
            IntentKind::SpecialA => self.special_a,
            IntentKind::SpecialB => self.special_b,
        }
    }
}

/// Evaluates raw frames against the gesture map
#[derive(Debug, Clone, Default)]
pub struct SignalEvaluator {
    map: GestureMap,
}

impl SignalEvaluator {
    /// Evaluator over the default gesture map
    pub fn new() -> Self {
        Self { map: GestureMap::new() }
    }

    /// Evaluator over a custom gesture map
    pub fn with_map(map: GestureMap) -> Self {
        Self { map }
    }

    /// The configured gesture map
    pub fn map(&self) -> &GestureMap {
        &self.map
    }

    /// Does this frame qualify for the given intent right now?
    pub fn qualifies(&self, frame: &FrameResult, round_active: bool, kind: IntentKind) -> bool {
        if !frame.hand_present || !round_active {
            return false;
        }
        if frame.confidence <= CONFIDENCE_THRESHOLD {
            return false;
        }
        let label = match frame.label() {
            Some(l) => l,
            None => return false,
        };
        match kind {
            IntentKind::MainMove => self.map.is_move_label(label),
            IntentKind::SpecialA => label == self.map.special_a_label,
            IntentKind::SpecialB => label == self.map.special_b_label,
        }
    }

    /// Evaluate all three intents for one frame
    pub fn evaluate(&self, frame: &FrameResult, round_active: bool) -> QualifySet {
        if !frame.hand_present {
            return QualifySet::none();
        }
        QualifySet {
            main_move: self.qualifies(frame, round_active, IntentKind::MainMove),
            special_a: self.qualifies(frame, round_active, IntentKind::SpecialA),
            special_b: self.qualifies(frame, round_active, IntentKind::SpecialB),
        }
    }
}
