//! Reason codes for countdown decisions

use serde::{Deserialize, Serialize};

/// Reason codes attached to cancellations and completions. Suppressed starts
/// (controller busy, cooldown, torn down) are silent and carry no code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R1xx: Cancellation
    // =========================================================================
    /// Hand left the frame mid-hold
    R101_HAND_LOST,
    /// Round ended while counting
    R102_ROUND_ENDED,
    /// Confidence dropped to or below the threshold
    R103_CONFIDENCE_DROPPED,
    /// Hand still present but showing a different gesture
    R104_GESTURE_CHANGED,

    // =========================================================================
    // R3xx: Completion
    // =========================================================================
    /// Hold completed with a valid gesture
    R301_CONFIRMED,
    /// Completion re-sample found no usable gesture; move fell back to Rock
    R302_FALLBACK_ROCK,
    /// Special re-validation failed; downstream effect skipped
    R303_SPECIAL_SKIPPED,
}

impl ReasonCode {
    /// Code string for logging
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_HAND_LOST => "R101_HAND_LOST",
            Self::R102_ROUND_ENDED => "R102_ROUND_ENDED",
            Self::R103_CONFIDENCE_DROPPED => "R103_CONFIDENCE_DROPPED",
            Self::R104_GESTURE_CHANGED => "R104_GESTURE_CHANGED",
            Self::R301_CONFIRMED => "R301_CONFIRMED",
            Self::R302_FALLBACK_ROCK => "R302_FALLBACK_ROCK",
            Self::R303_SPECIAL_SKIPPED => "R303_SPECIAL_SKIPPED",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_HAND_LOST => "Hand left the frame",
            Self::R102_ROUND_ENDED => "Round no longer active",
            Self::R103_CONFIDENCE_DROPPED => "Confidence below threshold",
            Self::R104_GESTURE_CHANGED => "Gesture changed mid-hold",
            Self::R301_CONFIRMED => "Hold confirmed",
            Self::R302_FALLBACK_ROCK => "No gesture at confirmation, defaulted to Rock",
            Self::R303_SPECIAL_SKIPPED => "Special re-validation failed",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
