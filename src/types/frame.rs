//! Per-frame classifier output

use serde::{Deserialize, Serialize};

/// One hand landmark in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Result of one classifier inference over one video frame.
///
/// Ephemeral: consumed by the evaluator on the tick it was sampled and then
/// discarded. Landmarks are opaque pass-through for debug rendering; the
/// engine never reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    /// Was a hand found in the frame at all?
    pub hand_present: bool,
    /// Classified gesture label, if the recognizer produced one
    pub gesture_label: Option<String>,
    /// Classifier confidence, 0-100
    pub confidence: f64,
    /// Landmark sets per detected hand (debug display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<Vec<Landmark>>>,
}

impl FrameResult {
    /// Frame with a classified hand
    pub fn hand(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            hand_present: true,
            gesture_label: Some(label.into()),
            confidence,
            landmarks: None,
        }
    }

    /// Frame with no hand in view. Also the safe default when a frame
    /// errors out or the recognizer is not ready.
    pub fn no_hand() -> Self {
        Self {
            hand_present: false,
            gesture_label: None,
            confidence: 0.0,
            landmarks: None,
        }
    }

    /// Attach landmark sets for debug rendering
    pub fn with_landmarks(mut self, landmarks: Vec<Vec<Landmark>>) -> Self {
        self.landmarks = Some(landmarks);
        self
    }

    /// Label as &str, empty labels treated as absent
    pub fn label(&self) -> Option<&str> {
        match self.gesture_label.as_deref() {
            Some("") | None => None,
            Some(l) => Some(l),
        }
    }
}
