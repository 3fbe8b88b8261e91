//! Frame sampler over an opaque recognizer
//!
//! The recognizer is the external hand-pose classifier. The sampler adds the
//! failure policy around it: a sampler that never became ready yields
//! hand-absent frames forever (the engine stays safely idle), and a single
//! failed inference degrades to a hand-absent frame instead of crashing the
//! tick loop.

use std::collections::VecDeque;

use crate::types::FrameResult;

/// Recognizer failure surfaced by one inference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerError {
    /// The recognizer was never initialized or has been released
    NotReady,
    /// One inference failed; the next frame may succeed
    Inference(String),
}

impl std::fmt::Display for RecognizerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecognizerError::NotReady => write!(f, "recognizer not ready"),
            RecognizerError::Inference(msg) => write!(f, "inference failed: {}", msg),
        }
    }
}

impl std::error::Error for RecognizerError {}

/// Opaque per-frame hand-pose classifier
pub trait Recognizer {
    /// Classify the current video frame
    fn recognize(&mut self) -> Result<FrameResult, RecognizerError>;
}

/// Pulls one classification per tick and applies the failure policy
#[derive(Debug)]
pub struct FrameSampler<R> {
    recognizer: Option<R>,
    ready: bool,
    error_count: u64,
}

impl<R: Recognizer> FrameSampler<R> {
    /// Sampler over an initialized recognizer
    pub fn new(recognizer: R) -> Self {
        Self { recognizer: Some(recognizer), ready: true, error_count: 0 }
    }

    /// Sampler whose recognizer failed to initialize. Never yields a hand;
    /// callers should check [`is_ready`](Self::is_ready) and surface the
    /// condition instead of ticking forever.
    pub fn not_ready() -> Self {
        Self { recognizer: None, ready: false, error_count: 0 }
    }

    /// Did initialization succeed and the recognizer not yet get released?
    pub fn is_ready(&self) -> bool {
        self.ready && self.recognizer.is_some()
    }

    /// Failed inferences seen so far
    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    /// One classification. Failures degrade to a hand-absent frame, which
    /// cancels any running countdown on the next engine tick.
    pub fn sample(&mut self) -> FrameResult {
        let recognizer = match self.recognizer.as_mut() {
            Some(r) if self.ready => r,
            _ => return FrameResult::no_hand(),
        };
        match recognizer.recognize() {
            Ok(frame) => frame,
            Err(_) => {
                self.error_count += 1;
                FrameResult::no_hand()
            }
        }
    }

    /// Release the recognizer. Idempotent; sampling afterwards yields
    /// hand-absent frames only.
    pub fn release(&mut self) {
        self.recognizer = None;
        self.ready = false;
    }
}

/// Recognizer replaying a prepared frame sequence; used by the CLI script
/// mode and tests. Runs out → hand-absent frames.
#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    frames: VecDeque<FrameResult>,
    fail_next: bool,
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_frames(frames: Vec<FrameResult>) -> Self {
        Self { frames: frames.into(), fail_next: false }
    }

    /// Queue one frame
    pub fn push(&mut self, frame: FrameResult) {
        self.frames.push_back(frame);
    }

    /// Make the next inference fail once
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl Recognizer for ScriptedRecognizer {
    fn recognize(&mut self) -> Result<FrameResult, RecognizerError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(RecognizerError::Inference("scripted failure".to_string()));
        }
        Ok(self.frames.pop_front().unwrap_or_else(FrameResult::no_hand))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_yields_no_hand() {
        let mut sampler: FrameSampler<ScriptedRecognizer> = FrameSampler::not_ready();
        assert!(!sampler.is_ready());
        assert_eq!(sampler.sample(), FrameResult::no_hand());
    }

    #[test]
    fn test_replays_frames_then_no_hand() {
        let rec = ScriptedRecognizer::from_frames(vec![FrameResult::hand("Open_Palm", 95.0)]);
        let mut sampler = FrameSampler::new(rec);
        assert!(sampler.is_ready());
        assert!(sampler.sample().hand_present);
        assert!(!sampler.sample().hand_present);
    }

    #[test]
    fn test_inference_error_degrades_to_no_hand() {
        let mut rec = ScriptedRecognizer::from_frames(vec![
            FrameResult::hand("Open_Palm", 95.0),
            FrameResult::hand("Open_Palm", 95.0),
        ]);
        rec.fail_next();
        let mut sampler = FrameSampler::new(rec);

        // Failing frame is swallowed, not fatal
        assert!(!sampler.sample().hand_present);
        assert_eq!(sampler.error_count(), 1);
        // Next frame succeeds
        assert!(sampler.sample().hand_present);
    }

    #[test]
    fn test_release_is_idempotent() {
        let rec = ScriptedRecognizer::from_frames(vec![FrameResult::hand("Three", 95.0)]);
        let mut sampler = FrameSampler::new(rec);
        sampler.release();
        sampler.release();
        assert!(!sampler.is_ready());
        assert!(!sampler.sample().hand_present);
    }
}
