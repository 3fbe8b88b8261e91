//! Frame-line parser for scripted and interactive input
//!
//! Grammar (one frame per line, case-insensitive keywords):
//!   hand <Label> <confidence>     e.g. "hand Open_Palm 95"
//!   none                          hand-absent frame
//!
//! Lines starting with '#' are comments. Used by the CLI interactive and
//! script modes and by tests; the live webcam path feeds FrameResults
//! directly and never goes through this parser.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::FrameResult;

lazy_static! {
    static ref RE_HAND: Regex =
        Regex::new(r"(?i)^hand\s+(?P<label>[A-Za-z_][A-Za-z0-9_]*)\s+(?P<conf>\d+(?:\.\d+)?)$")
            .unwrap();
    static ref RE_NONE: Regex = Regex::new(r"(?i)^(none|nohand|no_hand)$").unwrap();
}

/// Error for a line that matches no frame production
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFrameError {
    pub line: String,
}

impl std::fmt::Display for ParseFrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized frame line: {:?}", self.line)
    }
}

impl std::error::Error for ParseFrameError {}

/// Parser for the frame-line grammar
#[derive(Debug, Default)]
pub struct FrameParser;

impl FrameParser {
    /// Create new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse one line into a frame. Comments and blank lines yield None.
    pub fn parse(&self, line: &str) -> Result<Option<FrameResult>, ParseFrameError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        if RE_NONE.is_match(line) {
            return Ok(Some(FrameResult::no_hand()));
        }

        if let Some(caps) = RE_HAND.captures(line) {
            let label = caps.name("label").unwrap().as_str();
            // Regex guarantees digits; out-of-range values are clamped
            let confidence: f64 = caps.name("conf").unwrap().as_str().parse().unwrap_or(0.0);
            return Ok(Some(FrameResult::hand(label, confidence.clamp(0.0, 100.0))));
        }

        Err(ParseFrameError { line: line.to_string() })
    }

    /// Parse a whole script, skipping comments and blanks
    pub fn parse_script(&self, script: &str) -> Result<Vec<FrameResult>, ParseFrameError> {
        let mut frames = Vec::new();
        for line in script.lines() {
            if let Some(frame) = self.parse(line)? {
                frames.push(frame);
            }
        }
        Ok(frames)
    }
}
