//! Core engine modules

pub mod api;
pub mod dispatcher;
pub mod engine;
pub mod evaluator;
pub mod frame_parser;
pub mod game;
pub mod sampler;

pub use api::{create_router, run_server};
pub use dispatcher::{ActionDispatcher, RoundSink};
pub use engine::ConfirmEngine;
pub use evaluator::{QualifySet, SignalEvaluator};
pub use frame_parser::FrameParser;
pub use game::{GameTable, ItemKind, RoundOutcome, RoundRecord, Winner};
pub use sampler::{FrameSampler, Recognizer, RecognizerError, ScriptedRecognizer};
