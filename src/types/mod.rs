//! Type definitions for Handlock

pub mod countdown;
pub mod frame;
pub mod gesture_map;
pub mod intent;
pub mod output;
pub mod reason;

pub use countdown::{CountdownPhase, CountdownState};
pub use frame::{FrameResult, Landmark};
pub use gesture_map::GestureMap;
pub use intent::{GameSymbol, IntentKind};
pub use output::{TickEvent, TickOutput};
pub use reason::ReasonCode;
