//! Action dispatcher: routes engine events to the round container
//!
//! The dispatcher invokes each sink callback exactly once per completed
//! countdown and never retries; what the callbacks do (damage, items,
//! inventory) is the sink's business. The dispatcher owns the label-to-symbol
//! table at the sink boundary: the symbol handed to the sink is resolved from
//! the confirmed label against the dispatcher's map.

use crate::types::{GameSymbol, GestureMap, TickEvent, TickOutput};

/// External round/inventory container interface
pub trait RoundSink {
    /// A main move was confirmed
    fn on_move_confirmed(&mut self, symbol: GameSymbol);
    /// Special intent A completed (cola)
    fn on_special_a(&mut self);
    /// Special intent B completed (peek)
    fn on_special_b(&mut self);
}

/// Forwards confirmed actions to a [`RoundSink`]
#[derive(Debug, Clone, Default)]
pub struct ActionDispatcher {
    map: GestureMap,
}

impl ActionDispatcher {
    /// Dispatcher over the default gesture map
    pub fn new() -> Self {
        Self { map: GestureMap::new() }
    }

    /// Dispatcher over a custom gesture map
    pub fn with_map(map: GestureMap) -> Self {
        Self { map }
    }

    /// Map a confirmation-time label to the symbol it plays.
    /// Absent or unmapped labels fall back to Rock; a round is never
    /// silently dropped.
    pub fn resolve_symbol(&self, label: Option<&str>) -> GameSymbol {
        label
            .and_then(|l| self.map.symbol_for(l))
            .unwrap_or(GameSymbol::Rock)
    }

    /// Route one tick's events into the sink. Returns how many sink
    /// callbacks were invoked.
    pub fn dispatch(&self, output: &TickOutput, sink: &mut dyn RoundSink) -> usize {
        let mut dispatched = 0;
        for event in &output.events {
            match event {
                TickEvent::MoveConfirmed { label, .. } => {
                    sink.on_move_confirmed(self.resolve_symbol(label.as_deref()));
                    dispatched += 1;
                }
                TickEvent::SpecialFired { kind } => {
                    match kind {
                        crate::types::IntentKind::SpecialA => sink.on_special_a(),
                        crate::types::IntentKind::SpecialB => sink.on_special_b(),
                        crate::types::IntentKind::MainMove => {}
                    }
                    dispatched += 1;
                }
                _ => {}
            }
        }
        dispatched
    }
}
