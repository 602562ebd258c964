//! Capability surface shared by the timed visual effects
//!
//! Every effect is a small self-updating state machine; managers only ever
//! need these three operations.

use crate::render::Surface;

/// A self-updating, self-rendering visual entity owned by a manager.
pub trait Effect {
    /// Advance the effect's internal clock by `dt` seconds.
    fn update(&mut self, dt: f32);
    /// Draw the effect in its current state.
    fn render(&self, surface: &mut dyn Surface);
    /// True once the effect has reached its terminal state; a terminal
    /// effect performs no further update or render work and is eligible
    /// for removal by its manager.
    fn is_terminal(&self) -> bool;
}
