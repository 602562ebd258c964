//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One `update(dt)` + one `render` per frame, single-threaded
//! - Seeded RNG only, threaded through explicitly
//! - No rendering or platform dependencies beyond the `render::Surface` trait

pub mod ball;
pub mod beam;
pub mod effect;
pub mod emote;
pub mod firework;
pub mod session;

pub use ball::Ball;
pub use beam::{Beam, BeamManager};
pub use effect::Effect;
pub use emote::{Emote, EmoteManager, EmoteState};
pub use firework::{Firework, FireworkManager, FireworkState};
pub use session::Session;

use thiserror::Error;

/// Construction-time precondition violations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("window dimensions must be positive, got {width}x{height}")]
    InvalidWindow { width: f32, height: f32 },
}
