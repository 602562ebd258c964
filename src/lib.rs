//! Keepy-Up - a tap-the-ball arcade simulation core
//!
//! Core modules:
//! - `sim`: frame-driven simulation (ball physics, timed effects, session state)
//! - `render`: backend-facing surface abstraction (sprites, shapes, text)
//! - `widgets`: score display widgets
//! - `highscores`: episode history and best-score tracking

pub mod highscores;
pub mod render;
pub mod sim;
pub mod widgets;

pub use highscores::SessionLog;
pub use sim::{Session, SimError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default window dimensions (pixels)
    pub const WINDOW_WIDTH: f32 = 322.0;
    pub const WINDOW_HEIGHT: f32 = 455.0;

    /// Downward gravity (pixels/s²)
    pub const GRAVITY: f32 = 2000.0;
    /// Linear drag coefficient (applied as -DRAG_COEFF * velocity)
    pub const DRAG_COEFF: f32 = 0.01;

    /// Horizontal speed at which visual spin saturates (pixels/s)
    pub const SPIN_REF_SPEED: f32 = 200.0;
    /// Spin rate at saturation (degrees/s)
    pub const SPIN_MAX_RATE: f32 = 180.0;

    /// Upward impulse added per tap (pixels/s)
    pub const BOUNCE_LIFT: f32 = 900.0;
    /// Fastest allowed upward speed after a tap (pixels/s)
    pub const BOUNCE_LIFT_MAX: f32 = 1500.0;
    /// Horizontal impulse per unit of tap offset (pixels/s)
    pub const BOUNCE_SIDE_GAIN: f32 = 450.0;
    /// Random horizontal jitter added per tap (± pixels/s)
    pub const BOUNCE_SIDE_JITTER: i32 = 150;
    /// Horizontal speed cap after a tap (pixels/s)
    pub const BOUNCE_SIDE_LIMIT: f32 = 1000.0;

    /// The ball counts as lost once it is this many radii below the window
    pub const FALL_OUT_MARGIN_RADII: f32 = 5.0;
    /// Gap between the ball's resting spawn point and the bottom edge
    pub const BALL_SPAWN_GAP: f32 = 10.0;

    /// Beams start appearing at this score
    pub const BEAM_MIN_SCORE: u32 = 20;
    /// ... and then on every multiple of this step
    pub const BEAM_SCORE_STEP: u32 = 5;
    /// Live beam cap
    pub const MAX_BEAMS: usize = 6;

    /// Fireworks start appearing at this score
    pub const FIREWORK_MIN_SCORE: u32 = 30;
    /// Live firework cap
    pub const MAX_FIREWORKS: usize = 6;
    /// Per-frame spawn roll must exceed this to launch a firework
    pub const FIREWORK_SPAWN_GATE: f32 = 0.97;

    /// Emotes spawn within ± this many pixels of the tap point
    pub const EMOTE_JITTER: i32 = 5;
}

/// Normalize a vector, leaving vectors shorter than length 1 unchanged
/// rather than stretching them to unit length.
#[inline]
pub fn norm_or_identity(v: Vec2) -> Vec2 {
    let len = v.length();
    if len < 1.0 { v } else { v / len }
}

/// Rotate a point around the origin by `angle` radians
#[inline]
pub fn point_rot(p: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y)
}

/// Corners of a `dim`-sized rectangle centered at `center`, rotated by
/// `angle` radians, in fan order for polygon filling.
pub fn rotated_quad(center: Vec2, angle: f32, dim: Vec2) -> [Vec2; 4] {
    let off = dim / 2.0;
    let (sin, cos) = angle.sin_cos();
    let rot = |p: Vec2| Vec2::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y);

    let p1 = center + rot(Vec2::new(off.x, off.y));
    let p2 = center + rot(Vec2::new(-off.x, off.y));
    let p3 = center + rot(Vec2::new(off.x, -off.y));
    let p4 = center + rot(Vec2::new(-off.x, -off.y));

    [p1, p2, p4, p3]
}
