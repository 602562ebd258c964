//! Ball physics: integration, wall collision, tap impulse
//!
//! Semi-implicit Euler under constant gravity with linear drag. The visual
//! spin follows horizontal velocity only; it is not coupled back into the
//! motion. There is no floor: falling out the bottom is the fail condition
//! and is detected by the session, not here.

use glam::Vec2;
use rand::Rng;

use super::SimError;
use crate::consts::*;
use crate::render::{Sprite, Surface};

/// The player-controlled ball. One per session.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision radius, derived from the sprite dimensions
    pub radius: f32,
    /// Visual rotation (degrees, counter-clockwise)
    pub angle: f32,
    sprite: Sprite,
    window: Vec2,
}

impl Ball {
    /// Create a ball for a window of the given size.
    ///
    /// The radius is the mean of the sprite's half-extents,
    /// `(width + height) / 4`. Non-positive window dimensions are a
    /// precondition violation.
    pub fn new(sprite: Sprite, window: Vec2) -> Result<Self, SimError> {
        if window.x <= 0.0 || window.y <= 0.0 {
            return Err(SimError::InvalidWindow {
                width: window.x,
                height: window.y,
            });
        }

        Ok(Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: (sprite.size.x + sprite.size.y) / 4.0,
            angle: 0.0,
            sprite,
            window,
        })
    }

    /// Integrate one step of motion, then resolve wall contact.
    pub fn update(&mut self, dt: f32) {
        let accel = Vec2::new(0.0, GRAVITY) - DRAG_COEFF * self.vel;
        self.vel += accel * dt;
        self.pos += self.vel * dt;

        let k = (self.vel.x / SPIN_REF_SPEED).clamp(-1.0, 1.0);
        self.angle += k * SPIN_MAX_RATE * dt;

        self.check_walls();
    }

    /// Apply the tap impulse.
    ///
    /// Vertical: always launches upward, speed clamped to
    /// `[BOUNCE_LIFT, BOUNCE_LIFT_MAX]` regardless of prior velocity.
    /// Horizontal: proportional to how far off-center the tap landed
    /// (tapping the left side kicks the ball right), plus bounded random
    /// jitter.
    pub fn bounce<R: Rng>(&mut self, target: Vec2, rng: &mut R) {
        self.vel.y = (self.vel.y - BOUNCE_LIFT).clamp(-BOUNCE_LIFT_MAX, -BOUNCE_LIFT);

        let x_diff = -(target.x - self.pos.x) / self.radius;
        let jitter = rng.random_range(-BOUNCE_SIDE_JITTER..=BOUNCE_SIDE_JITTER) as f32;
        self.vel.x += x_diff * BOUNCE_SIDE_GAIN + jitter;
        self.vel.x = self.vel.x.clamp(-BOUNCE_SIDE_LIMIT, BOUNCE_SIDE_LIMIT);
    }

    /// True once the ball has fallen well past the bottom edge.
    ///
    /// The generous margin lets the ball visibly leave the screen before
    /// the fail registers.
    pub fn is_below_window(&self) -> bool {
        self.pos.y - self.radius * FALL_OUT_MARGIN_RADII > self.window.y
    }

    /// Zero motion and spin. Position is re-placed by the session.
    pub fn reset(&mut self) {
        self.vel = Vec2::ZERO;
        self.angle = 0.0;
    }

    /// Hard clamp against the side walls with velocity reflection.
    ///
    /// Reflection forces the sign rather than negating, so a ball already
    /// moving away from the wall is left alone.
    fn check_walls(&mut self) {
        if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x + self.radius > self.window.x {
            self.pos.x = self.window.x - self.radius;
            self.vel.x = -self.vel.x.abs();
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.blit_sprite(self.sprite, self.pos, self.angle, 255);
    }
}
