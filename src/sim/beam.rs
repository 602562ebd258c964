//! Celebration light beams sweeping up from below the screen
//!
//! A beam is a long thin triangle anchored off-screen that oscillates
//! between two angle bounds. The sweep eases: full speed through the
//! center of the range, slowing to a crawl at the ends before reversing.
//! Beams never expire on their own; they live until the manager resets.

use glam::Vec2;
use rand::Rng;

use super::effect::Effect;
use crate::consts::{BEAM_MIN_SCORE, BEAM_SCORE_STEP, MAX_BEAMS};
use crate::point_rot;
use crate::render::{Rgb, Surface};

pub const BEAM_COLOR: Rgb = Rgb::new(255, 196, 0);
pub const BEAM_ALPHA: u8 = 100;
/// Sweep speed fraction retained at the ends of the range
const MIN_SPEED_K: f32 = 0.05;

/// One sweeping beam
#[derive(Debug, Clone)]
pub struct Beam {
    pos: Vec2,
    angle_min: f32,
    angle_max: f32,
    /// Peak angular speed (radians/s, always positive)
    omega: f32,
    /// Far edge offsets at zero sweep angle, fixed at construction
    left: Vec2,
    right: Vec2,
    curr_angle: f32,
    direction: f32,
}

impl Beam {
    pub fn new(
        pos: Vec2,
        angle_min: f32,
        angle_max: f32,
        omega: f32,
        spread: f32,
        length: f32,
    ) -> Self {
        Self {
            pos,
            angle_min,
            angle_max,
            omega: omega.abs(),
            left: point_rot(Vec2::new(0.0, -length), -spread / 2.0),
            right: point_rot(Vec2::new(0.0, -length), spread / 2.0),
            curr_angle: (angle_max + angle_min) / 2.0,
            direction: 1.0,
        }
    }

    pub fn angle(&self) -> f32 {
        self.curr_angle
    }
}

impl Effect for Beam {
    fn update(&mut self, dt: f32) {
        let center = (self.angle_min + self.angle_max) / 2.0;
        let half_range = (self.angle_max - self.angle_min) / 2.0;
        let norm_center_err = (center - self.curr_angle).abs() / half_range.abs();

        // Eases toward the ends of the sweep
        let k = (1.0 - norm_center_err) * (1.0 - MIN_SPEED_K) + MIN_SPEED_K;
        let shaped_omega = k * self.direction * self.omega;

        self.curr_angle =
            (self.curr_angle + shaped_omega * dt).clamp(self.angle_min, self.angle_max);

        // The clamp pins the angle exactly on a bound when it is reached
        if self.curr_angle == self.angle_min {
            self.direction = 1.0;
        } else if self.curr_angle == self.angle_max {
            self.direction = -1.0;
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let p1 = self.pos + point_rot(self.left, self.curr_angle);
        let p2 = self.pos + point_rot(self.right, self.curr_angle);
        surface.fill_polygon(&[self.pos, p1, p2], BEAM_COLOR, BEAM_ALPHA);
    }

    fn is_terminal(&self) -> bool {
        false
    }
}

/// Spawns beams on score milestones, alternating sides of the screen.
#[derive(Debug, Clone)]
pub struct BeamManager {
    window: Vec2,
    /// Far past any screen edge so the triangle tip is never visible
    length: f32,
    beams: Vec<Beam>,
    last_score: u32,
    /// Signed left-minus-right balance; `>= 0` spawns on the right
    left_sub_right: i32,
}

impl BeamManager {
    pub fn new(window: Vec2) -> Self {
        Self {
            window,
            length: 10.0 * (window.x + window.y),
            beams: Vec::new(),
            last_score: 0,
            left_sub_right: 0,
        }
    }

    /// Clear all beams and the spawn bookkeeping.
    pub fn reset(&mut self) {
        self.beams.clear();
        self.last_score = 0;
        self.left_sub_right = 0;
    }

    /// Evaluate the spawn gate for a new score value.
    ///
    /// Spawns once per qualifying score: at least `BEAM_MIN_SCORE`, on a
    /// `BEAM_SCORE_STEP` multiple, different from the previous observation,
    /// and under the live-beam cap.
    pub fn on_score<R: Rng>(&mut self, score: u32, rng: &mut R) {
        if score >= BEAM_MIN_SCORE
            && score % BEAM_SCORE_STEP == 0
            && score != self.last_score
            && self.beams.len() < MAX_BEAMS
        {
            self.add_beam(rng);
        }
        self.last_score = score;
    }

    fn add_beam<R: Rng>(&mut self, rng: &mut R) {
        use std::f32::consts::{FRAC_PI_2, PI};

        let (w, h) = (self.window.x, self.window.y);
        let y_pos = rng.random_range(h..=h * 1.2);
        let x_off = w * 0.5;

        let mut angle_min = FRAC_PI_2 * 0.4;
        let mut angle_max = FRAC_PI_2 * 0.85;
        let omega = PI * (rng.random::<f32>() + 0.3);
        let spread = PI / 70.0 + (PI / 100.0) * rng.random::<f32>();

        let x_pos = if self.left_sub_right >= 0 {
            self.left_sub_right -= 1;
            (angle_min, angle_max) = (-angle_max, -angle_min);
            w + x_off
        } else {
            self.left_sub_right += 1;
            -x_off
        };

        self.beams.push(Beam::new(
            Vec2::new(x_pos, y_pos),
            angle_min,
            angle_max,
            omega,
            spread,
            self.length,
        ));
    }

    pub fn update(&mut self, dt: f32) {
        for beam in &mut self.beams {
            beam.update(dt);
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        for beam in &self.beams {
            beam.render(surface);
        }
    }

    pub fn len(&self) -> usize {
        self.beams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }
}
