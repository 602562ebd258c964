//! Fireworks: fly up as a streak, explode into rays, fade out
//!
//! A firework is fixed at construction: start point, explosion point,
//! time-of-flight, color, and a ray layout drawn once and kept for the
//! whole lifetime. Per-state elapsed counters are independent; the state
//! machine never revisits a state.

use glam::Vec2;
use rand::Rng;

use super::effect::Effect;
use crate::consts::{FIREWORK_MIN_SCORE, FIREWORK_SPAWN_GATE, MAX_FIREWORKS};
use crate::render::{Rgb, Surface};
use crate::{norm_or_identity, point_rot, rotated_quad};

/// Fireball/ray phase duration (seconds)
pub const EXPLOSION_DURATION: f32 = 0.5;
/// Fade-out phase duration (seconds)
pub const FADE_DURATION: f32 = 0.5;
/// Ray count is drawn uniformly from this inclusive range at construction
pub const MIN_RAYS: usize = 8;
pub const MAX_RAYS: usize = 12;
/// Ray extent at full explosion progress (pixels)
pub const RAY_MAX_LENGTH: f32 = 55.0;
pub const RAY_THICKNESS: f32 = 5.0;
/// Fireball radius at explosion start (pixels)
pub const FIREBALL_MAX_RADIUS: f32 = 40.0;
/// Streak length as a fraction of the total flight distance
pub const STREAK_LENGTH_RATIO: f32 = 0.25;

pub const STREAK_COLOR: Rgb = Rgb::new(155, 155, 155);

/// Explosion colors, picked uniformly per firework
pub const PALETTE: [Rgb; 4] = [
    Rgb::new(255, 196, 0),
    Rgb::new(0, 214, 255),
    Rgb::new(252, 100, 255),
    Rgb::new(19, 211, 31),
];

/// Firework lifecycle. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FireworkState {
    Flying,
    Exploding,
    Fading,
    Finished,
}

/// One firework instance
#[derive(Debug, Clone)]
pub struct Firework {
    start: Vec2,
    end: Vec2,
    flight_distance: f32,
    pos: Vec2,
    vel: Vec2,
    tof: f32,
    color: Rgb,
    state: FireworkState,
    elapsed_flight: f32,
    elapsed_explosion: f32,
    elapsed_fade: f32,
    /// Evenly spaced ray angles, fixed at construction
    ray_angles: Vec<f32>,
}

impl Firework {
    pub fn new<R: Rng>(start: Vec2, end: Vec2, tof: f32, color: Rgb, rng: &mut R) -> Self {
        let total_rays = rng.random_range(MIN_RAYS..=MAX_RAYS);
        let ray_angles = (0..total_rays)
            .map(|i| i as f32 / total_rays as f32 * std::f32::consts::TAU)
            .collect();

        Self {
            start,
            end,
            flight_distance: (start - end).length(),
            pos: start,
            vel: (end - start) / tof,
            tof,
            color,
            state: FireworkState::Flying,
            elapsed_flight: 0.0,
            elapsed_explosion: 0.0,
            elapsed_fade: 0.0,
            ray_angles,
        }
    }

    pub fn state(&self) -> FireworkState {
        self.state
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn ray_count(&self) -> usize {
        self.ray_angles.len()
    }

    fn render_fireball(&self, surface: &mut dyn Surface, prog: f32, alpha: u8) {
        const K_MIN: f32 = 0.25;
        let k = (1.0 - prog) * (1.0 - K_MIN) + K_MIN;
        surface.fill_circle(self.end, FIREBALL_MAX_RADIUS * k, self.color, alpha);
    }

    fn render_rays(&self, surface: &mut dyn Surface, prog: f32, alpha: u8) {
        let upper = RAY_MAX_LENGTH * prog;
        let lower = RAY_MAX_LENGTH * 0.2 * prog;

        for &angle in &self.ray_angles {
            let dir = point_rot(Vec2::new(0.0, 1.0), angle);
            let dim = Vec2::new(RAY_THICKNESS, upper - lower);
            let center = self.end + dir * (upper - lower);
            let quad = rotated_quad(center, angle, dim);
            surface.fill_polygon(&quad, self.color, alpha);
        }
    }

    fn render_streak(&self, surface: &mut dyn Surface) {
        let prog = self.elapsed_flight / self.tof;
        // Brightest/longest streak near the ends of the flight
        let k = 1.0 - ((prog * std::f32::consts::TAU).cos() / 2.0 + 0.5);

        let direction = self.end - self.start;
        let head = self.start + direction * prog;
        let length = k * self.flight_distance * STREAK_LENGTH_RATIO;
        let tail = head - norm_or_identity(direction) * length;

        surface.draw_line(head, tail, 3.0, STREAK_COLOR);
    }
}

impl Effect for Firework {
    fn update(&mut self, dt: f32) {
        match self.state {
            FireworkState::Flying => {
                self.pos += self.vel * dt;
                self.elapsed_flight = (self.elapsed_flight + dt).clamp(0.0, self.tof);
                if self.elapsed_flight >= self.tof {
                    self.state = FireworkState::Exploding;
                }
            }
            FireworkState::Exploding => {
                self.elapsed_explosion =
                    (self.elapsed_explosion + dt).clamp(0.0, EXPLOSION_DURATION);
                if self.elapsed_explosion >= EXPLOSION_DURATION {
                    self.state = FireworkState::Fading;
                }
            }
            FireworkState::Fading => {
                self.elapsed_fade = (self.elapsed_fade + dt).clamp(0.0, FADE_DURATION);
                if self.elapsed_fade >= FADE_DURATION {
                    self.state = FireworkState::Finished;
                }
            }
            FireworkState::Finished => {}
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        match self.state {
            FireworkState::Flying => self.render_streak(surface),
            FireworkState::Exploding => {
                let prog = self.elapsed_explosion / EXPLOSION_DURATION;
                self.render_fireball(surface, prog, 255);
                self.render_rays(surface, prog, 255);
            }
            FireworkState::Fading => {
                // Frozen at full extent, fading out globally
                let prog = self.elapsed_fade / FADE_DURATION;
                let alpha = ((1.0 - prog) * 255.0) as u8;
                self.render_fireball(surface, 1.0, alpha);
                self.render_rays(surface, 1.0, alpha);
            }
            FireworkState::Finished => {}
        }
    }

    fn is_terminal(&self) -> bool {
        self.state == FireworkState::Finished
    }
}

/// Owns the live fireworks. Unordered: every member is individually tested
/// for completion each frame and pruning is a filter-rebuild, unlike the
/// emote queue's front-only eviction.
#[derive(Debug, Clone)]
pub struct FireworkManager {
    window: Vec2,
    fireworks: Vec<Firework>,
    last_score: u32,
}

impl FireworkManager {
    pub fn new(window: Vec2) -> Self {
        Self {
            window,
            fireworks: Vec::new(),
            last_score: 0,
        }
    }

    /// Record the latest score; spawning itself happens in `update`.
    pub fn on_score(&mut self, score: u32) {
        self.last_score = score;
    }

    /// Forget the score. Live fireworks are left to finish naturally.
    pub fn reset(&mut self) {
        self.last_score = 0;
    }

    /// Roll for a new firework, advance every live one, prune finished.
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        if self.last_score >= FIREWORK_MIN_SCORE
            && self.fireworks.len() < MAX_FIREWORKS
            && rng.random::<f32>() > FIREWORK_SPAWN_GATE
        {
            self.spawn(rng);
        }

        for firework in &mut self.fireworks {
            firework.update(dt);
        }
        self.fireworks.retain(|firework| !firework.is_terminal());
    }

    /// Launch from a random point below the screen toward a random point
    /// in the upper part of the window.
    fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let (w, h) = (self.window.x, self.window.y);

        let start = Vec2::new(rng.random_range(w * 0.1..=w * 0.9), h + 100.0);
        let end = Vec2::new(
            rng.random_range(w * 0.05..=w * 0.95),
            rng.random_range(h * 0.05..=h * 0.65),
        );
        let tof = (rng.random::<f32>() + 0.5) / 1.5;
        let color = PALETTE[rng.random_range(0..PALETTE.len())];

        self.fireworks
            .push(Firework::new(start, end, tof, color, rng));
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        for firework in &self.fireworks {
            firework.render(surface);
        }
    }

    pub fn len(&self) -> usize {
        self.fireworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fireworks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullSurface;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn test_firework(rng: &mut Pcg32) -> Firework {
        Firework::new(
            Vec2::new(100.0, 500.0),
            Vec2::new(150.0, 100.0),
            0.5,
            PALETTE[0],
            rng,
        )
    }

    #[test]
    fn test_ray_count_in_range_and_stable() {
        for seed in 0..32 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut firework = test_firework(&mut rng);
            let rays = firework.ray_count();
            assert!((MIN_RAYS..=MAX_RAYS).contains(&rays));

            while firework.state() != FireworkState::Finished {
                firework.update(0.05);
                assert_eq!(firework.ray_count(), rays, "ray layout must not change");
            }
        }
    }

    #[test]
    fn test_state_transitions_in_order() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut firework = test_firework(&mut rng);
        assert_eq!(firework.state(), FireworkState::Flying);

        firework.update(0.5); // reaches ToF exactly
        assert_eq!(firework.state(), FireworkState::Exploding);

        firework.update(EXPLOSION_DURATION);
        assert_eq!(firework.state(), FireworkState::Fading);

        firework.update(FADE_DURATION);
        assert_eq!(firework.state(), FireworkState::Finished);
    }

    #[test]
    fn test_flight_follows_constant_velocity() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut firework = test_firework(&mut rng);

        firework.update(0.25); // half the flight
        let expected = Vec2::new(100.0, 500.0) + (Vec2::new(150.0, 100.0) - Vec2::new(100.0, 500.0)) * 0.5;
        assert!((firework.pos() - expected).length() < 1e-3);
    }

    #[test]
    fn test_render_calls_per_state() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut firework = test_firework(&mut rng);
        let rays = firework.ray_count();

        let mut surface = NullSurface::new();
        firework.render(&mut surface);
        assert_eq!(surface.lines, 1, "flying renders a single streak line");

        firework.update(0.5);
        let mut surface = NullSurface::new();
        firework.render(&mut surface);
        assert_eq!(surface.circles, 1);
        assert_eq!(surface.polygons, rays);

        firework.update(EXPLOSION_DURATION);
        firework.update(FADE_DURATION);
        let mut surface = NullSurface::new();
        firework.render(&mut surface);
        assert_eq!(surface.total(), 0, "finished fireworks draw nothing");
    }

    #[test]
    fn test_manager_does_not_spawn_below_min_score() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut mgr = FireworkManager::new(Vec2::new(322.0, 455.0));
        mgr.on_score(FIREWORK_MIN_SCORE - 1);

        for _ in 0..2000 {
            mgr.update(1.0 / 60.0, &mut rng);
        }
        assert!(mgr.is_empty());
    }

    #[test]
    fn test_manager_spawns_and_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut mgr = FireworkManager::new(Vec2::new(322.0, 455.0));
        mgr.on_score(FIREWORK_MIN_SCORE);

        let mut seen_any = false;
        // Tiny dt: fireworks pile up against the cap instead of finishing
        for _ in 0..2000 {
            mgr.update(1e-4, &mut rng);
            seen_any |= !mgr.is_empty();
            assert!(mgr.len() <= MAX_FIREWORKS);
        }
        assert!(seen_any, "3% per-frame chance must fire within 2000 frames");
        assert_eq!(mgr.len(), MAX_FIREWORKS, "population should reach the cap");
    }

    #[test]
    fn test_reset_forgets_score_but_keeps_live_fireworks() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut mgr = FireworkManager::new(Vec2::new(322.0, 455.0));
        mgr.on_score(40);
        mgr.spawn(&mut rng);
        mgr.spawn(&mut rng);
        assert_eq!(mgr.len(), 2);

        mgr.reset();
        assert_eq!(mgr.len(), 2, "in-flight fireworks outlive a fail");
        assert_eq!(mgr.last_score, 0);

        // But no new ones spawn until the score climbs again
        for _ in 0..2000 {
            mgr.update(1e-4, &mut rng);
            assert!(mgr.len() <= 2);
        }
    }
}
