//! Backend-facing drawing abstraction
//!
//! The simulation never talks to a real renderer. Everything it needs from
//! the environment is captured here: sprites with known pixel dimensions
//! and a [`Surface`] that can blit, fill shapes, and draw centered text in
//! screen pixel coordinates.

use glam::Vec2;

/// An RGB color (no alpha; alpha is a per-draw-call parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Opaque handle to a backend-loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// A sprite handle plus its pixel dimensions
///
/// The simulation only ever reads the dimensions; decoding and ownership of
/// the actual pixels stay with the backend.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub id: SpriteId,
    pub size: Vec2,
}

impl Sprite {
    pub fn new(id: SpriteId, size: Vec2) -> Self {
        Self { id, size }
    }
}

/// Number of sprites in each emote pool
pub const EMOTE_POOL_SIZE: usize = 5;

/// The full sprite set the session needs: one ball, five "success" emotes,
/// five "miss" emotes.
#[derive(Debug, Clone, Copy)]
pub struct SpriteSet {
    pub ball: Sprite,
    pub success: [Sprite; EMOTE_POOL_SIZE],
    pub miss: [Sprite; EMOTE_POOL_SIZE],
}

impl SpriteSet {
    /// Build a sprite set where every sprite shares one size, with ids
    /// assigned sequentially. Enough for headless runs and tests.
    pub fn uniform(ball_size: Vec2, emote_size: Vec2) -> Self {
        let sprite = |id: u32, size: Vec2| Sprite::new(SpriteId(id), size);
        Self {
            ball: sprite(0, ball_size),
            success: std::array::from_fn(|i| sprite(1 + i as u32, emote_size)),
            miss: std::array::from_fn(|i| sprite(6 + i as u32, emote_size)),
        }
    }
}

/// Drawing surface in screen pixel coordinates, y-down.
///
/// Implemented by the real backend; the simulation renders back-to-front
/// through this trait and nothing else.
pub trait Surface {
    /// Blit a sprite centered at `center`, rotated by `angle_deg` degrees
    /// counter-clockwise, modulated by `alpha`.
    fn blit_sprite(&mut self, sprite: Sprite, center: Vec2, angle_deg: f32, alpha: u8);
    /// Fill a convex polygon given in fan order.
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgb, alpha: u8);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: u8);
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb);
    /// Draw text centered on `center` at the given pixel size.
    fn draw_text(&mut self, text: &str, center: Vec2, size_px: f32, color: Rgb);
}

/// A surface that records draw-call counts and discards the rest.
///
/// Used by the headless demo binary and by tests that only care whether
/// something was drawn.
#[derive(Debug, Default, Clone)]
pub struct NullSurface {
    pub sprites: usize,
    pub polygons: usize,
    pub circles: usize,
    pub lines: usize,
    pub texts: usize,
}

impl NullSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.sprites + self.polygons + self.circles + self.lines + self.texts
    }
}

impl Surface for NullSurface {
    fn blit_sprite(&mut self, _sprite: Sprite, _center: Vec2, _angle_deg: f32, _alpha: u8) {
        self.sprites += 1;
    }

    fn fill_polygon(&mut self, _points: &[Vec2], _color: Rgb, _alpha: u8) {
        self.polygons += 1;
    }

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Rgb, _alpha: u8) {
        self.circles += 1;
    }

    fn draw_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Rgb) {
        self.lines += 1;
    }

    fn draw_text(&mut self, _text: &str, _center: Vec2, _size_px: f32, _color: Rgb) {
        self.texts += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sprite_set_ids_distinct() {
        let set = SpriteSet::uniform(Vec2::new(64.0, 64.0), Vec2::new(32.0, 32.0));
        let mut ids: Vec<u32> = vec![set.ball.id.0];
        ids.extend(set.success.iter().map(|s| s.id.0));
        ids.extend(set.miss.iter().map(|s| s.id.0));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 1 + 2 * EMOTE_POOL_SIZE);
    }

    #[test]
    fn test_null_surface_counts() {
        let mut surface = NullSurface::new();
        surface.fill_circle(Vec2::ZERO, 4.0, Rgb::new(255, 0, 0), 255);
        surface.draw_line(Vec2::ZERO, Vec2::ONE, 3.0, Rgb::new(0, 0, 0));
        assert_eq!(surface.circles, 1);
        assert_eq!(surface.lines, 1);
        assert_eq!(surface.total(), 2);
    }
}
