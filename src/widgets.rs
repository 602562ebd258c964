//! Score display widgets
//!
//! Two text widgets drawn through `Surface::draw_text` (center-anchored).
//! Both cache their displayed value; the session restates them on score
//! changes and on fail rather than every frame.

use glam::Vec2;

use crate::render::{Rgb, Surface};

/// Accent color used for the best score while idle
pub const PRIMARY_COLOR: Rgb = Rgb::new(0, 121, 241);
/// Muted color used for the live score during play
pub const SECONDARY_COLOR: Rgb = Rgb::new(128, 128, 128);
/// High-score widget text color
pub const HIGH_SCORE_COLOR: Rgb = Rgb::new(0, 0, 0);

const CAPTION_SIZE: f32 = 18.0;
const FIGURE_SIZE: f32 = 75.0;
/// Caption-to-figure spacing while idle
const IDLE_FIGURE_GAP: f32 = 65.0;
/// Caption-to-value spacing in the high-score widget
const HIGH_SCORE_GAP: f32 = 25.0;

/// Central score readout.
///
/// Idle: a "Current Best" caption over the best score in the accent color.
/// Playing: just the live score, muted.
#[derive(Debug, Clone)]
pub struct ScoreCounter {
    pub pos: Vec2,
    score: u32,
    started: bool,
}

impl ScoreCounter {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            score: 0,
            started: false,
        }
    }

    pub fn set_state(&mut self, score: u32, started: bool) {
        self.score = score;
        self.started = started;
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let figure = self.score.to_string();
        if !self.started {
            surface.draw_text(
                "Current Best",
                self.pos + Vec2::new(0.0, CAPTION_SIZE / 2.0),
                CAPTION_SIZE,
                SECONDARY_COLOR,
            );
            surface.draw_text(
                &figure,
                self.pos + Vec2::new(0.0, FIGURE_SIZE / 2.0 + IDLE_FIGURE_GAP),
                FIGURE_SIZE,
                PRIMARY_COLOR,
            );
        } else {
            surface.draw_text(
                &figure,
                self.pos + Vec2::new(0.0, FIGURE_SIZE / 2.0 + CAPTION_SIZE),
                FIGURE_SIZE,
                SECONDARY_COLOR,
            );
        }
    }
}

/// Small "High Score" readout near the top-right corner
#[derive(Debug, Clone)]
pub struct HighScoreCounter {
    pub pos: Vec2,
    score: u32,
}

impl HighScoreCounter {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, score: 0 }
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.draw_text("High Score", self.pos, CAPTION_SIZE, HIGH_SCORE_COLOR);
        surface.draw_text(
            &self.score.to_string(),
            self.pos + Vec2::new(0.0, HIGH_SCORE_GAP),
            CAPTION_SIZE,
            HIGH_SCORE_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullSurface;

    #[test]
    fn test_score_counter_idle_draws_caption_and_figure() {
        let counter = ScoreCounter::new(Vec2::new(161.0, 65.0));
        let mut surface = NullSurface::new();
        counter.render(&mut surface);
        assert_eq!(surface.texts, 2);
    }

    #[test]
    fn test_score_counter_playing_draws_figure_only() {
        let mut counter = ScoreCounter::new(Vec2::new(161.0, 65.0));
        counter.set_state(12, true);
        let mut surface = NullSurface::new();
        counter.render(&mut surface);
        assert_eq!(surface.texts, 1);
    }

    #[test]
    fn test_high_score_counter_draws_caption_and_value() {
        let mut counter = HighScoreCounter::new(Vec2::new(262.0, 50.0));
        counter.set_score(31);
        assert_eq!(counter.score(), 31);

        let mut surface = NullSurface::new();
        counter.render(&mut surface);
        assert_eq!(surface.texts, 2);
    }
}
