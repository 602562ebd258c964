//! Tap-feedback emotes: pop in, hold, drift up and fade
//!
//! Each emote is an independent state machine with its own clock. State
//! transitions carry the overshoot (elapsed time beyond the state's
//! duration) into the next state's counter so a large frame delta never
//! stalls the animation at a boundary.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use super::effect::Effect;
use crate::render::{EMOTE_POOL_SIZE, Sprite, SpriteSet, Surface};

/// Time spent scaling in (seconds)
pub const POP_DURATION: f32 = 0.2;
/// Rise during the pop phase (pixels)
pub const POP_DISTANCE: f32 = 40.0;
/// Hold time at full opacity (seconds)
pub const STATIC_DURATION: f32 = 0.5;
/// Fade-out time (seconds)
pub const FADE_DURATION: f32 = 0.25;
/// Additional rise while fading (pixels)
pub const FADE_DISTANCE: f32 = 150.0;

/// Emote lifecycle. Transitions are one-way; `Expired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EmoteState {
    Popping,
    Static,
    Fading,
    Expired,
}

/// One floating emote sprite
#[derive(Debug, Clone)]
pub struct Emote {
    sprite: Sprite,
    origin: Vec2,
    pos: Vec2,
    alpha: u8,
    /// Elapsed time within the current state; starts at the previous
    /// state's overshoot, not zero
    elapsed: f32,
    state: EmoteState,
}

impl Emote {
    pub fn new(sprite: Sprite, pos: Vec2) -> Self {
        Self {
            sprite,
            origin: pos,
            pos,
            alpha: 0,
            elapsed: 0.0,
            state: EmoteState::Popping,
        }
    }

    pub fn state(&self) -> EmoteState {
        self.state
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }
}

impl Effect for Emote {
    fn update(&mut self, dt: f32) {
        if self.state == EmoteState::Expired {
            return;
        }

        self.elapsed += dt;
        match self.state {
            EmoteState::Popping => {
                let prog = (self.elapsed / POP_DURATION).clamp(0.0, 1.0);
                self.alpha = (prog * 255.0) as u8;
                self.pos.y = self.origin.y - POP_DISTANCE * prog;
                if self.elapsed > POP_DURATION {
                    self.elapsed -= POP_DURATION;
                    self.state = EmoteState::Static;
                }
            }
            EmoteState::Static => {
                self.alpha = 255;
                self.pos.y = self.origin.y - POP_DISTANCE;
                if self.elapsed > STATIC_DURATION {
                    self.elapsed -= STATIC_DURATION;
                    self.state = EmoteState::Fading;
                }
            }
            EmoteState::Fading => {
                let prog = (self.elapsed / FADE_DURATION).clamp(0.0, 1.0);
                self.alpha = ((1.0 - prog) * 255.0) as u8;
                self.pos.y = self.origin.y - POP_DISTANCE - FADE_DISTANCE * prog;
                if self.elapsed > FADE_DURATION {
                    self.state = EmoteState::Expired;
                }
            }
            EmoteState::Expired => {}
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        if self.state == EmoteState::Expired {
            return;
        }
        surface.blit_sprite(self.sprite, self.pos, 0.0, self.alpha);
    }

    fn is_terminal(&self) -> bool {
        self.state == EmoteState::Expired
    }
}

/// Owns the live emotes in spawn order.
///
/// The queue is a true FIFO: emotes all share the same lifetime, so the
/// oldest expires first and removal only ever scans from the front. An
/// expired emote stuck behind a live one waits its turn.
#[derive(Debug, Clone)]
pub struct EmoteManager {
    success: [Sprite; EMOTE_POOL_SIZE],
    miss: [Sprite; EMOTE_POOL_SIZE],
    emotes: VecDeque<Emote>,
}

impl EmoteManager {
    pub fn new(sprites: &SpriteSet) -> Self {
        Self {
            success: sprites.success,
            miss: sprites.miss,
            emotes: VecDeque::new(),
        }
    }

    /// Spawn a "hit" emote at `pos`, random sprite from the success pool.
    pub fn spawn_success<R: Rng>(&mut self, pos: Vec2, rng: &mut R) {
        let sprite = self.success[rng.random_range(0..EMOTE_POOL_SIZE)];
        self.emotes.push_back(Emote::new(sprite, pos));
    }

    /// Spawn a "miss" emote at `pos`, random sprite from the miss pool.
    pub fn spawn_miss<R: Rng>(&mut self, pos: Vec2, rng: &mut R) {
        let sprite = self.miss[rng.random_range(0..EMOTE_POOL_SIZE)];
        self.emotes.push_back(Emote::new(sprite, pos));
    }

    pub fn update(&mut self, dt: f32) {
        for emote in &mut self.emotes {
            emote.update(dt);
        }

        while self
            .emotes
            .front()
            .is_some_and(|emote| emote.is_terminal())
        {
            self.emotes.pop_front();
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        for emote in &self.emotes {
            emote.render(surface);
        }
    }

    pub fn len(&self) -> usize {
        self.emotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emotes.is_empty()
    }
}
