//! Session controller: the per-frame driver
//!
//! Owns the ball, the three effect managers and the score widgets.
//! Translates clicks and score changes into spawn triggers, tracks the
//! play/fail state machine and the aggregate statistics.
//!
//! The session is idle (`NotPlaying`) until a click lands on the ball;
//! from then on every on-ball click re-bounces and scores, and the ball
//! dropping out the bottom ends the episode.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::beam::BeamManager;
use super::emote::EmoteManager;
use super::firework::FireworkManager;
use super::SimError;
use crate::consts::{BALL_SPAWN_GAP, EMOTE_JITTER};
use crate::highscores::SessionLog;
use crate::render::{SpriteSet, Surface};
use crate::widgets::{HighScoreCounter, ScoreCounter};

/// One play session: a ball, its effects, and the running statistics.
#[derive(Debug, Clone)]
pub struct Session {
    rng: Pcg32,

    playing: bool,
    score: u32,
    total_clicks: u32,
    log: SessionLog,

    ball: Ball,
    ball_spawn: Vec2,

    emotes: EmoteManager,
    beams: BeamManager,
    fireworks: FireworkManager,

    score_counter: ScoreCounter,
    high_score_counter: HighScoreCounter,
}

impl Session {
    /// Build a session for the given window, seeding all randomness from
    /// `seed`. Rejects non-positive window dimensions.
    pub fn new(sprites: &SpriteSet, window: Vec2, seed: u64) -> Result<Self, SimError> {
        let mut ball = Ball::new(sprites.ball, window)?;
        let ball_spawn = Vec2::new(
            window.x / 2.0,
            window.y - ball.radius - BALL_SPAWN_GAP,
        );
        ball.pos = ball_spawn;

        log::info!(
            "Session started: window {}x{}, seed {seed}",
            window.x,
            window.y
        );

        Ok(Self {
            rng: Pcg32::seed_from_u64(seed),
            playing: false,
            score: 0,
            total_clicks: 0,
            log: SessionLog::new(),
            ball,
            ball_spawn,
            emotes: EmoteManager::new(sprites),
            beams: BeamManager::new(window),
            fireworks: FireworkManager::new(window),
            score_counter: ScoreCounter::new(Vec2::new(window.x / 2.0, 65.0)),
            high_score_counter: HighScoreCounter::new(Vec2::new(window.x - 60.0, 50.0)),
        })
    }

    /// Advance one frame. Effects always animate; the ball only moves
    /// while playing.
    pub fn update(&mut self, dt: f32) {
        self.emotes.update(dt);
        self.beams.update(dt);
        self.fireworks.update(dt, &mut self.rng);

        if !self.playing {
            return;
        }

        self.ball.update(dt);
        if self.ball.is_below_window() {
            self.on_fail();
        }
    }

    /// Handle one press at `pos`.
    ///
    /// Every click spawns an emote (success pool on the ball, miss pool
    /// off it) and counts toward the click total. A hit starts play if
    /// idle, scores, and bounces the ball toward the click.
    pub fn on_click(&mut self, pos: Vec2) {
        let missed = (pos - self.ball.pos).length() > self.ball.radius;
        self.spawn_emote(pos, missed);
        self.total_clicks += 1;

        if missed {
            return;
        }

        self.playing = true;
        self.score += 1;

        self.ball.bounce(pos, &mut self.rng);
        self.score_counter.set_state(self.score, true);
        self.beams.on_score(self.score, &mut self.rng);
        self.fireworks.on_score(self.score);
    }

    /// Draw everything back-to-front. Emotes go last so tap feedback is
    /// never hidden under the ball.
    pub fn render(&self, surface: &mut dyn Surface) {
        self.high_score_counter.render(surface);
        self.score_counter.render(surface);

        self.fireworks.render(surface);
        self.beams.render(surface);

        self.ball.render(surface);
        self.emotes.render(surface);
    }

    /// End the current episode: record it, reset the ball and the
    /// score-driven effects, go idle.
    fn on_fail(&mut self) {
        self.playing = false;
        self.ball.reset();
        self.ball.pos = self.ball_spawn;

        let new_best = self.log.record(self.score, self.total_clicks);
        if new_best {
            log::info!("New high score: {}", self.score);
        }
        log::info!(
            "Episode {} over: score {}, clicks {}",
            self.log.len(),
            self.score,
            self.total_clicks
        );

        self.high_score_counter.set_score(self.log.best_score());
        self.score_counter.set_state(self.log.best_score(), false);

        self.score = 0;
        self.total_clicks = 0;

        self.beams.reset();
        self.fireworks.reset();
    }

    fn spawn_emote(&mut self, pos: Vec2, missed: bool) {
        let jitter = Vec2::new(
            self.rng.random_range(-EMOTE_JITTER..=EMOTE_JITTER) as f32,
            self.rng.random_range(-EMOTE_JITTER..=EMOTE_JITTER) as f32,
        );
        let emote_pos = pos + jitter;

        if missed {
            self.emotes.spawn_miss(emote_pos, &mut self.rng);
        } else {
            self.emotes.spawn_success(emote_pos, &mut self.rng);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_clicks(&self) -> u32 {
        self.total_clicks
    }

    pub fn high_score(&self) -> u32 {
        self.log.best_score()
    }

    /// Finished episodes so far (one per fail)
    pub fn episodes(&self) -> usize {
        self.log.len()
    }

    pub fn session_log(&self) -> &SessionLog {
        &self.log
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn live_emotes(&self) -> usize {
        self.emotes.len()
    }

    pub fn live_beams(&self) -> usize {
        self.beams.len()
    }

    pub fn live_fireworks(&self) -> usize {
        self.fireworks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
    use crate::render::NullSurface;

    const DT: f32 = 1.0 / 60.0;

    fn test_session(seed: u64) -> Session {
        let sprites = SpriteSet::uniform(Vec2::new(40.0, 40.0), Vec2::new(32.0, 32.0));
        Session::new(&sprites, Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT), seed).unwrap()
    }

    #[test]
    fn test_rejects_bad_window() {
        let sprites = SpriteSet::uniform(Vec2::new(40.0, 40.0), Vec2::new(32.0, 32.0));
        let err = Session::new(&sprites, Vec2::new(-322.0, 455.0), 1).unwrap_err();
        assert!(matches!(err, SimError::InvalidWindow { .. }));
    }

    #[test]
    fn test_ball_spawns_resting_above_bottom_edge() {
        let session = test_session(1);
        let ball = session.ball();
        assert_eq!(ball.pos.x, WINDOW_WIDTH / 2.0);
        assert_eq!(ball.pos.y, WINDOW_HEIGHT - ball.radius - BALL_SPAWN_GAP);
        assert!(!session.is_playing());
        assert_eq!(session.episodes(), 0, "no phantom episode at startup");
    }

    #[test]
    fn test_miss_click_while_idle() {
        let mut session = test_session(2);
        let far = session.ball().pos + Vec2::new(session.ball().radius * 3.0, 0.0);

        session.on_click(far);
        assert!(!session.is_playing());
        assert_eq!(session.score(), 0);
        assert_eq!(session.total_clicks(), 1);
        assert_eq!(session.live_emotes(), 1, "exactly one miss emote");
    }

    #[test]
    fn test_hit_click_starts_play_and_scores() {
        let mut session = test_session(3);
        let on_ball = session.ball().pos;

        session.on_click(on_ball);
        assert!(session.is_playing());
        assert_eq!(session.score(), 1);
        assert_eq!(session.total_clicks(), 1);
        assert_eq!(session.live_emotes(), 1);
        // Tap always launches the ball upward
        assert!(session.ball().vel.y < 0.0);

        session.on_click(session.ball().pos);
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn test_idle_session_ball_stays_put() {
        let mut session = test_session(4);
        let spawn = session.ball().pos;
        for _ in 0..120 {
            session.update(DT);
        }
        assert_eq!(session.ball().pos, spawn);
    }

    #[test]
    fn test_fail_records_episode_and_resets() {
        let mut session = test_session(5);
        session.on_click(session.ball().pos);
        session.on_click(session.ball().pos);
        assert_eq!(session.score(), 2);

        // Let the ball drop out; one bounce can't keep it up forever
        let mut steps = 0;
        while session.is_playing() {
            session.update(DT);
            steps += 1;
            assert!(steps < 3600, "ball never fell out");
        }

        assert_eq!(session.episodes(), 1);
        assert_eq!(session.high_score(), 2);
        assert_eq!(session.score(), 0);
        assert_eq!(session.total_clicks(), 0);
        assert_eq!(session.ball().pos, session.ball_spawn);
        assert_eq!(session.ball().vel, Vec2::ZERO);
        assert_eq!(session.live_beams(), 0);
        assert_eq!(
            session.session_log().episodes[0],
            crate::highscores::EpisodeRecord { score: 2, clicks: 2 }
        );
    }

    #[test]
    fn test_high_score_keeps_best_across_episodes() {
        let mut session = test_session(6);

        let run_out = |session: &mut Session| {
            let mut steps = 0;
            while session.is_playing() {
                session.update(DT);
                steps += 1;
                assert!(steps < 3600, "ball never fell out");
            }
        };

        // Episode 1: two taps
        session.on_click(session.ball().pos);
        session.on_click(session.ball().pos);
        run_out(&mut session);
        assert_eq!(session.high_score(), 2);

        // Episode 2: single tap, worse score
        session.on_click(session.ball().pos);
        run_out(&mut session);
        assert_eq!(session.high_score(), 2, "best survives a worse episode");
        assert_eq!(session.episodes(), 2);
    }

    #[test]
    fn test_miss_during_play_does_not_end_episode() {
        let mut session = test_session(7);
        session.on_click(session.ball().pos);
        assert!(session.is_playing());

        let far = session.ball().pos + Vec2::new(200.0, 0.0);
        session.on_click(far);
        assert!(session.is_playing());
        assert_eq!(session.score(), 1);
        assert_eq!(session.total_clicks(), 2);
    }

    #[test]
    fn test_render_draws_widgets_and_ball() {
        let session = test_session(8);
        let mut surface = NullSurface::new();
        session.render(&mut surface);

        // Idle: score widget caption+figure, high score caption+value
        assert_eq!(surface.texts, 4);
        assert_eq!(surface.sprites, 1, "just the ball, no emotes yet");
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let script = |session: &mut Session| {
            session.on_click(session.ball().pos);
            for _ in 0..30 {
                session.update(DT);
            }
            session.on_click(session.ball().pos);
            for _ in 0..30 {
                session.update(DT);
            }
        };

        let mut a = test_session(42);
        let mut b = test_session(42);
        script(&mut a);
        script(&mut b);

        assert_eq!(a.score(), b.score());
        assert_eq!(a.ball().pos, b.ball().pos);
        assert_eq!(a.ball().vel, b.ball().vel);
    }
}
