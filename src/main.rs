//! Keepy-Up entry point
//!
//! Headless demo: drives a full session with a scripted autoplayer at a
//! fixed timestep, renders into a draw-call-counting surface, and dumps
//! the episode history as JSON on exit. Hook a real backend up to
//! `render::Surface` to see it; the simulation does not care.

use std::path::Path;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use keepy_up::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use keepy_up::render::{NullSurface, SpriteSet};
use keepy_up::sim::Session;

/// Fixed simulation timestep (60 Hz, matching the original frame clock)
const SIM_DT: f32 = 1.0 / 60.0;
/// Simulated session length in seconds
const DEMO_SECONDS: u64 = 120;
/// Frames between autoplayer taps
const TAP_INTERVAL: u64 = 24;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let seed = std::env::var("KEEPY_UP_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB0B1E5);
    log::info!("Keepy-Up headless demo, seed {seed}");

    let sprites = SpriteSet::uniform(Vec2::new(40.0, 40.0), Vec2::new(32.0, 32.0));
    let window = Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut session = Session::new(&sprites, window, seed)?;

    // The autoplayer aims near the ball with a sloppy hand: most taps
    // land, some miss, so episodes actually end and the history fills up.
    let mut hand = Pcg32::seed_from_u64(seed ^ 0x5EED);

    let mut surface = NullSurface::new();

    for frame in 0..DEMO_SECONDS * 60 {
        session.update(SIM_DT);

        if frame % TAP_INTERVAL == 0 {
            let ball = session.ball();
            let slop = ball.radius * 1.5;
            let aim = ball.pos
                + Vec2::new(
                    hand.random_range(-slop..=slop),
                    hand.random_range(-slop..=slop),
                );
            session.on_click(aim);
        }

        session.render(&mut surface);
    }

    log::info!(
        "Demo finished: {} episodes, high score {}, {} draw calls",
        session.episodes(),
        session.high_score(),
        surface.total()
    );

    let out = Path::new("keepy_up_session.json");
    session.session_log().save_to_path(out)?;
    println!(
        "{} episodes, high score {} (log written to {})",
        session.episodes(),
        session.high_score(),
        out.display()
    );

    Ok(())
}
