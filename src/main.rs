//! Kickflip entry point
//!
//! The real front end (rendering, physics integration, tap gestures,
//! audio playback) belongs to a host engine. This binary wires the sim to
//! a small headless stand-in for those collaborators so full runs can be
//! exercised from the command line: fixed 60 Hz timestamps, a toy
//! vertical integrator for the skater, and synthesized contact events.

use kickflip::audio::{AudioManager, SoundEffect};
use kickflip::consts::EXPECTED_FRAME_SECS;
use kickflip::highscores::HighScores;
use kickflip::sim::{
    ContactBody, GameConfig, GameEvent, GamePhase, GameState, handle_contact, handle_tap, tick,
};

/// Downward acceleration used by the stand-in physics
const DEMO_GRAVITY: f32 = -400.0;
/// Frames between demo taps while running
const DEMO_TAP_INTERVAL: u64 = 150;
/// Pickup distance for synthesized gem contacts
const DEMO_PICKUP_RADIUS: f32 = 60.0;
/// Runs to play before exiting
const DEMO_RUNS: usize = 3;
/// Hard cap so the demo always terminates
const DEMO_MAX_FRAMES: u64 = 60 * 300;

fn main() {
    env_logger::init();
    log::info!("kickflip (headless demo) starting...");

    let mut state = GameState::new(0x5CA7E, GameConfig::default());
    let audio = AudioManager::with_sink(Box::new(|name, vol| {
        log::debug!("sfx '{}' at {:.2}", name, vol);
    }));
    let mut leaderboard = HighScores::new();

    // First tap dismisses the start overlay
    handle_tap(&mut state);

    let mut runs_finished = 0;
    let mut run_started_at = 0.0;

    for frame in 0..DEMO_MAX_FRAMES {
        let now = frame as f64 * EXPECTED_FRAME_SECS;

        if frame > 0 && frame % DEMO_TAP_INTERVAL == 0 {
            handle_tap(&mut state);
        }

        tick(&mut state, now);
        step_host_physics(&mut state, EXPECTED_FRAME_SECS as f32);

        for event in state.drain_events() {
            match event {
                GameEvent::Started => {
                    run_started_at = now;
                    log::info!("overlay dismissed, run {} underway", runs_finished + 1);
                }
                GameEvent::Jumped => audio.play(SoundEffect::Jump),
                GameEvent::GemCollected { .. } => audio.play(SoundEffect::Gem),
                GameEvent::SparkBurst => log::debug!("sparks!"),
                GameEvent::ScoreChanged { score } => log::debug!("score: {:04}", score),
                GameEvent::GameOver {
                    score, new_record, ..
                } => {
                    log::info!(
                        "overlay: Game Over - score {:04}{}",
                        score,
                        if new_record { " (new record!)" } else { "" }
                    );
                    leaderboard.add_score(score, state.gems_collected, now - run_started_at);
                    runs_finished += 1;
                }
            }
        }

        if runs_finished >= DEMO_RUNS {
            break;
        }
        if state.phase == GamePhase::NotRunning {
            // Tap through the game-over overlay into the next run
            handle_tap(&mut state);
        }
    }

    match leaderboard.top_score() {
        Some(best) => log::info!(
            "demo finished: {} runs, best score {}",
            leaderboard.entries.len(),
            best
        ),
        None => log::info!("demo finished with no scored runs"),
    }
}

/// Stand-in for the host physics system.
///
/// Integrates the skater's vertical motion, holds it up only where a
/// brick sits underneath, and reports contacts the way a physics engine
/// would - the sim itself never integrates motion.
fn step_host_physics(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.skater.velocity.y += DEMO_GRAVITY * dt;
    state.skater.pos.y += state.skater.velocity.y * dt;

    let half_span = (state.config.brick_size.x + state.config.skater_size.x) / 2.0;
    let support = state
        .bricks
        .iter()
        .find(|b| (b.pos.x - state.skater.pos.x).abs() <= half_span)
        .map(|b| b.id);

    // Catch the skater at ground height over solid ground; once it has
    // fallen well into a gap it is past saving
    let ground = state.skater.minimum_y;
    let landing_window =
        state.skater.pos.y <= ground && state.skater.pos.y > ground - 40.0;
    if let Some(brick_id) = support {
        if state.skater.velocity.y <= 0.0 && landing_window {
            state.skater.pos.y = ground;
            handle_contact(state, ContactBody::Skater, ContactBody::Brick(brick_id));
            state.skater.velocity.y = 0.0;
        }
    }

    let picked_up: Vec<u32> = state
        .gems
        .iter()
        .filter(|gem| gem.pos.distance(state.skater.pos) <= DEMO_PICKUP_RADIUS)
        .map(|gem| gem.id)
        .collect();
    for id in picked_up {
        handle_contact(state, ContactBody::Skater, ContactBody::Gem(id));
    }
}
