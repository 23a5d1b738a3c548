//! Per-frame game loop, score timer, and skater state machine
//!
//! The host engine calls [`tick`] once per rendering frame with a
//! monotonic timestamp in seconds, [`handle_tap`] for each discrete tap,
//! and routes physics contacts through [`super::contact::handle_contact`].

use super::state::{BrickLevel, GameEvent, GamePhase, GameState};
use super::track;
use crate::consts::*;

/// Advance the game by one frame.
///
/// No-op unless a run is in progress. Elapsed real time is normalized
/// against the reference frame duration so scrolling is frame-rate
/// independent; the first tick after a start sees zero elapsed time.
pub fn tick(state: &mut GameState, now: f64) {
    if state.phase != GamePhase::Running {
        return;
    }

    // The ramp has no cap; runs end long before it matters
    state.scroll_speed += SCROLL_SPEED_RAMP;

    let elapsed = match state.last_update_time {
        Some(last) => now - last,
        None => {
            // First frame of a run also primes the score cadence
            state.last_score_update_time = now;
            0.0
        }
    };
    state.last_update_time = Some(now);

    state.spark_ttl = (state.spark_ttl - elapsed as f32).max(0.0);

    let scroll_adjustment = (elapsed / EXPECTED_FRAME_SECS) as f32;
    let scroll_amount = state.scroll_speed * scroll_adjustment;

    track::update_bricks(state, scroll_amount);
    update_skater(state);
    if state.phase != GamePhase::Running {
        // Game over mid-tick: nothing else moves or scores
        return;
    }
    track::update_gems(state, scroll_amount);
    update_score(state, now);
}

/// Discrete tap from the input source: jump while running, (re)start
/// otherwise
pub fn handle_tap(state: &mut GameState) {
    match state.phase {
        GamePhase::Running => {
            if state.skater.on_ground {
                state.skater.velocity.y += JUMP_IMPULSE;
                state.push_event(GameEvent::Jumped);
            }
        }
        GamePhase::NotRunning => start_game(state),
    }
}

/// Reset everything for a fresh run
pub fn start_game(state: &mut GameState) {
    state.phase = GamePhase::Running;
    state.reset_skater();
    state.score = 0;
    state.gems_collected = 0;
    state.scroll_speed = STARTING_SCROLL_SPEED;
    state.brick_level = BrickLevel::Low;
    state.last_update_time = None;
    state.spark_ttl = 0.0;
    state.bricks.clear();
    state.gems.clear();
    log::info!("run started (seed {})", state.seed);
    state.push_event(GameEvent::Started);
}

/// End the run: freeze updates, finalize the high score, notify the host
pub fn game_over(state: &mut GameState) {
    state.phase = GamePhase::NotRunning;
    let new_record = state.score > state.high_score;
    if new_record {
        state.high_score = state.score;
    }
    log::info!(
        "game over: score {} (best {}{})",
        state.score,
        state.high_score,
        if new_record { ", new record" } else { "" }
    );
    state.push_event(GameEvent::GameOver {
        score: state.score,
        high_score: state.high_score,
        new_record,
    });
}

/// Airborne inference and game-over detection.
///
/// A vertical speed past the threshold means the skater left the ground;
/// the reverse transition only happens on a brick contact. Falling off
/// screen or tipping past the maximum angle ends the run.
fn update_skater(state: &mut GameState) {
    if state.skater.velocity.y.abs() > AIRBORNE_SPEED_THRESHOLD {
        state.skater.on_ground = false;
    }

    let off_screen = state.skater.pos.y < 0.0 || state.skater.pos.x < 0.0;
    let max_tilt = MAX_TILT_DEGREES.to_radians();
    let tipped_over = state.skater.rotation.abs() > max_tilt;

    if off_screen || tipped_over {
        game_over(state);
    }
}

/// Award distance score on a one-second cadence.
///
/// The timestamp snaps to `now` rather than advancing by exactly one
/// second, so the cadence may drift; that is acceptable.
fn update_score(state: &mut GameState, now: f64) {
    let elapsed = now - state.last_score_update_time;
    if elapsed >= SCORE_INTERVAL_SECS {
        state.score += state.scroll_speed.floor() as u64;
        state.last_score_update_time = now;
        state.push_event(GameEvent::ScoreChanged { score: state.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BrickLevel, GameConfig};

    fn started_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, GameConfig::default());
        start_game(&mut state);
        state
    }

    /// Step at a steady 60 Hz from the run start
    fn run_frames(state: &mut GameState, frames: u32) {
        for frame in 0..frames {
            tick(state, frame as f64 * EXPECTED_FRAME_SECS);
        }
    }

    #[test]
    fn test_tick_noop_when_idle() {
        let mut state = GameState::new(1, GameConfig::default());
        tick(&mut state, 10.0);
        assert_eq!(state.last_update_time, None);
        assert_eq!(state.scroll_speed, STARTING_SCROLL_SPEED);
        assert!(state.bricks.is_empty());
    }

    #[test]
    fn test_tap_starts_run() {
        let mut state = GameState::new(1, GameConfig::default());
        state.score = 0;
        handle_tap(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.brick_level, BrickLevel::Low);
        assert!(state.drain_events().contains(&GameEvent::Started));
    }

    #[test]
    fn test_scroll_speed_ramps_every_tick() {
        let mut state = started_state(1);
        let mut previous = state.scroll_speed;
        for frame in 0..120 {
            tick(&mut state, frame as f64 * EXPECTED_FRAME_SECS);
            assert!(state.scroll_speed > previous);
            previous = state.scroll_speed;
        }
    }

    #[test]
    fn test_score_awarded_once_at_one_second() {
        let mut state = started_state(1);

        // 60 frames cover [0, 59/60]: still inside the first second
        run_frames(&mut state, 60);
        assert_eq!(state.score, 0);

        // The tick at exactly t = 1.0 awards floor(scroll speed) once
        tick(&mut state, 1.0);
        assert_eq!(state.score, 5);

        // No second award until another full second passes
        tick(&mut state, 1.5);
        assert_eq!(state.score, 5);
        tick(&mut state, 2.0);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_score_monotonic_while_running() {
        let mut state = started_state(2);
        let mut previous = 0;
        for frame in 0..1200 {
            tick(&mut state, frame as f64 * EXPECTED_FRAME_SECS);
            assert!(state.score >= previous);
            previous = state.score;
        }
    }

    #[test]
    fn test_jump_needs_ground() {
        let mut state = started_state(1);
        run_frames(&mut state, 2);

        handle_tap(&mut state);
        assert_eq!(state.skater.velocity.y, JUMP_IMPULSE);
        assert!(state.drain_events().contains(&GameEvent::Jumped));

        // Next tick infers airborne from the vertical speed
        tick(&mut state, 1.0);
        assert!(!state.skater.on_ground);

        // Tapping mid-air does nothing
        handle_tap(&mut state);
        assert_eq!(state.skater.velocity.y, JUMP_IMPULSE);
        assert!(!state.drain_events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_fall_off_screen_ends_run_once() {
        let mut state = started_state(1);
        run_frames(&mut state, 10);
        state.score = 30;

        state.skater.pos.y = -1.0;
        tick(&mut state, 1.0);
        assert_eq!(state.phase, GamePhase::NotRunning);
        assert_eq!(state.high_score, 30);

        let events = state.drain_events();
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);

        // Frozen: later ticks change nothing
        let bricks_before = state.bricks.len();
        let speed_before = state.scroll_speed;
        tick(&mut state, 2.0);
        tick(&mut state, 3.0);
        assert_eq!(state.bricks.len(), bricks_before);
        assert_eq!(state.scroll_speed, speed_before);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_scrolled_off_left_ends_run() {
        let mut state = started_state(1);
        run_frames(&mut state, 2);
        state.skater.pos.x = -0.5;
        tick(&mut state, 1.0);
        assert_eq!(state.phase, GamePhase::NotRunning);
    }

    #[test]
    fn test_tip_over_threshold() {
        let mut state = started_state(1);
        run_frames(&mut state, 2);

        state.skater.rotation = 84.0_f32.to_radians();
        tick(&mut state, 1.0);
        assert_eq!(state.phase, GamePhase::Running);

        state.skater.rotation = -86.0_f32.to_radians();
        tick(&mut state, 1.1);
        assert_eq!(state.phase, GamePhase::NotRunning);
    }

    #[test]
    fn test_high_score_keeps_best_run() {
        let mut state = started_state(1);
        state.score = 200;
        game_over(&mut state);
        assert_eq!(state.high_score, 200);

        handle_tap(&mut state);
        assert_eq!(state.score, 0);
        state.score = 80;
        game_over(&mut state);
        assert_eq!(state.high_score, 200);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver {
            score: 80,
            high_score: 200,
            new_record: false,
        }));
    }

    #[test]
    fn test_restart_clears_track() {
        let mut state = started_state(3);
        run_frames(&mut state, 120);
        state.spawn_gem(glam::Vec2::new(400.0, 300.0));
        assert!(!state.bricks.is_empty());

        game_over(&mut state);
        handle_tap(&mut state);
        assert!(state.bricks.is_empty());
        assert!(state.gems.is_empty());
        assert_eq!(state.scroll_speed, STARTING_SCROLL_SPEED);
        assert_eq!(state.last_update_time, None);
    }

    #[test]
    fn test_determinism() {
        let mut a = started_state(777);
        let mut b = started_state(777);

        for frame in 0..600 {
            let now = frame as f64 * EXPECTED_FRAME_SECS;
            if frame % 90 == 0 {
                handle_tap(&mut a);
                handle_tap(&mut b);
            }
            tick(&mut a, now);
            tick(&mut b, now);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.scroll_speed, b.scroll_speed);
        assert_eq!(a.bricks.len(), b.bricks.len());
        for (ba, bb) in a.bricks.iter().zip(&b.bricks) {
            assert_eq!(ba.pos, bb.pos);
        }
    }
}
