//! Kickflip - an endless skateboarding runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track generation, game loop, contact rules)
//! - `audio`: Sound effect dispatch to the host audio backend
//! - `highscores`: Session leaderboard

pub mod audio;
pub mod highscores;
pub mod sim;

pub use highscores::HighScores;
pub use sim::{GameConfig, GameState};

/// Game configuration constants
pub mod consts {
    /// Reference frame duration the scroll rate is normalized against.
    /// Actual elapsed time is divided by this, so movement is frame-rate
    /// independent.
    pub const EXPECTED_FRAME_SECS: f64 = 1.0 / 60.0;

    /// Default viewport (the rendering surface reports the real one)
    pub const VIEWPORT_WIDTH: f32 = 1024.0;
    pub const VIEWPORT_HEIGHT: f32 = 768.0;

    /// Sprite sizes, fixed at content-load time
    pub const BRICK_WIDTH: f32 = 64.0;
    pub const BRICK_HEIGHT: f32 = 64.0;
    pub const SKATER_WIDTH: f32 = 60.0;
    pub const SKATER_HEIGHT: f32 = 120.0;

    /// Scroll speed at the start of each run
    pub const STARTING_SCROLL_SPEED: f32 = 5.0;
    /// Added to the scroll speed every running tick (no cap)
    pub const SCROLL_SPEED_RAMP: f32 = 0.01;

    /// Seconds between distance-score awards
    pub const SCORE_INTERVAL_SECS: f64 = 1.0;
    /// Points for picking up a gem
    pub const GEM_SCORE: u64 = 50;

    /// Baseline spacing between consecutive bricks
    pub const BRICK_UNIT_GAP: f32 = 1.0;
    /// Extra gap length per unit of scroll speed when a gap is rolled
    pub const GAP_LENGTH_PER_SPEED: f32 = 20.0;
    /// Score required before gaps start appearing
    pub const GAP_SCORE_GATE: u64 = 10;
    /// Score required before the brick level starts toggling
    pub const LEVEL_SCORE_GATE: u64 = 20;
    /// Vertical jitter range for gem placement above a gap
    pub const GEM_JITTER_RANGE: f32 = 150.0;
    /// Y offset of the high brick level above the low one
    pub const HIGH_LEVEL_OFFSET: f32 = 100.0;

    /// Vertical speed beyond which the skater is inferred airborne
    pub const AIRBORNE_SPEED_THRESHOLD: f32 = 100.0;
    /// Landings slower than this throw sparks
    pub const SOFT_LANDING_SPEED: f32 = 100.0;
    /// Tilting past this angle (either way) ends the run
    pub const MAX_TILT_DEGREES: f32 = 85.0;
    /// Upward velocity added by a jump
    pub const JUMP_IMPULSE: f32 = 260.0;
    /// Landing spark effect lifetime
    pub const SPARK_SECS: f32 = 0.5;
    /// Clearance above the ground line when the skater is (re)placed
    pub const SKATER_START_CLEARANCE: f32 = 64.0;
}
