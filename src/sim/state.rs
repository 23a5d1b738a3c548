//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Whether a run is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the start/game-over overlay; nothing moves or scores
    NotRunning,
    /// Active gameplay
    Running,
}

/// The two discrete heights bricks spawn at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickLevel {
    #[default]
    Low,
    High,
}

impl BrickLevel {
    /// Y offset this level adds to a brick's resting height
    pub fn offset(self) -> f32 {
        match self {
            BrickLevel::Low => 0.0,
            BrickLevel::High => HIGH_LEVEL_OFFSET,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            BrickLevel::Low => BrickLevel::High,
            BrickLevel::High => BrickLevel::Low,
        }
    }
}

/// The player character
///
/// Position, velocity and rotation are written by the host physics system
/// between ticks; the sim only reads them and flips `on_ground`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skater {
    pub pos: Vec2,
    pub velocity: Vec2,
    /// Rotation in radians (0 = upright)
    pub rotation: f32,
    pub on_ground: bool,
    /// Ground reference height set at each run start
    pub minimum_y: f32,
}

/// A ground segment forming the walkable path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    /// Center position; size comes from `GameConfig::brick_size`
    pub pos: Vec2,
}

/// A collectible worth fixed bonus score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gem {
    pub id: u32,
    pub pos: Vec2,
}

/// Load-time values supplied by the host (viewport from the rendering
/// surface, sprite sizes from content loading). Immutable for the life of
/// the state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub viewport: Vec2,
    pub brick_size: Vec2,
    pub skater_size: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            brick_size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            skater_size: Vec2::new(SKATER_WIDTH, SKATER_HEIGHT),
        }
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Side effects the sim asks the host to perform
///
/// Accumulated on the state during ticks and contact handling, drained by
/// the platform layer once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new run started; dismiss any overlay
    Started,
    /// The skater jumped; play the jump sound
    Jumped,
    /// Soft landing; show the spark effect while `spark_ttl` is positive
    SparkBurst,
    /// A gem was picked up; play the gem sound
    GemCollected { gem: u32 },
    /// The score display should be refreshed
    ScoreChanged { score: u64 },
    /// The run ended; show the overlay with the final score
    GameOver {
        score: u64,
        high_score: u64,
        new_record: bool,
    },
}

fn fallback_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state record; call [`GameState::restore_rng`] after deserializing
    pub rng_state: RngState,
    #[serde(skip, default = "fallback_rng")]
    rng: Pcg32,
    pub config: GameConfig,
    pub phase: GamePhase,
    pub skater: Skater,
    /// Surviving bricks in spawn order (left to right)
    pub bricks: Vec<Brick>,
    /// Active gems, addressed by id only
    pub gems: Vec<Gem>,
    /// Height level for the next spawned bricks
    pub brick_level: BrickLevel,
    pub scroll_speed: f32,
    pub score: u64,
    /// Best score this process lifetime; never decreases
    pub high_score: u64,
    /// Gems picked up this run
    pub gems_collected: u32,
    /// Timestamp of the previous tick; None right after a (re)start
    pub last_update_time: Option<f64>,
    pub last_score_update_time: f64,
    /// Remaining lifetime of the landing spark effect
    #[serde(skip)]
    pub spark_ttl: f32,
    /// Pending side effects for the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a state with the given seed, waiting for the first tap
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let rng_state = RngState::new(seed);
        let mut state = Self {
            seed,
            rng: rng_state.to_rng(),
            rng_state,
            config,
            phase: GamePhase::NotRunning,
            skater: Skater::default(),
            bricks: Vec::new(),
            gems: Vec::new(),
            brick_level: BrickLevel::Low,
            scroll_speed: STARTING_SCROLL_SPEED,
            score: 0,
            high_score: 0,
            gems_collected: 0,
            last_update_time: None,
            last_score_update_time: 0.0,
            spark_ttl: 0.0,
            events: Vec::new(),
            next_id: 1,
        };
        state.reset_skater();
        state
    }

    /// Rebuild the live RNG from `rng_state` (after deserialization)
    pub fn restore_rng(&mut self) {
        self.rng = self.rng_state.to_rng();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform draw in [0, 99) deciding a spawn slot's event
    pub fn draw_slot_roll(&mut self) -> u32 {
        self.rng.random_range(0..99u32)
    }

    /// Uniform draw in [0, 150) for a gem's vertical placement
    pub fn draw_gem_jitter(&mut self) -> f32 {
        self.rng.random_range(0.0..GEM_JITTER_RANGE)
    }

    /// Put the skater back at the run start pose
    pub fn reset_skater(&mut self) {
        let x = self.config.viewport.x / 4.0;
        let y = self.config.skater_size.y / 2.0 + SKATER_START_CLEARANCE;
        self.skater.pos = Vec2::new(x, y);
        self.skater.minimum_y = y;
        self.skater.rotation = 0.0;
        self.skater.velocity = Vec2::ZERO;
        self.skater.on_ground = true;
    }

    pub fn spawn_brick(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        self.bricks.push(Brick { id, pos });
    }

    pub fn spawn_gem(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        log::debug!("gem {} spawned at ({:.1}, {:.1})", id, pos.x, pos.y);
        self.gems.push(Gem { id, pos });
    }

    /// Remove a gem by id; false if it was already gone
    pub fn remove_gem(&mut self, id: u32) -> bool {
        let before = self.gems.len();
        self.gems.retain(|gem| gem.id != id);
        self.gems.len() < before
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
