//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Monotonic timestamps in, normalized against a fixed reference tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order for bricks, by entity ID for gems)
//! - No rendering or platform dependencies
//!
//! All mutation goes through `&mut GameState` from the tick, tap, and
//! contact entry points. Hosts that run physics callbacks off the render
//! thread must serialize those calls; the state assumes a single writer.

pub mod contact;
pub mod state;
pub mod tick;
pub mod track;

pub use contact::{
    BRICK_CATEGORY, ContactBody, GEM_CATEGORY, SKATER_CATEGORY, handle_contact,
};
pub use state::{
    Brick, BrickLevel, GameConfig, GameEvent, GamePhase, GameState, Gem, RngState, Skater,
};
pub use tick::{game_over, handle_tap, start_game, tick};
pub use track::{SlotEvent, classify_roll, update_bricks, update_gems};
