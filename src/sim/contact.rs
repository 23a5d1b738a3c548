//! Contact classification
//!
//! The host physics system delivers contact-began events as pairs of
//! tagged bodies; this module maps them to gameplay effects. Pairs are
//! accepted in either order.

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Collision category bitmasks for configuring the host physics bodies
pub const SKATER_CATEGORY: u32 = 0x1 << 0;
pub const BRICK_CATEGORY: u32 = 0x1 << 1;
pub const GEM_CATEGORY: u32 = 0x1 << 2;

/// One side of a contact pair: its category plus the entity it refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactBody {
    Skater,
    Brick(u32),
    Gem(u32),
}

impl ContactBody {
    pub fn category_mask(&self) -> u32 {
        match self {
            ContactBody::Skater => SKATER_CATEGORY,
            ContactBody::Brick(_) => BRICK_CATEGORY,
            ContactBody::Gem(_) => GEM_CATEGORY,
        }
    }
}

/// Classify a contact-began pair and apply its effects.
///
/// skater x brick grounds the skater, with a spark burst on soft
/// landings. skater x gem collects the gem for fixed bonus score. All
/// other pairs are ignored.
pub fn handle_contact(state: &mut GameState, a: ContactBody, b: ContactBody) {
    // Normalize so the skater is first, whatever order physics reported
    let other = match (a, b) {
        (ContactBody::Skater, other) | (other, ContactBody::Skater) => other,
        _ => return,
    };

    match other {
        ContactBody::Brick(_) => {
            if !state.skater.on_ground && state.skater.velocity.y < SOFT_LANDING_SPEED {
                state.spark_ttl = SPARK_SECS;
                state.push_event(GameEvent::SparkBurst);
            }
            state.skater.on_ground = true;
        }
        ContactBody::Gem(id) => {
            if state.phase != GamePhase::Running {
                return;
            }
            // Physics may report the same gem twice in a tick; only the
            // removal that actually happens scores
            if state.remove_gem(id) {
                state.score += GEM_SCORE;
                state.gems_collected += 1;
                log::debug!("gem {} collected, score {}", id, state.score);
                state.push_event(GameEvent::GemCollected { gem: id });
                state.push_event(GameEvent::ScoreChanged { score: state.score });
            }
        }
        ContactBody::Skater => {}
    }
}
