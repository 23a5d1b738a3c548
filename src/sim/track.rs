//! Sidewalk generation: the scroll/spawn/despawn pipeline
//!
//! Every running tick the whole track shifts left by the frame's scroll
//! amount, off-screen entities are retired, and new bricks (sometimes with
//! a gap and a gem) are synthesized at the trailing edge until the
//! viewport is filled again.

use glam::Vec2;

use super::state::GameState;
use crate::consts::*;

/// What a spawn slot's random draw produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotEvent {
    /// Insert an extra gap before the brick and hang a gem over it
    Gap,
    /// Flip the brick height level for subsequent bricks
    ToggleLevel,
    /// An ordinary brick
    Plain,
}

/// Map a uniform draw in [0, 99) to a slot event.
///
/// Gaps and level changes are each a 2% chance, gated behind score
/// thresholds so early play stays flat and unbroken.
pub fn classify_roll(roll: u32, score: u64) -> SlotEvent {
    if roll < 2 && score > GAP_SCORE_GATE {
        SlotEvent::Gap
    } else if roll < 4 && score > LEVEL_SCORE_GATE {
        SlotEvent::ToggleLevel
    } else {
        SlotEvent::Plain
    }
}

/// Scroll, retire and respawn bricks for one tick.
///
/// Bricks whose right edge has crossed the left viewport boundary are
/// removed; while the rightmost survivor sits inside the viewport, new
/// bricks fill in at the trailing edge.
pub fn update_bricks(state: &mut GameState, scroll_amount: f32) {
    let brick_w = state.config.brick_size.x;
    let brick_h = state.config.brick_size.y;

    // Shift everything left, drop what fell off, track the rightmost x
    let mut farthest_right_x: f32 = 0.0;
    state.bricks.retain_mut(|brick| {
        brick.pos.x -= scroll_amount;
        if brick.pos.x + brick_w / 2.0 < 0.0 {
            false
        } else {
            farthest_right_x = farthest_right_x.max(brick.pos.x);
            true
        }
    });

    // Fill the viewport back up from the trailing edge
    while farthest_right_x < state.config.viewport.x {
        let mut brick_x = farthest_right_x + brick_w + BRICK_UNIT_GAP;
        // The slot's height uses the level as it was before this draw
        let brick_y = brick_h / 2.0 + state.brick_level.offset();

        let roll = state.draw_slot_roll();
        match classify_roll(roll, state.score) {
            SlotEvent::Gap => {
                let gap = GAP_LENGTH_PER_SPEED * state.scroll_speed;
                brick_x += gap;

                // One gem over the gap's midpoint, jittered upward
                let gem_x = brick_x - gap / 2.0;
                let gem_y = brick_y + state.config.skater_size.y + state.draw_gem_jitter();
                state.spawn_gem(Vec2::new(gem_x, gem_y));
            }
            SlotEvent::ToggleLevel => {
                state.brick_level = state.brick_level.toggled();
            }
            SlotEvent::Plain => {}
        }

        state.spawn_brick(Vec2::new(brick_x, brick_y));
        farthest_right_x = brick_x;
    }
}

/// Scroll gems with the track and retire the ones past the left boundary
pub fn update_gems(state: &mut GameState, scroll_amount: f32) {
    state.gems.retain_mut(|gem| {
        gem.pos.x -= scroll_amount;
        gem.pos.x >= 0.0
    });
}
