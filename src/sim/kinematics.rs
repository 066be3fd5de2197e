//! Per-tick integration of the player and obstacle pairs
//!
//! The player is the only dynamic body: it feels gravity and flap impulses.
//! Obstacle pairs are kinematic and slide left at a constant speed. One
//! semi-implicit Euler step per tick (forces, then positions), no sub-steps.

use super::state::{GameState, Player};
use crate::settings::Tuning;

/// Advance every body by `dt` seconds
pub fn integrate(state: &mut GameState, dt: f32, tuning: &Tuning) {
    let player = &mut state.player;
    if !player.inert {
        player.vel.y -= tuning.gravity * dt;
        player.pos += player.vel * dt;
    }

    for pair in state.active.iter_mut().chain(state.scored.iter_mut()) {
        pair.left += pair.vel.x * dt;
    }
}

/// Set the player's velocity to a straight upward jump.
///
/// Overrides whatever the player was doing, so every flap reaches the same
/// height regardless of fall speed.
#[inline]
pub fn apply_impulse(player: &mut Player, jump_speed: f32) {
    player.vel.x = 0.0;
    player.vel.y = jump_speed;
}

/// Handle a flap key press. Returns true if an impulse was applied.
pub fn press_flap(player: &mut Player, jump_speed: f32) -> bool {
    if player.flapped || !player.alive {
        return false;
    }
    apply_impulse(player, jump_speed);
    player.flapped = true;
    true
}

/// Handle a flap key release, re-enabling the next press
#[inline]
pub fn release_flap(player: &mut Player) {
    player.flapped = false;
}
