//! One simulation step
//!
//! Spawn (if the timer fired), integrate, then resolve collisions and
//! scoring. The session decides when a step happens and with which `dt`.

use rand::Rng;

use super::collision::{Resolution, resolve};
use super::kinematics::integrate;
use super::spawner::spawn;
use super::state::GameState;
use crate::settings::Tuning;

/// Inputs for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Spawn timer fired: add a new pair before integrating
    pub spawn: bool,
}

/// Advance the round by `dt` seconds
pub fn tick<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    rng: &mut R,
    tuning: &Tuning,
    dt: f32,
) -> Resolution {
    state.time += dt;

    if input.spawn {
        spawn(state, rng, tuning);
    }

    integrate(state, dt, tuning);
    let resolution = resolve(state);

    debug_assert!(queues_in_spawn_order(state), "obstacle queues out of order");
    resolution
}

/// Older pairs are always further left, in both queues and across them
fn queues_in_spawn_order(state: &GameState) -> bool {
    let pairs: Vec<_> = state.pairs().collect();
    pairs
        .windows(2)
        .all(|w| w[0].id < w[1].id && w[0].left <= w[1].left)
}
