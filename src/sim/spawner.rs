//! Obstacle pair spawning and the spawn timer
//!
//! Pairs enter at the right edge of the play area with their opening centred
//! on a height drawn uniformly from the middle of the screen.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, ObstaclePair};
use crate::consts::WIDTH;
use crate::pair_center_range;
use crate::settings::Tuning;

/// Repeating timer that paces spawns while a round is being played
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    interval: f32,
    elapsed: f32,
    armed: bool,
}

impl SpawnTimer {
    /// Disarmed timer with the given period (seconds)
    pub fn new(interval: f32) -> Self {
        debug_assert!(interval > 0.0, "spawn interval must be positive");
        Self {
            interval,
            elapsed: 0.0,
            armed: false,
        }
    }

    /// Start counting from zero, discarding any pending time
    pub fn arm(&mut self) {
        self.elapsed = 0.0;
        self.armed = true;
    }

    /// Stop the timer; nothing fires until the next `arm`
    pub fn disarm(&mut self) {
        self.elapsed = 0.0;
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Accumulate `dt` and report whether the timer fired.
    ///
    /// Fires at most once per call. Leftover time is capped below one
    /// interval so a long frame cannot stack pairs on the same x.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.armed {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed < self.interval {
            return false;
        }
        self.elapsed = (self.elapsed - self.interval).min(self.interval * 0.5);
        true
    }
}

/// Build a pair entering at the right edge, opening centred on `center_y`
pub fn pair_at(id: u32, center_y: f32, gap: f32, speed: f32) -> ObstaclePair {
    ObstaclePair {
        id,
        left: WIDTH,
        center_y,
        gap,
        vel: Vec2::new(-speed, 0.0),
        scored: false,
    }
}

/// Draw a center height and append a new pair to the active queue
pub fn spawn<R: Rng>(state: &mut GameState, rng: &mut R, tuning: &Tuning) -> u32 {
    let (lo, hi) = pair_center_range(tuning.pair_gap);
    let center_y = rng.random_range(lo..=hi);
    let id = state.next_pair_id();

    state
        .active
        .push_back(pair_at(id, center_y, tuning.pair_gap, tuning.scroll_speed));
    state.push_event(GameEvent::Spawned {
        pair_id: id,
        center_y,
    });
    log::debug!("Spawned pair {} centred at {:.1}", id, center_y);
    id
}
