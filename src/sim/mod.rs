//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, passed in by the caller
//! - Obstacle queues kept in spawn order
//! - No rendering, audio or platform dependencies

pub mod bounds;
pub mod collision;
pub mod kinematics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use bounds::Aabb;
pub use collision::{Resolution, reclaim, resolve};
pub use kinematics::{apply_impulse, integrate, press_flap, release_flap};
pub use spawner::{SpawnTimer, pair_at, spawn};
pub use state::{GameEvent, GameState, Obstacle, ObstaclePair, Player, SoundCue};
pub use tick::{TickInput, tick};
