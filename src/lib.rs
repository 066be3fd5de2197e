//! Flappy Drake - simulation core for a side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Per-round simulation (kinematics, spawning, collisions, scoring)
//! - `session`: Ready/Playing/GameOver state machine driven by UI callbacks
//! - `input`: Raw key identifiers and their game actions
//! - `highscores`: Top-5 scoreboard persisted as a flat text file
//! - `settings`: Tuning and paths, loaded from JSON

pub mod highscores;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{Scoreboard, ScoreboardError, TopScores};
pub use input::{Action, Key};
pub use session::{Phase, Session};
pub use settings::{Settings, SettingsError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Play area dimensions (y grows upward, origin bottom-left)
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    /// Player sprite geometry and spawn point
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = HEIGHT / 2.0;

    /// Obstacle sprite geometry
    pub const OBSTACLE_WIDTH: f32 = 78.0;
    pub const OBSTACLE_HEIGHT: f32 = 400.0;

    /// Upward speed set by a flap (pixels/s)
    pub const JUMP_SPEED: f32 = 1000.0;
    /// Leftward obstacle speed (pixels/s)
    pub const SCROLL_SPEED: f32 = 500.0;
    /// Base gravity, tuned for feel rather than physical units
    pub const GRAVITY: f32 = 9.81 * 5.0;
    /// Scale from `GRAVITY` to pixels/s²
    pub const GRAVITY_SCALE: f32 = 100.0;

    /// The player is the only dynamic body; obstacles are kinematic
    pub const PLAYER_MASS: f32 = 1.0;
    pub const OBSTACLE_MASS: f32 = PLAYER_MASS * 100.0;

    /// Vertical opening between the two obstacles of a pair
    pub const PAIR_GAP: f32 = (HEIGHT as u32 / 3) as f32;
    /// Fraction of the gap kept clear of the play area edges when picking a center
    pub const PAIR_MARGIN_FACTOR: f32 = 0.8;

    /// Seconds between obstacle pairs
    pub const SPAWN_INTERVAL: f32 = 1.0;
    /// Longest frame the simulation will integrate in one tick
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Number of scores kept on the scoreboard
    pub const SCOREBOARD_CAPACITY: usize = 5;
    /// Directory name under the platform data/config dirs
    pub const APP_DIR: &str = "flappy-drake";
}

/// Vertical range the center of a new obstacle pair is drawn from
#[inline]
pub fn pair_center_range(gap: f32) -> (f32, f32) {
    let margin = gap * consts::PAIR_MARGIN_FACTOR;
    (margin, consts::HEIGHT - margin)
}
