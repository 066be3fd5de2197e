//! Round state and core simulation types
//!
//! Everything one round of play needs lives in [`GameState`]. The RNG and the
//! spawn timer belong to the session, which outlives individual rounds.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use crate::consts::*;

/// Feedback raised by the simulation for the UI layer (sound cues, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player flapped
    Flapped,
    /// A new obstacle pair entered at the right edge
    Spawned { pair_id: u32, center_y: f32 },
    /// A pair was passed while alive; carries the new score
    Scored { score: u32 },
    /// First death of the round; carries the final score
    Died { score: u32 },
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Pair passed
    Score,
    /// Player crashed
    Lose,
}

impl GameEvent {
    /// Sound the UI should play for this event, if any
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Scored { .. } => Some(SoundCue::Score),
            GameEvent::Died { .. } => Some(SoundCue::Lose),
            GameEvent::Flapped | GameEvent::Spawned { .. } => None,
        }
    }
}

/// The player-controlled sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Sprite center
    pub pos: Vec2,
    pub vel: Vec2,
    /// Flap key currently held (one impulse per press)
    pub flapped: bool,
    pub alive: bool,
    /// Left the play area; no further physics
    pub inert: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            flapped: false,
            alive: true,
            inert: false,
        }
    }
}

impl Player {
    /// Bounding box used for collisions
    pub fn hitbox(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    /// True while any part of the sprite is visible
    pub fn in_screen(&self) -> bool {
        self.hitbox().intersects_area(&Aabb::play_area())
    }

    /// Nose-up/nose-down angle for drawing (radians, ±45°)
    pub fn tilt(&self, scroll_speed: f32) -> f32 {
        use std::f32::consts::FRAC_PI_4;
        self.vel
            .y
            .atan2(scroll_speed.max(f32::EPSILON))
            .clamp(-FRAC_PI_4, FRAC_PI_4)
    }
}

/// One obstacle of a pair, as seen by collision and rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub bounds: Aabb,
    pub vel: Vec2,
    /// Upper obstacle, drawn upside down
    pub flipped: bool,
}

/// Two obstacles mirrored about a shared center height, moving as one body.
///
/// Only the pair is stored; each obstacle is derived from it, so the two
/// halves cannot drift apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    /// Left edge of both obstacles
    pub left: f32,
    /// Midpoint of the opening
    pub center_y: f32,
    /// Height of the opening
    pub gap: f32,
    pub vel: Vec2,
    /// The player has passed this pair
    pub scored: bool,
}

impl ObstaclePair {
    #[inline]
    pub fn right(&self) -> f32 {
        self.left + OBSTACLE_WIDTH
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.left + OBSTACLE_WIDTH / 2.0
    }

    /// Bottom obstacle; its top edge is `center_y - gap / 2`
    pub fn lower(&self) -> Obstacle {
        let top = self.center_y - self.gap / 2.0;
        Obstacle {
            bounds: Aabb::new(
                Vec2::new(self.left, top - OBSTACLE_HEIGHT),
                Vec2::new(self.right(), top),
            ),
            vel: self.vel,
            flipped: false,
        }
    }

    /// Top obstacle; its bottom edge is `center_y + gap / 2`
    pub fn upper(&self) -> Obstacle {
        let bottom = self.center_y + self.gap / 2.0;
        Obstacle {
            bounds: Aabb::new(
                Vec2::new(self.left, bottom),
                Vec2::new(self.right(), bottom + OBSTACLE_HEIGHT),
            ),
            vel: self.vel,
            flipped: true,
        }
    }

    pub fn obstacles(&self) -> [Obstacle; 2] {
        [self.lower(), self.upper()]
    }

    /// True if either obstacle overlaps `hitbox`
    pub fn hits(&self, hitbox: &Aabb) -> bool {
        self.obstacles().iter().any(|o| o.bounds.overlaps(hitbox))
    }
}

/// State of a single round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub score: u32,
    /// Pairs not yet passed, oldest first
    pub active: VecDeque<ObstaclePair>,
    /// Passed pairs still on screen, oldest first
    pub scored: VecDeque<ObstaclePair>,
    /// Seconds simulated this round
    pub time: f32,
    /// Feedback raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh round: player at the start position, no obstacles, score 0
    pub fn new() -> Self {
        Self {
            player: Player::default(),
            score: 0,
            active: VecDeque::new(),
            scored: VecDeque::new(),
            time: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new pair ID
    pub fn next_pair_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// All pairs still simulated, scored ones first (they are the oldest)
    pub fn pairs(&self) -> impl Iterator<Item = &ObstaclePair> {
        self.scored.iter().chain(self.active.iter())
    }

    /// Every live obstacle, for drawing
    pub fn obstacles(&self) -> impl Iterator<Item = Obstacle> + '_ {
        self.pairs().flat_map(|p| p.obstacles())
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
