//! Game session state machine
//!
//! The UI layer owns a [`Session`] and drives it through lifecycle callbacks:
//! `on_update` once per frame, `on_key_press`/`on_key_release` for input.
//! Between calls it reads the render query surface (player, obstacles,
//! score, phase) and drains feedback events for sound cues.
//!
//! ```text
//! Ready --start--> Playing --death--> GameOver --restart--> Playing
//!   ^                 |                  |
//!   +------quit-------+------quit--------+
//! ```

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;
use crate::highscores::Scoreboard;
use crate::input::{Action, Key};
use crate::settings::{Settings, Tuning};
use crate::sim::{
    GameEvent, GameState, Obstacle, Player, SpawnTimer, TickInput, press_flap, release_flap, tick,
};

/// Top-level phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Main menu, no round in progress
    Ready,
    /// Round in progress, obstacles spawning
    Playing,
    /// Player died; the round keeps animating but nothing spawns
    GameOver,
}

/// A game session: the current round plus everything that outlives it
pub struct Session {
    phase: Phase,
    state: GameState,
    /// Seeded once per session; restarts continue the same stream
    rng: Pcg32,
    seed: u64,
    timer: SpawnTimer,
    tuning: Tuning,
    scoreboard: Option<Scoreboard>,
    events: Vec<GameEvent>,
    /// Rank reached by the last committed score, if it made the board
    last_rank: Option<usize>,
    exit_requested: bool,
}

impl Session {
    /// Session with an explicit seed, for reproducible runs and tests
    pub fn with_seed(seed: u64, tuning: Tuning, scoreboard: Option<Scoreboard>) -> Self {
        let tuning = tuning.sanitized();
        Self {
            phase: Phase::Ready,
            state: GameState::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            timer: SpawnTimer::new(tuning.spawn_interval),
            tuning,
            scoreboard,
            events: Vec::new(),
            last_rank: None,
            exit_requested: false,
        }
    }

    /// Session configured from settings; draws a seed when none is set
    pub fn new(settings: &Settings, scoreboard: Option<Scoreboard>) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("New session (seed {})", seed);
        Self::with_seed(seed, settings.tuning, scoreboard)
    }

    /// Reset the round and start playing: fresh player, empty queues, score 0,
    /// spawn timer re-armed from zero
    pub fn setup(&mut self) {
        self.state = GameState::new();
        self.timer.arm();
        self.phase = Phase::Playing;
        self.last_rank = None;
    }

    /// Menu "start" button
    pub fn start(&mut self) {
        if self.phase == Phase::Ready {
            log::info!("Starting game");
            self.setup();
        }
    }

    /// Discard the round and go back to the menu
    pub fn quit_to_menu(&mut self) {
        if self.phase == Phase::Ready {
            return;
        }
        log::info!("Back to menu from {:?}", self.phase);
        self.timer.disarm();
        self.state = GameState::new();
        self.phase = Phase::Ready;
    }

    /// Per-frame callback. `delta_time` may vary between frames.
    pub fn on_update(&mut self, delta_time: f32) {
        if !(delta_time.is_finite() && delta_time > 0.0) {
            return;
        }
        let dt = delta_time.min(MAX_FRAME_DT);

        match self.phase {
            Phase::Ready => return,
            Phase::Playing | Phase::GameOver => {}
        }

        // Only the Playing phase may spawn
        let input = TickInput {
            spawn: self.phase == Phase::Playing && self.timer.advance(dt),
        };
        let resolution = tick(&mut self.state, &input, &mut self.rng, &self.tuning, dt);
        self.events.append(&mut self.state.events);

        if resolution.died {
            self.game_over();
        }
    }

    /// First death of the round: commit the score and stop spawning
    fn game_over(&mut self) {
        let score = self.state.score;
        self.timer.disarm();
        self.phase = Phase::GameOver;

        if let Some(board) = &self.scoreboard {
            match board.record(score) {
                Ok(rank) => {
                    self.last_rank = rank;
                    if let Some(rank) = rank {
                        log::info!("Score {} placed #{} on the scoreboard", score, rank);
                    }
                }
                Err(e) => log::error!("Failed to record score {}: {}", score, e),
            }
        }
        log::info!("Game over (score {})", score);
    }

    pub fn on_key_press(&mut self, key: Key) {
        let Some(action) = Action::from_key(key) else {
            return;
        };

        match (self.phase, action) {
            (Phase::Playing, Action::Flap) => {
                if press_flap(&mut self.state.player, self.tuning.jump_speed) {
                    self.events.push(GameEvent::Flapped);
                }
            }
            (Phase::Playing | Phase::GameOver, Action::Restart) => {
                log::info!("Restarting from {:?}", self.phase);
                self.setup();
            }
            (Phase::Playing | Phase::GameOver, Action::Quit) => self.quit_to_menu(),
            (Phase::Ready, Action::Start) => self.start(),
            (Phase::Ready, Action::Quit) => {
                log::info!("Exit requested");
                self.exit_requested = true;
            }
            _ => {}
        }
    }

    pub fn on_key_release(&mut self, key: Key) {
        if Action::from_key(key) == Some(Action::Flap) {
            release_flap(&mut self.state.player);
        }
    }

    // === Render query surface ===

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_alive(&self) -> bool {
        self.state.player.alive
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    /// Player tilt for drawing
    pub fn player_tilt(&self) -> f32 {
        self.state.player.tilt(self.tuning.scroll_speed)
    }

    /// Every obstacle on screen, active and scored
    pub fn obstacles(&self) -> impl Iterator<Item = Obstacle> + '_ {
        self.state.obstacles()
    }

    /// Full round state (for snapshots and debugging)
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Take the feedback raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn scoreboard(&self) -> Option<&Scoreboard> {
        self.scoreboard.as_ref()
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn spawn_timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// The menu asked to close the application
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
