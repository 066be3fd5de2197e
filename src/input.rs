//! Keyboard input mapping
//!
//! The windowing layer translates its native key codes into [`Key`]; the
//! session only ever reasons about [`Action`]s.

use serde::{Deserialize, Serialize};

/// Raw key identifiers the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    K,
    Space,
    R,
    Q,
    Escape,
    S,
    /// Anything else; ignored
    Other,
}

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Jump (edge-triggered)
    Flap,
    /// Start a fresh round
    Restart,
    /// Back to the menu, or exit from the menu
    Quit,
    /// Start playing from the menu
    Start,
}

impl Action {
    /// Default bindings: flap on Up/K/Space, restart on R, quit on Q/Escape,
    /// start on S
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Up | Key::K | Key::Space => Some(Action::Flap),
            Key::R => Some(Action::Restart),
            Key::Q | Key::Escape => Some(Action::Quit),
            Key::S => Some(Action::Start),
            Key::Other => None,
        }
    }
}

impl Key {
    /// Parse a key name as typed on the command line or in a script
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "up" => Some(Key::Up),
            "k" => Some(Key::K),
            "space" | " " => Some(Key::Space),
            "r" => Some(Key::R),
            "q" => Some(Key::Q),
            "escape" | "esc" => Some(Key::Escape),
            "s" => Some(Key::S),
            _ => None,
        }
    }
}
