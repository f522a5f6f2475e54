//! Key snapshot to per-tick input
//!
//! Movement keys are level-triggered (held). Pause and restart are
//! edge-triggered so holding the key down toggles only once.

use std::collections::HashMap;

use crate::sim::TickInput;

/// Logical key name -> pressed, as reported by the host
pub type KeyState = HashMap<String, bool>;

const LEFT_KEYS: &[&str] = &["a", "arrowleft"];
const RIGHT_KEYS: &[&str] = &["d", "arrowright"];
const PAUSE_KEYS: &[&str] = &["p", "escape"];
const RESTART_KEYS: &[&str] = &["r"];

/// Maps key snapshots to tick input, remembering what was held last frame
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    pause_held: bool,
    restart_held: bool,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the input for this frame. Key names are matched case-insensitively.
    pub fn read(&mut self, keys: &KeyState) -> TickInput {
        let pause_down = any_pressed(keys, PAUSE_KEYS);
        let restart_down = any_pressed(keys, RESTART_KEYS);

        let input = TickInput {
            left: any_pressed(keys, LEFT_KEYS),
            right: any_pressed(keys, RIGHT_KEYS),
            pause: pause_down && !self.pause_held,
            restart: restart_down && !self.restart_held,
        };

        self.pause_held = pause_down;
        self.restart_held = restart_down;
        input
    }
}

fn any_pressed(keys: &KeyState, names: &[&str]) -> bool {
    keys.iter()
        .any(|(key, &down)| down && names.iter().any(|n| key.eq_ignore_ascii_case(n)))
}
