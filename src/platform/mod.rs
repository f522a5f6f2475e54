//! Platform abstraction layer
//!
//! The core never registers key events itself. A host hands over a snapshot
//! of logical key name to pressed state each frame and `input` turns it into
//! a `TickInput`.

pub mod input;

pub use input::{KeyMap, KeyState};
