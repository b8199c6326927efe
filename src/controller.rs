//! Control loop core: the presence state machine and the per-tick
//! orchestration of engine and display.

mod jukebox;
mod presence;

pub use jukebox::{Jukebox, TickInput};
pub use presence::{Presence, PresenceMachine, Transition};
