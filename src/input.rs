//! Input side of the appliance: token reader, volume knob and buttons.
//!
//! Real hardware drivers plug in through the `TokenReader` and
//! `VolumeSensor` traits and by sending `ButtonPress` values into the
//! channel the control loop drains. The simulator drives all three from the
//! keyboard.

mod buttons;
mod sensors;
mod simulator;

pub use buttons::{ButtonAction, ButtonLabel, ButtonMap, ButtonPress, Debouncer};
pub use sensors::{TokenReader, VolumeSensor, normalize_volume};
pub use simulator::Simulator;
