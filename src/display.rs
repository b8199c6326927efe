//! Display renderer: overlay timers, scrolling text and the background
//! effect, composed into one frame per tick.

mod background;
mod frame;
mod icons;
mod renderer;
mod terminal;

pub use background::WarpField;
pub use frame::{Frame, FrameSink, Rgb, ScrollLine, Shape};
pub use icons::{ActionIcon, IconAsset, IconSet, find_asset};
pub use renderer::{DisplayRenderer, DisplayState};
pub use terminal::TerminalSink;

#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
mod tests;
