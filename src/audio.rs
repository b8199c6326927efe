//! Audio engine: playlist transport on top of a pluggable output backend.

mod backend;
mod engine;
mod sink;
mod types;
mod volume;

pub use backend::AudioBackend;
pub use engine::AudioEngine;
pub use sink::RodioBackend;
pub use types::{EngineEvent, PlaybackState, TrackMetadata};
pub use volume::eased_gain;

#[cfg(test)]
pub(crate) mod fake;
