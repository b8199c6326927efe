//! Audio-related small types shared with the controller.

use std::path::PathBuf;
use std::sync::Arc;

use crate::library::PlaylistDescriptor;

/// Snapshot of the track currently loaded in the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub index: usize,
    pub file: PathBuf,
    pub title: String,
    pub author: String,
    pub album: String,
}

impl TrackMetadata {
    /// Text for the scrolling line, e.g. `Song by Artist, Album: Record`.
    pub fn scroll_text(&self) -> String {
        let mut text = self.title.clone();
        if !self.author.trim().is_empty() {
            text.push_str(" by ");
            text.push_str(self.author.trim());
        }
        if !self.album.trim().is_empty() {
            text.push_str(", Album: ");
            text.push_str(self.album.trim());
        }
        text
    }
}

/// Notification produced by the engine, drained by the control loop once per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A track finished loading and is playing.
    TrackLoaded(TrackMetadata),
    /// The track at `index` could not be loaded; the slot stays silent.
    LoadFailed { index: usize },
}

/// Playback state owned by the engine.
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    pub playlist: Option<Arc<PlaylistDescriptor>>,
    /// Always a valid index into `playlist.items` while that list is non-empty.
    pub index: usize,
    pub paused: bool,
    /// Last requested volume before easing, in `[0, 1]`.
    pub volume: f32,
}
