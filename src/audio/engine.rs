use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::AudioSettings;
use crate::library::PlaylistDescriptor;

use super::backend::AudioBackend;
use super::types::{EngineEvent, PlaybackState, TrackMetadata};
use super::volume::eased_gain;

/// Owns the playback state and drives an [`AudioBackend`].
///
/// All transport operations are no-ops while no playlist (or an empty one)
/// is installed.
pub struct AudioEngine<B> {
    backend: B,
    state: PlaybackState,
    max_volume: f32,
    restart_threshold: Duration,
    /// Single-slot event queue; a newer event replaces an undrained one.
    event: Option<EngineEvent>,
}

impl<B: AudioBackend> AudioEngine<B> {
    pub fn new(backend: B, settings: &AudioSettings) -> Self {
        Self {
            backend,
            state: PlaybackState::default(),
            max_volume: settings.max_volume,
            restart_threshold: Duration::from_millis(settings.restart_threshold_ms),
            event: None,
        }
    }

    /// Install `playlist`, reset to its first track and start playing.
    pub fn set_playlist(&mut self, playlist: Arc<PlaylistDescriptor>) {
        info!(token = %playlist.id, tracks = playlist.len(), "installing playlist");
        let empty = playlist.is_empty();
        self.state.playlist = Some(playlist);
        self.state.index = 0;
        self.state.paused = false;
        if empty {
            self.backend.stop();
        } else {
            self.load_current();
        }
    }

    pub fn stop(&mut self) {
        self.backend.stop();
    }

    pub fn pause(&mut self) {
        if !self.state.paused {
            self.backend.pause();
            self.state.paused = true;
        }
    }

    pub fn unpause(&mut self) {
        if self.state.paused {
            self.backend.resume();
            self.state.paused = false;
        }
    }

    /// Flip the paused flag and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.has_tracks() {
            return self.state.paused;
        }
        if self.state.paused {
            self.unpause();
        } else {
            self.pause();
        }
        self.state.paused
    }

    /// Advance one track, wrapping to the start past the end.
    pub fn next_track(&mut self) {
        let len = self.track_count();
        if len == 0 {
            return;
        }
        self.state.index = (self.state.index + 1) % len;
        self.state.paused = false;
        self.load_current();
    }

    /// Restart the current track when it has played past the restart
    /// threshold, otherwise step back one track (stopping at the first).
    pub fn prev_track(&mut self) {
        if !self.has_tracks() {
            return;
        }
        if self.backend.position() < self.restart_threshold {
            self.state.index = self.state.index.saturating_sub(1);
        }
        self.state.paused = false;
        self.load_current();
    }

    /// Apply the eased, capped gain for `volume`. Cheap enough to call every tick.
    pub fn set_volume(&mut self, volume: f32) {
        self.state.volume = volume.clamp(0.0, 1.0);
        self.backend.set_gain(eased_gain(volume, self.max_volume));
    }

    /// Consume the backend's end-of-track signal; behaves like `next_track`.
    ///
    /// Returns whether the engine advanced.
    pub fn poll_track_end(&mut self) -> bool {
        if !self.backend.take_finished() {
            return false;
        }
        if !self.has_tracks() {
            return false;
        }
        debug!(index = self.state.index, "track ended");
        self.next_track();
        true
    }

    /// Take the pending load notification, if any.
    pub fn take_event(&mut self) -> Option<EngineEvent> {
        self.event.take()
    }

    pub fn current_track(&self) -> Option<TrackMetadata> {
        let playlist = self.state.playlist.as_ref()?;
        let item = playlist.items.get(self.state.index)?;
        Some(TrackMetadata {
            index: self.state.index,
            file: item.file.clone(),
            title: item.title.clone(),
            author: item.author.clone(),
            album: item.album.clone(),
        })
    }

    pub fn has_tracks(&self) -> bool {
        self.track_count() > 0
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn track_count(&self) -> usize {
        self.state.playlist.as_ref().map_or(0, |p| p.len())
    }

    fn load_current(&mut self) {
        let Some(track) = self.current_track() else {
            return;
        };
        self.backend.stop();
        match self.backend.load_and_play(&track.file) {
            Ok(()) => {
                debug!(index = track.index, file = %track.file.display(), "track loaded");
                self.event = Some(EngineEvent::TrackLoaded(track));
            }
            Err(e) => {
                warn!(index = track.index, "skipping track: {e}");
                self.event = Some(EngineEvent::LoadFailed { index: track.index });
            }
        }
    }
}
