//! Recording backend for tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

use super::backend::AudioBackend;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(PathBuf),
    Stop,
    Pause,
    Resume,
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    pub calls: Vec<Call>,
    pub gain: f32,
    pub position: Duration,
    pub finished: bool,
    /// Files whose load fails.
    pub broken: Vec<PathBuf>,
}

impl FakeBackend {
    pub fn loads(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Load(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl AudioBackend for FakeBackend {
    fn load_and_play(&mut self, path: &Path) -> Result<()> {
        self.calls.push(Call::Load(path.to_path_buf()));
        self.position = Duration::ZERO;
        if self.broken.iter().any(|b| b == path) {
            return Err(Error::TrackLoad {
                path: path.to_path_buf(),
                reason: "broken".to_string(),
            });
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn resume(&mut self) {
        self.calls.push(Call::Resume);
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn take_finished(&mut self) -> bool {
        std::mem::take(&mut self.finished)
    }
}

/// A playlist for `id` with `n` tracks named `t0.mp3`, `t1.mp3`, ...
pub fn playlist(id: &str, n: usize) -> std::sync::Arc<crate::library::PlaylistDescriptor> {
    use crate::library::{PlaylistDescriptor, TrackRecord};

    std::sync::Arc::new(PlaylistDescriptor {
        id: crate::token::TokenId::parse(id).unwrap(),
        items: (0..n)
            .map(|i| TrackRecord {
                file: PathBuf::from(format!("t{i}.mp3")),
                title: format!("Track {i}"),
                author: "Artist".to_string(),
                album: "Album".to_string(),
            })
            .collect(),
    })
}
