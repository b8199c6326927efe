//! `rodio` implementation of [`AudioBackend`].
//!
//! One `Sink` per loaded track on the default output stream. A sink that
//! drained while it was not stopped means the track reached its end.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use crate::error::{Error, Result};

use super::backend::AudioBackend;

pub struct RodioBackend {
    stream: OutputStream,
    audio_dir: PathBuf,
    sink: Option<Sink>,
    gain: f32,
    /// Set while a track is loaded and not stopped.
    active: bool,
}

impl RodioBackend {
    /// Open the default output device. Fails when there is none.
    pub fn open(audio_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::AudioOutput(e.to_string()))?;
        // rodio prints to stderr when the stream is dropped, which would land
        // on top of the terminal preview.
        stream.log_on_drop(false);
        Ok(Self {
            stream,
            audio_dir: audio_dir.into(),
            sink: None,
            gain: 0.0,
            active: false,
        })
    }
}

/// Create a paused `Sink` playing `path` on `stream`.
fn create_sink(stream: &OutputStream, path: &Path) -> Result<Sink> {
    let file = File::open(path).map_err(|e| Error::TrackLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let source = Decoder::new(BufReader::new(file)).map_err(|e| Error::TrackLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    sink.append(source);
    Ok(sink)
}

impl AudioBackend for RodioBackend {
    fn load_and_play(&mut self, path: &Path) -> Result<()> {
        self.stop();
        let sink = create_sink(&self.stream, &self.audio_dir.join(path))?;
        sink.set_volume(self.gain);
        sink.play();
        self.sink = Some(sink);
        self.active = true;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.active = false;
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(gain);
        }
    }

    fn position(&self) -> Duration {
        self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos)
    }

    fn take_finished(&mut self) -> bool {
        let drained = self.sink.as_ref().is_some_and(Sink::empty);
        if self.active && drained {
            self.active = false;
            return true;
        }
        false
    }
}
