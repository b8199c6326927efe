use std::path::Path;
use std::time::Duration;

use crate::error::Result;

/// The narrow interface to whatever decodes and outputs audio.
///
/// Every call must return quickly; the control loop calls into the backend
/// from inside a tick.
pub trait AudioBackend {
    /// Replace the current track with `path` and start playing it.
    fn load_and_play(&mut self, path: &Path) -> Result<()>;
    fn stop(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    /// Output gain in `[0, 1]`, applied to the current and all future tracks.
    fn set_gain(&mut self, gain: f32);
    /// Playback position inside the current track.
    fn position(&self) -> Duration;
    /// `true` once after the current track played to its natural end.
    fn take_finished(&mut self) -> bool;
}
