use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::audio::AudioBackend;
use crate::controller::{Jukebox, TickInput};
use crate::display::FrameSink;
use crate::input::{ButtonPress, TokenReader, VolumeSensor};

/// Poll the peripherals and tick the jukebox every `tick` until `quit` is
/// set. Returns the number of ticks run.
pub fn run<B, S, R, V>(
    jukebox: &mut Jukebox<B, S>,
    reader: &mut R,
    knob: &mut V,
    presses: &Receiver<ButtonPress>,
    quit: &AtomicBool,
    tick: Duration,
) -> u64
where
    B: AudioBackend,
    S: FrameSink,
    R: TokenReader,
    V: VolumeSensor,
{
    info!(tick_ms = tick.as_millis() as u64, "control loop running");
    let mut ticks = 0u64;
    let mut deadline = Instant::now();

    while !quit.load(Ordering::Relaxed) {
        let input = TickInput {
            token: reader.poll(),
            presses: presses.try_iter().collect(),
            volume: Some(knob.read()),
        };
        jukebox.tick(input, Instant::now());
        ticks += 1;

        deadline += tick;
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        } else {
            // overran; don't try to catch up with a burst of ticks
            debug!(late_ms = (now - deadline).as_millis() as u64, "tick overran");
            deadline = now;
        }
    }

    info!(
        ticks,
        presence = ?jukebox.presence().state(),
        playing = jukebox.music_active(),
        track = jukebox.engine().state().index,
        "control loop stopped"
    );
    ticks
}
