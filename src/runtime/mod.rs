use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use crate::controller::Jukebox;
use crate::display::{DisplayRenderer, TerminalSink};
use crate::input::ButtonPress;

mod address;
mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> anyhow::Result<()> {
    let (settings, fallback) = settings::load_settings();
    let log = logging::init(&settings.logging)?;
    info!(log = %log.display(), "jukebox starting");
    if let Some(reason) = fallback {
        warn!("{reason}; using default settings");
    }

    let library = startup::load_library(&settings)?;
    let engine = startup::open_audio(&settings)?;
    let icons = startup::icons(&settings);

    let sink = TerminalSink::enter().context("opening the terminal display")?;
    let display = DisplayRenderer::new(sink, &settings.display, icons, rand::random())
        .with_backdrop(startup::backdrop(&settings))
        .with_font(startup::font(&settings));

    let (press_tx, press_rx) = mpsc::channel::<ButtonPress>();
    let mut simulator = startup::spawn_simulator(&library, &settings, press_tx)?;
    let quit = simulator.quit_flag();

    let mut jukebox = Jukebox::new(engine, display, library, &settings, address::local_address);
    event_loop::run(
        &mut jukebox,
        &mut simulator.reader,
        &mut simulator.knob,
        &press_rx,
        &quit,
        Duration::from_millis(settings.runtime.tick_ms),
    );

    jukebox.engine_mut().stop();
    simulator.shutdown();
    jukebox.display_mut().sink_mut().leave()?;
    info!("jukebox stopped");
    Ok(())
}
