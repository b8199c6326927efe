use std::path::PathBuf;
use std::sync::mpsc::Sender;

use anyhow::Context;
use tracing::{info, warn};

use crate::audio::{AudioEngine, RodioBackend};
use crate::config::Settings;
use crate::display::{IconSet, find_asset};
use crate::input::{ButtonPress, Simulator};
use crate::library::PlaylistLibrary;
use crate::token::TokenId;

/// UID the simulator's `0` key puts on the reader.
const UNKNOWN_UID: [u8; 4] = [0x00, 0xc0, 0xff, 0xee];
/// Keys `1`-`9`.
const SIMULATED_SLOTS: usize = 9;

/// Load the library and report how it lines up with the audio root. A
/// missing or malformed library is fatal.
pub fn load_library(settings: &Settings) -> anyhow::Result<PlaylistLibrary> {
    let path = settings.paths.library_path();
    let library = PlaylistLibrary::load(&path, &settings.paths.audio_dir)
        .with_context(|| format!("loading playlist library {}", path.display()))?;
    if library.is_empty() {
        warn!(path = %path.display(), "playlist library has no cartridges");
    }
    library.log_audit(&settings.paths.audio_dir, &settings.audio.extensions);
    Ok(library)
}

/// Open the default output device. Without one there is nothing to play on.
pub fn open_audio(settings: &Settings) -> anyhow::Result<AudioEngine<RodioBackend>> {
    let backend = RodioBackend::open(&settings.paths.audio_dir).context("opening audio output")?;
    let mut engine = AudioEngine::new(backend, &settings.audio);
    engine.set_volume(0.0);
    Ok(engine)
}

/// Icon bitmaps from `paths.image_dir`, or plain glyphs when the directory
/// is missing altogether.
pub fn icons(settings: &Settings) -> IconSet {
    let dir = &settings.paths.image_dir;
    if dir.is_dir() {
        IconSet::resolve(dir)
    } else {
        warn!(dir = %dir.display(), "image directory missing, drawing glyph icons");
        IconSet::glyphs_only()
    }
}

/// Backdrop bitmap drawn under the background effect, if there is one.
pub fn backdrop(settings: &Settings) -> Option<PathBuf> {
    if !settings.paths.image_dir.is_dir() {
        return None;
    }
    find_asset(settings.paths.background_image_path(), "backdrop")
}

/// Font for the scroll line and label. Without one the sink draws with
/// whatever font it has.
pub fn font(settings: &Settings) -> Option<PathBuf> {
    let dir = &settings.paths.font_dir;
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "font directory missing, using the display's own font");
        return None;
    }
    find_asset(settings.paths.font_path(), "font")
}

/// Start the keyboard stand-ins for reader, knob and buttons.
pub fn spawn_simulator(
    library: &PlaylistLibrary,
    settings: &Settings,
    presses: Sender<ButtonPress>,
) -> anyhow::Result<Simulator> {
    let cartridges: Vec<TokenId> = (0..library.len().min(SIMULATED_SLOTS))
        .filter_map(|i| library.nth(i))
        .map(|c| c.id.clone())
        .collect();
    let unknown = TokenId::from_bytes(&UNKNOWN_UID).context("simulated uid is empty")?;
    if library.lookup(&unknown).is_some() {
        info!(token = %unknown, "simulated unknown cartridge is in the library");
    }
    info!(cartridges = cartridges.len(), "starting keyboard simulator");
    Ok(Simulator::spawn(
        cartridges,
        unknown,
        settings.volume.full_scale,
        presses,
    ))
}
