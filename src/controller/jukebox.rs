use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::audio::{AudioBackend, AudioEngine, EngineEvent};
use crate::config::Settings;
use crate::display::{ActionIcon, DisplayRenderer, FrameSink};
use crate::error::Result;
use crate::input::{ButtonAction, ButtonMap, ButtonPress, Debouncer, normalize_volume};
use crate::library::PlaylistLibrary;
use crate::token::TokenId;

use super::presence::{PresenceMachine, Transition};

/// Everything the peripherals reported for one tick.
#[derive(Debug, Default)]
pub struct TickInput {
    pub token: Option<TokenId>,
    /// Presses received since the previous tick, oldest first.
    pub presses: Vec<ButtonPress>,
    /// Raw knob sample; `None` when the knob was not read.
    pub volume: Option<Result<i32>>,
}

type AddressLookup = Box<dyn Fn() -> String>;

/// The control loop state: reconciles the reader, buttons and knob with the
/// audio engine and the display, one tick at a time.
pub struct Jukebox<B, S> {
    engine: AudioEngine<B>,
    display: DisplayRenderer<S>,
    library: PlaylistLibrary,
    presence: PresenceMachine,
    buttons: ButtonMap,
    debouncer: Debouncer,
    full_scale: i32,
    address: AddressLookup,
    /// A cartridge with tracks is installed.
    music_active: bool,
    /// Paused with the toggle button; heartbeats leave it paused.
    user_paused: bool,
    volume_failing: bool,
}

impl<B: AudioBackend, S: FrameSink> Jukebox<B, S> {
    pub fn new(
        engine: AudioEngine<B>,
        display: DisplayRenderer<S>,
        library: PlaylistLibrary,
        settings: &Settings,
        address: impl Fn() -> String + 'static,
    ) -> Self {
        Self {
            engine,
            display,
            library,
            presence: PresenceMachine::new(&settings.presence),
            buttons: ButtonMap::new(&settings.buttons.map),
            debouncer: Debouncer::new(Duration::from_millis(settings.buttons.bounce_ms)),
            full_scale: settings.volume.full_scale,
            address: Box::new(address),
            music_active: false,
            user_paused: false,
            volume_failing: false,
        }
    }

    /// Run one iteration: token transition, buttons, volume, end of track,
    /// engine notifications, then exactly one frame.
    pub fn tick(&mut self, input: TickInput, now: Instant) {
        let transition = self.presence.observe(input.token, now);
        self.apply(transition);

        for press in &input.presses {
            self.press(press);
        }

        if let Some(sample) = input.volume {
            self.volume(sample);
        }

        if self.engine.poll_track_end() {
            self.user_paused = false;
        }

        while let Some(event) = self.engine.take_event() {
            match event {
                EngineEvent::TrackLoaded(track) => self.display.set_scroll_text(track.scroll_text()),
                EngineEvent::LoadFailed { .. } => self.display.set_scroll_text(""),
            }
        }

        self.display.render();
    }

    pub fn engine(&self) -> &AudioEngine<B> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AudioEngine<B> {
        &mut self.engine
    }

    #[cfg(test)]
    pub fn display(&self) -> &DisplayRenderer<S> {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplayRenderer<S> {
        &mut self.display
    }

    pub fn presence(&self) -> &PresenceMachine {
        &self.presence
    }

    pub fn music_active(&self) -> bool {
        self.music_active
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Idle => {}
            Transition::Heartbeat(_) => {
                if self.music_active && !self.user_paused {
                    self.engine.unpause();
                }
            }
            Transition::Changed(id) => self.token_changed(id),
            Transition::Grace { elapsed } => {
                trace!(elapsed_ms = elapsed.as_millis() as u64, "token missing");
                self.engine.pause();
                self.display.advance_pause_indicator();
            }
            Transition::Removed => {
                info!("cartridge removed");
                self.engine.stop();
                self.display.set_scroll_text("");
                self.music_active = false;
                self.user_paused = false;
            }
        }
    }

    fn token_changed(&mut self, id: TokenId) {
        self.user_paused = false;
        match self.library.lookup(&id) {
            Some(playlist) => {
                info!(token = %id, tracks = playlist.len(), "cartridge inserted");
                self.display.set_scroll_text("");
                self.engine.set_playlist(playlist);
                self.music_active = self.engine.has_tracks();
                self.display.set_action_image(ActionIcon::Cartridge);
            }
            None => {
                info!(token = %id, "unknown cartridge");
                self.engine.stop();
                self.music_active = false;
                self.display.set_token_label(id.as_str());
                self.display.set_scroll_text("");
            }
        }
    }

    fn press(&mut self, press: &ButtonPress) {
        if !self.debouncer.accept(press) {
            trace!(button = %press.label, "bounce ignored");
            return;
        }
        let Some(action) = self.buttons.action(press.label) else {
            return;
        };
        debug!(button = %press.label, ?action, "button");

        match action {
            ButtonAction::ShowAddress => {
                let address = (self.address)();
                self.display.set_token_label(address);
            }
            _ if !self.music_active => {}
            ButtonAction::TogglePause => {
                self.user_paused = self.engine.toggle_pause();
                if self.user_paused {
                    self.display.set_scroll_text("");
                    self.display.set_action_image(ActionIcon::Pause);
                } else {
                    let text = self
                        .engine
                        .current_track()
                        .map(|t| t.scroll_text())
                        .unwrap_or_default();
                    self.display.set_scroll_text(text);
                    self.display.set_action_image(ActionIcon::Play);
                }
            }
            ButtonAction::Next => {
                self.user_paused = false;
                self.engine.next_track();
                self.display.set_action_image(ActionIcon::Next);
            }
            ButtonAction::Previous => {
                self.user_paused = false;
                self.engine.prev_track();
                self.display.set_action_image(ActionIcon::Previous);
            }
        }
    }

    fn volume(&mut self, sample: Result<i32>) {
        match sample {
            Ok(raw) => {
                if self.volume_failing {
                    info!("volume sensor recovered");
                    self.volume_failing = false;
                }
                let level = normalize_volume(raw, self.full_scale);
                self.engine.set_volume(level);
                self.display.set_volume(level);
            }
            Err(e) => {
                if !self.volume_failing {
                    warn!("volume sensor read failed, keeping last level: {e}");
                    self.volume_failing = true;
                }
            }
        }
    }
}
