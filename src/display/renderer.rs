use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::DisplaySettings;

use super::background::WarpField;
use super::frame::{Frame, FrameSink, Rgb, ScrollLine};
use super::icons::{ActionIcon, IconSet};

/// Presentation state. Every overlay has its own countdown of remaining
/// frames; a countdown of 0 means hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub scroll_text: String,
    pub scroll_x: i32,
    pub action: Option<ActionIcon>,
    pub action_ticks: u32,
    pub label: String,
    pub label_ticks: u32,
    pub volume: f32,
    pub volume_ticks: u32,
    pub pause_phase: u8,
    pub pause_ticks: u32,
}

/// Owns the display state, turns it into one frame per tick and pushes that
/// frame to the output device.
pub struct DisplayRenderer<S> {
    sink: S,
    settings: DisplaySettings,
    icons: IconSet,
    state: DisplayState,
    background: WarpField,
    backdrop: Option<PathBuf>,
    font: Option<PathBuf>,
    /// Set while the sink keeps failing, so a dead device logs once.
    sink_failing: bool,
}

impl<S: FrameSink> DisplayRenderer<S> {
    pub fn new(sink: S, settings: &DisplaySettings, icons: IconSet, seed: u64) -> Self {
        let background = WarpField::new(&settings.background, settings.width, settings.height, seed);
        Self {
            sink,
            icons,
            state: DisplayState {
                scroll_text: String::new(),
                scroll_x: settings.scroll_start_x,
                action: None,
                action_ticks: 0,
                label: String::new(),
                label_ticks: 0,
                volume: 0.0,
                // the bar is visible at boot
                volume_ticks: settings.volume_show_ticks,
                pause_phase: 0,
                pause_ticks: 0,
            },
            background,
            backdrop: None,
            font: None,
            sink_failing: false,
            settings: settings.clone(),
        }
    }

    pub fn with_backdrop(mut self, backdrop: Option<PathBuf>) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn with_font(mut self, font: Option<PathBuf>) -> Self {
        self.font = font;
        self
    }

    /// Replace the scrolling text and restart it from the right edge.
    pub fn set_scroll_text(&mut self, text: impl Into<String>) {
        self.state.scroll_text = text.into();
        self.state.scroll_x = self.settings.scroll_start_x;
    }

    /// Show the volume bar, but only when the level actually changed.
    pub fn set_volume(&mut self, volume: f32) {
        if volume != self.state.volume {
            self.state.volume = volume;
            self.state.volume_ticks = self.settings.volume_show_ticks;
        }
    }

    pub fn set_action_image(&mut self, icon: ActionIcon) {
        self.state.action = Some(icon);
        self.state.action_ticks = self.settings.action_show_ticks;
    }

    /// Show `text` centered, the way an unknown token id is shown.
    pub fn set_token_label(&mut self, text: impl Into<String>) {
        self.state.label = text.into();
        self.state.label_ticks = self.settings.label_show_ticks;
    }

    /// Move the "waiting for the cartridge" indicator one step. It stays
    /// visible only while it keeps being advanced every tick.
    pub fn advance_pause_indicator(&mut self) {
        self.state.pause_phase = (self.state.pause_phase + 1) % 4;
        self.state.pause_ticks = 1;
    }

    /// Compose the next frame and push it. Sink failures are logged and
    /// otherwise ignored.
    pub fn render(&mut self) {
        let frame = self.compose();
        match self.sink.push(&frame) {
            Ok(()) => {
                if self.sink_failing {
                    info!("display output recovered");
                    self.sink_failing = false;
                }
            }
            Err(e) => {
                if !self.sink_failing {
                    warn!("dropping frames: {e}");
                    self.sink_failing = true;
                }
            }
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Advance every timer by one frame and describe what is visible.
    fn compose(&mut self) -> Frame {
        let s = &self.settings;
        self.background.advance();

        let label = tick_down(&mut self.state.label_ticks).then(|| self.state.label.clone());
        let volume_bar = tick_down(&mut self.state.volume_ticks)
            .then(|| (s.width as f32 * self.state.volume.clamp(0.0, 1.0)).round() as u32);
        let action = if tick_down(&mut self.state.action_ticks) {
            self.state.action.map(|icon| self.icons.get(icon).clone())
        } else {
            None
        };
        let pause_indicator = tick_down(&mut self.state.pause_ticks).then_some(self.state.pause_phase);

        let scroll = if self.state.scroll_text.is_empty() {
            None
        } else {
            self.state.scroll_x = self.state.scroll_x.saturating_sub(s.scroll_speed);
            let text_width = self.state.scroll_text.chars().count() as i64 * i64::from(s.glyph_width);
            if i64::from(self.state.scroll_x) < -text_width {
                self.state.scroll_x = s.scroll_start_x;
            }
            Some(ScrollLine {
                text: self.state.scroll_text.clone(),
                x: self.state.scroll_x,
                y: (s.height as i32 - s.line_height as i32) / 2,
                glyph_width: s.glyph_width,
            })
        };

        Frame {
            width: s.width,
            height: s.height,
            backdrop: self.backdrop.clone(),
            background: self.background.shapes(Rgb::ACCENT),
            font: self.font.clone(),
            label,
            volume_bar,
            volume_bar_height: s.volume_bar_height,
            action,
            pause_indicator,
            scroll,
        }
    }
}

/// Consume one frame of a countdown; `true` when the overlay shows this frame.
fn tick_down(ticks: &mut u32) -> bool {
    if *ticks == 0 {
        return false;
    }
    *ticks -= 1;
    true
}
