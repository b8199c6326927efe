use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::input::{ButtonAction, ButtonLabel};

/// Top-level appliance settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/jukebox/config.toml` or `~/.config/jukebox/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `JUKEBOX__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub audio: AudioSettings,
    pub presence: PresenceSettings,
    pub display: DisplaySettings,
    pub buttons: ButtonSettings,
    pub volume: VolumeSettings,
    pub runtime: RuntimeSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Root that `TrackRecord.file` paths are relative to.
    pub audio_dir: PathBuf,
    /// Directory holding the playlist library resource.
    pub data_dir: PathBuf,
    /// Directory holding the action icon bitmaps and the backdrop.
    pub image_dir: PathBuf,
    /// Directory holding the display font.
    pub font_dir: PathBuf,
    /// File name of the library resource inside `data_dir`.
    pub library_file: String,
    /// Backdrop bitmap inside `image_dir`, drawn under the background effect.
    pub background_image: String,
    /// Font inside `font_dir` used for the scroll line and the token label.
    pub font_file: String,
}

impl PathSettings {
    pub fn library_path(&self) -> PathBuf {
        self.data_dir.join(&self.library_file)
    }

    pub fn background_image_path(&self) -> PathBuf {
        self.image_dir.join(&self.background_image)
    }

    pub fn font_path(&self) -> PathBuf {
        self.font_dir.join(&self.font_file)
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            audio_dir: PathBuf::from("audio"),
            data_dir: PathBuf::from("data"),
            image_dir: PathBuf::from("images"),
            font_dir: PathBuf::from("fonts"),
            library_file: "rfids.toml".to_string(),
            background_image: "stephans_quintet.png".to_string(),
            font_file: "rainyhearts.ttf".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Gain ceiling applied after the easing curve. Bass-heavy tracks brown out
    /// a cheap USB battery at full scale.
    pub max_volume: f32,
    /// Below this position, "previous" goes to the previous track instead of
    /// restarting the current one (milliseconds).
    pub restart_threshold_ms: u64,
    /// Audio file extensions considered by the library audit (without dot).
    pub extensions: Vec<String>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            max_volume: 0.5,
            restart_threshold_ms: 2000,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PresenceSettings {
    /// Missed reads shorter than this are ignored (milliseconds).
    pub debounce_ms: u64,
    /// Missed reads longer than this mean the token was removed (milliseconds).
    pub removal_timeout_ms: u64,
}

impl Default for PresenceSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            removal_timeout_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub width: u32,
    pub height: u32,
    /// Ticks an action icon stays on screen.
    pub action_show_ticks: u32,
    /// Ticks the volume bar stays on screen after a change.
    pub volume_show_ticks: u32,
    /// Ticks a token-id label stays on screen.
    pub label_show_ticks: u32,
    /// Horizontal scroll speed in pixels per tick.
    pub scroll_speed: i32,
    /// X coordinate the scroll text (re)starts from.
    pub scroll_start_x: i32,
    /// Horizontal advance of one scroll-text glyph in pixels.
    pub glyph_width: u32,
    /// Height of the scroll-text line in pixels.
    pub line_height: u32,
    pub volume_bar_height: u32,
    pub background: BackgroundSettings,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 240,
            height: 240,
            action_show_ticks: 10,
            volume_show_ticks: 10,
            label_show_ticks: 100,
            scroll_speed: 3,
            scroll_start_x: 280,
            glyph_width: 18,
            line_height: 40,
            volume_bar_height: 20,
            background: BackgroundSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackgroundSettings {
    pub star_count: usize,
    pub star_size: f32,
    /// Fraction of the distance from center added to a star each tick.
    pub warp_speed: f32,
    pub polygons: bool,
    pub polygon_spawn_every: u32,
    /// Simulation ticks run before the first frame.
    pub fast_forward_ticks: u32,
    /// Frames to hold the effect still between two simulation steps, for
    /// panels too slow to redraw every tick. 0 steps every frame.
    pub throttle_frames: u32,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            star_count: 30,
            star_size: 8.0,
            warp_speed: 0.02,
            polygons: true,
            polygon_spawn_every: 50,
            fast_forward_ticks: 200,
            throttle_frames: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ButtonSettings {
    /// Minimum spacing between two accepted presses of the same button (milliseconds).
    pub bounce_ms: u64,
    /// Overrides of the default wiring (A toggle-pause, B previous,
    /// X show-address, Y next).
    ///
    /// Example: `{ b = "next", y = "previous" }` swaps the skip buttons.
    pub map: BTreeMap<ButtonLabel, ButtonAction>,
}

impl Default for ButtonSettings {
    fn default() -> Self {
        Self {
            bounce_ms: 200,
            map: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VolumeSettings {
    /// Raw sensor sample that maps to full volume.
    pub full_scale: i32,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self { full_scale: 26400 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Target tick period (milliseconds).
    pub tick_ms: u64,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self { tick_ms: 30 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing-subscriber` filter directive, overridden by `RUST_LOG`.
    pub filter: String,
    /// Log file; defaults to `jukebox.log` in the temp directory.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "jukebox=info".to_string(),
            file: None,
        }
    }
}
