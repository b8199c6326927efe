use std::{env, path::PathBuf};

use super::schema::Settings;

/// Sources, highest precedence first: `JUKEBOX__*` environment variables,
/// the config file (optional even when named), struct defaults.
impl Settings {
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(resolve_config_path())
    }

    /// Like [`Settings::load`], with an explicit config file.
    pub fn load_from(file: Option<PathBuf>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        builder
            .add_source(
                ::config::Environment::with_prefix("JUKEBOX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.runtime.tick_ms == 0 {
            return Err("runtime.tick_ms must be >= 1".to_string());
        }
        if self.presence.debounce_ms >= self.presence.removal_timeout_ms {
            return Err(
                "presence.debounce_ms must be shorter than presence.removal_timeout_ms".to_string(),
            );
        }
        if !(self.audio.max_volume > 0.0 && self.audio.max_volume <= 1.0) {
            return Err("audio.max_volume must be in (0, 1]".to_string());
        }
        if self.volume.full_scale <= 0 {
            return Err("volume.full_scale must be > 0".to_string());
        }
        let d = &self.display;
        if d.action_show_ticks == 0 || d.volume_show_ticks == 0 || d.label_show_ticks == 0 {
            return Err("display show durations must be >= 1 tick".to_string());
        }
        if d.width == 0 || d.height == 0 {
            return Err("display.width and display.height must be >= 1".to_string());
        }
        if d.scroll_speed < 1 {
            return Err("display.scroll_speed must be >= 1".to_string());
        }
        if d.glyph_width == 0 || d.glyph_width > d.width {
            return Err("display.glyph_width must be in 1..=display.width".to_string());
        }
        if d.background.star_count == 0 {
            return Err("display.background.star_count must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `JUKEBOX_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("JUKEBOX_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/jukebox/config.toml`
/// or `~/.config/jukebox/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("jukebox").join("config.toml"))
}
