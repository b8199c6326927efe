use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::input::{ButtonAction, ButtonLabel};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// Environment variables are process-global; tests touching them hold this.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Restores the touched variables on drop.
struct ScopedEnv {
    _lock: MutexGuard<'static, ()>,
    saved: Vec<(&'static str, Option<OsString>)>,
}

impl ScopedEnv {
    fn new() -> Self {
        Self {
            _lock: ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner()),
            saved: Vec::new(),
        }
    }

    fn put(&mut self, key: &'static str, val: Option<&str>) -> &mut Self {
        self.saved.push((key, env::var_os(key)));
        // SAFETY: all environment access in these tests is serialized by ENV_LOCK.
        unsafe {
            match val {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
        self
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, old) in self.saved.drain(..).rev() {
            // SAFETY: still holding ENV_LOCK.
            unsafe {
                match old {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

#[test]
fn resolve_config_path_prefers_jukebox_config_path() {
    let mut env = ScopedEnv::new();
    env.put("JUKEBOX_CONFIG_PATH", Some("/tmp/jukebox-test-config.toml"));
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/jukebox-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let mut env = ScopedEnv::new();
    env.put("XDG_CONFIG_HOME", Some("/tmp/xdg-config-home"))
        .put("HOME", Some("/tmp/home-should-not-win"));

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/xdg-config-home")
            .join("jukebox")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let mut env = ScopedEnv::new();
    env.put("XDG_CONFIG_HOME", None).put("HOME", Some("/tmp/home-dir"));

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("jukebox")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_reference_appliance() {
    let s = Settings::default();
    assert_eq!(s.audio.max_volume, 0.5);
    assert_eq!(s.audio.restart_threshold_ms, 2000);
    assert_eq!(s.presence.debounce_ms, 200);
    assert_eq!(s.presence.removal_timeout_ms, 3000);
    assert_eq!(s.volume.full_scale, 26400);
    assert_eq!(s.buttons.bounce_ms, 200);
    assert_eq!(s.display.action_show_ticks, 10);
    assert_eq!(s.display.label_show_ticks, 100);
    assert_eq!(s.paths.library_path(), PathBuf::from("data/rfids.toml"));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let mut env = ScopedEnv::new();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[paths]
audio_dir = "/srv/audio"
data_dir = "/srv/data"
library_file = "cards.toml"

[audio]
max_volume = 0.8

[presence]
debounce_ms = 150
removal_timeout_ms = 5000

[buttons.map]
b = "next"
y = "previous"

[display]
scroll_speed = 5

[display.background]
star_count = 12
"#,
    )
    .unwrap();

    env.put("JUKEBOX__AUDIO__MAX_VOLUME", None);

    let s = Settings::load_from(Some(cfg_path)).unwrap();
    assert_eq!(s.paths.audio_dir, PathBuf::from("/srv/audio"));
    assert_eq!(
        s.paths.library_path(),
        PathBuf::from("/srv/data/cards.toml")
    );
    assert_eq!(s.audio.max_volume, 0.8);
    assert_eq!(s.presence.debounce_ms, 150);
    assert_eq!(s.presence.removal_timeout_ms, 5000);
    assert_eq!(s.buttons.map.get(&ButtonLabel::B), Some(&ButtonAction::Next));
    assert_eq!(s.buttons.map.get(&ButtonLabel::Y), Some(&ButtonAction::Previous));
    assert_eq!(s.display.scroll_speed, 5);
    assert_eq!(s.display.background.star_count, 12);
    // untouched sections keep their defaults
    assert_eq!(s.display.action_show_ticks, 10);
    assert_eq!(s.volume.full_scale, 26400);
}

#[test]
fn settings_env_overrides_config_file() {
    let mut env = ScopedEnv::new();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[runtime]
tick_ms = 40
"#,
    )
    .unwrap();

    env.put("JUKEBOX_CONFIG_PATH", Some(cfg_path.to_str().unwrap()))
        .put("JUKEBOX__RUNTIME__TICK_MS", Some("15"));

    let s = Settings::load().unwrap();
    assert_eq!(s.runtime.tick_ms, 15);
}

#[test]
fn validate_rejects_inverted_presence_thresholds() {
    let mut s = Settings::default();
    s.presence.debounce_ms = 3000;
    s.presence.removal_timeout_ms = 200;
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_out_of_range_max_volume() {
    let mut s = Settings::default();
    s.audio.max_volume = 0.0;
    assert!(s.validate().is_err());
    s.audio.max_volume = 1.5;
    assert!(s.validate().is_err());
    s.audio.max_volume = 1.0;
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_a_scroll_line_that_cannot_wrap() {
    let mut s = Settings::default();
    s.display.scroll_speed = 0;
    assert!(s.validate().is_err());
    s.display.scroll_speed = -3;
    assert!(s.validate().is_err());
    s.display.scroll_speed = 1;
    assert!(s.validate().is_ok());
}

#[test]
fn validate_bounds_glyph_width_by_the_panel() {
    let mut s = Settings::default();
    s.display.glyph_width = 0;
    assert!(s.validate().is_err());
    s.display.glyph_width = 300_000_000;
    assert!(s.validate().is_err());
    s.display.glyph_width = s.display.width;
    assert!(s.validate().is_ok());
}

#[test]
fn asset_roots_default_next_to_the_binary() {
    let s = Settings::default();
    assert_eq!(s.paths.font_dir, PathBuf::from("fonts"));
    assert_eq!(s.paths.font_path(), PathBuf::from("fonts/rainyhearts.ttf"));
    assert_eq!(
        s.paths.background_image_path(),
        PathBuf::from("images/stephans_quintet.png")
    );
    assert_eq!(s.display.background.throttle_frames, 0);
}

#[test]
fn font_dir_and_throttle_come_from_env() {
    let mut env = ScopedEnv::new();
    env.put("JUKEBOX__PATHS__FONT_DIR", Some("/usr/share/fonts/jukebox"))
        .put("JUKEBOX__DISPLAY__BACKGROUND__THROTTLE_FRAMES", Some("2"));

    let s = Settings::load_from(None).unwrap();
    assert_eq!(
        s.paths.font_path(),
        PathBuf::from("/usr/share/fonts/jukebox/rainyhearts.ttf")
    );
    assert_eq!(s.display.background.throttle_frames, 2);
}
