use crate::config::Settings;

/// Settings to run with, plus why the defaults were used instead of the
/// config file, if they were. Logging is not up yet when this runs, so the
/// caller reports the reason once it is.
pub fn load_settings() -> (Settings, Option<String>) {
    match Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (Settings::default(), Some(format!("invalid config: {msg}"))),
        },
        Err(e) => (
            Settings::default(),
            Some(format!("failed to load config: {e}")),
        ),
    }
}
