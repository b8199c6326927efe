use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

const FALLBACK_FILTER: &str = "jukebox=info";

pub fn log_path(settings: &LoggingSettings) -> PathBuf {
    settings
        .file
        .clone()
        .unwrap_or_else(|| env::temp_dir().join("jukebox.log"))
}

/// Install the global subscriber, appending to the log file. The terminal
/// belongs to the display preview, so nothing is written to stderr.
pub fn init(settings: &LoggingSettings) -> anyhow::Result<PathBuf> {
    let path = log_path(settings);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()
        .context("installing the log subscriber")?;
    Ok(path)
}
