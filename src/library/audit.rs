use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::model::PlaylistDescriptor;

/// Startup consistency report between the library and the audio root.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// Library items whose file is not under the audio root.
    pub missing: Vec<PathBuf>,
    /// Audio files under the root that no cartridge references.
    pub unreferenced: Vec<PathBuf>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unreferenced.is_empty()
    }
}

fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .any(|e| !e.is_empty() && e == ext)
        })
        .unwrap_or(false)
}

/// Compare the files the cartridges reference with what is on disk.
pub fn audit<'a>(
    cartridges: impl IntoIterator<Item = &'a PlaylistDescriptor>,
    audio_dir: &Path,
    extensions: &[String],
) -> AuditReport {
    let referenced: BTreeSet<PathBuf> = cartridges
        .into_iter()
        .flat_map(|c| c.items.iter().map(|t| t.file.clone()))
        .collect();

    let on_disk: BTreeSet<PathBuf> = WalkDir::new(audio_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && is_audio_file(e.path(), extensions))
        .filter_map(|e| e.path().strip_prefix(audio_dir).ok().map(Path::to_path_buf))
        .collect();

    AuditReport {
        missing: referenced
            .iter()
            .filter(|p| !audio_dir.join(p).is_file())
            .cloned()
            .collect(),
        unreferenced: on_disk.difference(&referenced).cloned().collect(),
    }
}
