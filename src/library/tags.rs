//! Fill blank track metadata from the audio file's own tags.

use std::path::Path;

use lofty::prelude::{Accessor, TaggedFileExt};

use super::model::TrackRecord;

fn non_blank(v: &str) -> Option<String> {
    let v = v.trim();
    (!v.is_empty()).then(|| v.to_string())
}

/// Fill `title`, `author` and `album` when the library left them blank.
///
/// The library always wins over tags. A track without any title ends up
/// with its file stem.
pub fn fill_from_tags(record: &mut TrackRecord, audio_dir: &Path) {
    let needs_tags =
        record.title.trim().is_empty() || record.author.trim().is_empty() || record.album.trim().is_empty();

    if needs_tags {
        if let Ok(tagged) = lofty::read_from_path(audio_dir.join(&record.file)) {
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                let found = [tag.title(), tag.artist(), tag.album()];
                let fields = [&mut record.title, &mut record.author, &mut record.album];
                for (field, value) in fields.into_iter().zip(found) {
                    if field.trim().is_empty() {
                        if let Some(v) = value.as_deref().and_then(non_blank) {
                            *field = v;
                        }
                    }
                }
            }
        }
    }

    if record.title.trim().is_empty() {
        record.title = record
            .file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
    }
}
