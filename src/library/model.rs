use std::path::PathBuf;

use serde::Deserialize;

use crate::token::TokenId;

/// One playable item of a cartridge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackRecord {
    /// Path relative to the audio root.
    pub file: PathBuf,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub album: String,
}

/// The playlist a cartridge selects. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaylistDescriptor {
    pub id: TokenId,
    #[serde(default)]
    pub items: Vec<TrackRecord>,
}

impl PlaylistDescriptor {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// On-disk shape of the library resource.
#[derive(Debug, Deserialize)]
pub(super) struct LibraryFile {
    #[serde(default, rename = "cartridge")]
    pub cartridges: Vec<PlaylistDescriptor>,
}
