use std::collections::HashSet;
use std::path::{Component, Path};

use crate::error::{Error, Result};

use super::model::{LibraryFile, PlaylistDescriptor};

/// Parse the library resource text and validate its records.
pub(super) fn parse(text: &str, path: &Path) -> Result<Vec<PlaylistDescriptor>> {
    let file: LibraryFile = toml::from_str(text).map_err(|source| Error::LibraryParse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut seen = HashSet::new();
    for cartridge in &file.cartridges {
        if !seen.insert(cartridge.id.clone()) {
            return Err(Error::LibraryInvalid(format!(
                "duplicate cartridge id {}",
                cartridge.id
            )));
        }
        for (i, item) in cartridge.items.iter().enumerate() {
            if item.file.as_os_str().is_empty() {
                return Err(Error::LibraryInvalid(format!(
                    "cartridge {} item {i} has an empty file",
                    cartridge.id
                )));
            }
            let escapes = item
                .file
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
            if item.file.is_absolute() || escapes {
                return Err(Error::LibraryInvalid(format!(
                    "cartridge {} item {i}: {:?} must stay under the audio root",
                    cartridge.id, item.file
                )));
            }
        }
    }

    Ok(file.cartridges)
}

/// Read and parse the library resource at `path`.
pub(super) fn read(path: &Path) -> Result<Vec<PlaylistDescriptor>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::LibraryIo {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text, path)
}
