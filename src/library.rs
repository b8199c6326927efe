//! Playlist library: the static token id -> playlist mapping.
//!
//! Loaded once at startup; a missing or malformed resource is fatal. After
//! that `lookup` cannot fail, an unknown token simply has no playlist.

mod audit;
mod load;
mod model;
mod tags;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::token::TokenId;

pub use audit::AuditReport;
pub use model::{PlaylistDescriptor, TrackRecord};

pub struct PlaylistLibrary {
    /// Cartridges in resource order.
    cartridges: Vec<Arc<PlaylistDescriptor>>,
    by_id: HashMap<TokenId, usize>,
}

impl PlaylistLibrary {
    /// Load the resource at `path`, filling blank metadata from the tags of
    /// the files under `audio_dir`.
    pub fn load(path: &Path, audio_dir: &Path) -> Result<Self> {
        let mut cartridges = load::read(path)?;
        for cartridge in &mut cartridges {
            for item in &mut cartridge.items {
                tags::fill_from_tags(item, audio_dir);
            }
        }
        let library = Self::from_descriptors(cartridges);
        info!(
            path = %path.display(),
            cartridges = library.len(),
            "playlist library loaded"
        );
        Ok(library)
    }

    /// Build a library from already-validated descriptors.
    pub fn from_descriptors(descriptors: Vec<PlaylistDescriptor>) -> Self {
        let cartridges: Vec<Arc<PlaylistDescriptor>> =
            descriptors.into_iter().map(Arc::new).collect();
        let by_id = cartridges
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self { cartridges, by_id }
    }

    pub fn lookup(&self, id: &TokenId) -> Option<Arc<PlaylistDescriptor>> {
        self.by_id.get(id).map(|&i| Arc::clone(&self.cartridges[i]))
    }

    /// The n-th cartridge in resource order.
    pub fn nth(&self, n: usize) -> Option<&Arc<PlaylistDescriptor>> {
        self.cartridges.get(n)
    }

    pub fn len(&self) -> usize {
        self.cartridges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cartridges.is_empty()
    }

    /// Check the library against the audio root and log what does not line up.
    pub fn log_audit(&self, audio_dir: &Path, extensions: &[String]) -> AuditReport {
        let report = audit::audit(self.cartridges.iter().map(Arc::as_ref), audio_dir, extensions);
        for p in &report.missing {
            warn!(file = %p.display(), "library references a missing audio file");
        }
        for p in &report.unreferenced {
            warn!(file = %p.display(), "audio file is not on any cartridge");
        }
        if report.is_clean() {
            info!(audio_dir = %audio_dir.display(), "library matches the audio root");
        }
        report
    }
}
