use std::path::{Path, PathBuf};

use tracing::warn;

/// Action overlays the control loop can request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ActionIcon {
    Play,
    Pause,
    Next,
    Previous,
    Cartridge,
}

impl ActionIcon {
    pub const ALL: [ActionIcon; 5] = [
        ActionIcon::Play,
        ActionIcon::Pause,
        ActionIcon::Next,
        ActionIcon::Previous,
        ActionIcon::Cartridge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ActionIcon::Play => "play",
            ActionIcon::Pause => "pause",
            ActionIcon::Next => "next",
            ActionIcon::Previous => "previous",
            ActionIcon::Cartridge => "cartridge",
        }
    }

    /// Stand-in for devices that draw text instead of bitmaps.
    pub fn glyph(self) -> &'static str {
        match self {
            ActionIcon::Play => "▶",
            ActionIcon::Pause => "⏸",
            ActionIcon::Next => "⏭",
            ActionIcon::Previous => "⏮",
            ActionIcon::Cartridge => "▣",
        }
    }

    fn index(self) -> usize {
        match self {
            ActionIcon::Play => 0,
            ActionIcon::Pause => 1,
            ActionIcon::Next => 2,
            ActionIcon::Previous => 3,
            ActionIcon::Cartridge => 4,
        }
    }
}

/// An icon plus the bitmap backing it, when one was found at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconAsset {
    pub icon: ActionIcon,
    pub bitmap: Option<PathBuf>,
}

/// Icon assets resolved once at startup.
#[derive(Debug, Clone)]
pub struct IconSet {
    assets: [IconAsset; 5],
}

impl IconSet {
    /// Look for `<name>.png` for every icon in `image_dir`. Missing bitmaps
    /// are logged; those icons fall back to their glyph.
    pub fn resolve(image_dir: &Path) -> Self {
        let assets = ActionIcon::ALL.map(|icon| IconAsset {
            icon,
            bitmap: find_asset(image_dir.join(format!("{}.png", icon.name())), icon.name()),
        });
        Self { assets }
    }

    pub fn glyphs_only() -> Self {
        Self {
            assets: ActionIcon::ALL.map(|icon| IconAsset { icon, bitmap: None }),
        }
    }

    pub fn get(&self, icon: ActionIcon) -> &IconAsset {
        &self.assets[icon.index()]
    }
}

/// `Some(path)` when `path` is a file. A missing asset is logged once here
/// and left for the sink to do without.
pub fn find_asset(path: PathBuf, what: &str) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        warn!(asset = what, path = %path.display(), "display asset missing");
        None
    }
}
