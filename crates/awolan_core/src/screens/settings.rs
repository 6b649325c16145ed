//! Settings screen operations.
//!
//! # Responsibility
//! - Expose the theme and wallpaper option lists the screen renders.
//! - Turn a picked audio file into a catalog upload, deriving the title
//!   from the file name.
//!
//! # Invariants
//! - Theme selection, wallpaper choice and volume go straight to their
//!   state components; this module adds no state of its own.
//! - Title derivation strips one trailing extension only; the rest of the
//!   file name is kept verbatim.

use crate::model::{FormResult, ThemeName};
use crate::state::MusicState;
use once_cell::sync::Lazy;
use regex::Regex;

static EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[^/.]+$").expect("valid extension regex"));

/// One entry of the theme picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeOption {
    pub id: &'static str,
    pub label: &'static str,
}

/// The theme picker entries, in presentation order.
pub fn theme_options() -> Vec<ThemeOption> {
    ThemeName::all()
        .into_iter()
        .map(|name| ThemeOption {
            id: name.id(),
            label: name.label(),
        })
        .collect()
}

/// Bundled wallpaper keys, in presentation order.
pub fn wallpaper_options() -> [&'static str; 5] {
    [
        "wallpaper1",
        "wallpaper2",
        "wallpaper3",
        "wallpaper4",
        "wallpaper5",
    ]
}

/// Adds a picked audio file to the catalog, deriving the title from the
/// file name. Returns the new track id.
pub fn upload_track(music: &mut MusicState, file_name: &str, uri: &str) -> FormResult<String> {
    let title = derive_track_title(file_name);
    music.add_track(&title, uri)
}

/// The display title for an uploaded file: the name without its extension.
pub fn derive_track_title(file_name: &str) -> String {
    EXTENSION_RE.replace(file_name.trim(), "").into_owned()
}
