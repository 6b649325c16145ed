//! Music track record and the bundled catalog.

use serde::{Deserialize, Serialize};

/// A playable track in the music catalog.
///
/// The id prefix is the sole discriminator between bundled and uploaded
/// tracks: `default-N` entries ship with the app (`asset:` uris resolved by
/// the host), `custom-<epoch-millis>` entries point at device-local files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub uri: String,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            uri: uri.into(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.id.starts_with("default-")
    }

    pub fn is_upload(&self) -> bool {
        self.id.starts_with("custom-")
    }
}

/// Returns the five bundled tracks in catalog order.
pub fn builtin_tracks() -> Vec<Track> {
    vec![
        Track::new("default-1", "Peaceful Melody", "asset:music/peaceful_melody.mp3"),
        Track::new("default-2", "Gentle Rain", "asset:music/gentle_rain.mp3"),
        Track::new("default-3", "Soft Piano", "asset:music/soft_piano.mp3"),
        Track::new("default-4", "Ocean Waves", "asset:music/ocean_waves.mp3"),
        Track::new("default-5", "Night Ambience", "asset:music/night_ambience.mp3"),
    ]
}
