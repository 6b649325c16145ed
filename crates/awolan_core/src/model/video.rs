//! Video gallery records.

use serde::{Deserialize, Serialize};

/// Which of the two session-only video collections an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoCollection {
    Memories,
    Goals,
}

/// A saved video reference with its display metadata.
///
/// Video collections live only for the app session; the underlying files stay
/// wherever the device keeps them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub uri: String,
    pub thumbnail: Option<String>,
    pub details: String,
    pub location: String,
    pub date: String,
}

impl VideoItem {
    pub fn new(
        id: impl Into<String>,
        uri: impl Into<String>,
        thumbnail: Option<String>,
        details: impl Into<String>,
        location: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            thumbnail,
            details: details.into(),
            location: location.into(),
            date: date.into(),
        }
    }
}
