//! Memory record.

use serde::{Deserialize, Serialize};

/// A remembered moment on the relationship screen.
///
/// `id` is the creation time in epoch milliseconds rendered as a string; it is
/// the delete handle and must never be reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: String,
    pub text: String,
    pub image: Option<String>,
    pub location: String,
    pub date: String,
    pub full_details: Option<String>,
}

impl Memory {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        image: Option<String>,
        location: impl Into<String>,
        date: impl Into<String>,
        full_details: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            image,
            location: location.into(),
            date: date.into(),
            full_details,
        }
    }
}
