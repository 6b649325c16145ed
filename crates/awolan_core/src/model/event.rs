//! Event record.

use serde::{Deserialize, Serialize};

/// A dated occasion shown on the events screen and the home dashboard.
///
/// The `date` field is stored verbatim as entered. It is not required to be
/// parseable; unparseable dates simply never match reminder or upcoming-event
/// projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub date: String,
    pub location: String,
    /// Device-local image path, when one was attached.
    pub image: Option<String>,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        location: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            location: location.into(),
            image,
        }
    }
}
