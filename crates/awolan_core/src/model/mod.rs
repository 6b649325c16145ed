//! Domain records shared by state components and screen controllers.
//!
//! # Responsibility
//! - Define the flat record shapes persisted as JSON lists.
//! - Keep the theme catalog and bundled track/wallpaper data in one place.
//!
//! # Invariants
//! - Entity ids are creation-timestamp strings, never reused.
//! - Records must stay `serde`-compatible with already persisted values.

pub mod event;
pub mod expense;
pub mod form;
pub mod memory;
pub mod saving;
pub mod theme;
pub mod track;
pub mod video;

pub use event::Event;
pub use expense::Expense;
pub use form::{require, FormError, FormResult};
pub use memory::Memory;
pub use saving::SavingGoal;
pub use theme::{Palette, ThemeName};
pub use track::Track;
pub use video::{VideoCollection, VideoItem};

use chrono::{NaiveDate, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Parses an entity date field.
///
/// Dates are stored verbatim as entered; only `YYYY-MM-DD` values are
/// considered parseable. Callers that need a real date (reminders, upcoming
/// projections) skip entities whose date does not parse.
pub fn parse_entity_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

static LAST_ENTITY_ID: AtomicI64 = AtomicI64::new(0);

/// Issues a creation-timestamp id in epoch milliseconds.
///
/// Strictly increasing within the process, so two entities created in the
/// same millisecond still get distinct ids.
pub fn next_entity_id() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ENTITY_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_ENTITY_ID.compare_exchange_weak(
            last,
            candidate,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return candidate,
            Err(actual) => last = actual,
        }
    }
}
