//! Home dashboard projections.
//!
//! # Responsibility
//! - Render the clock, the relationship counter and the dashboard summaries
//!   from the state components.
//! - Attach a freshly uploaded voice note and schedule its reminder.
//!
//! # Invariants
//! - Projections are pure over their inputs; callers pass the current time
//!   so the dashboard is reproducible.
//! - The counter uses a fixed 365-day year and 30-day month; it is a
//!   display approximation, not calendar arithmetic.

use crate::model::{parse_entity_date, require, Event, FormResult, SavingGoal};
use crate::reminder::{schedule_voice_note_reminder, ReceiptId, ReminderScheduler};
use crate::state::DataState;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::info;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_DAY: i64 = 86_400;
const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 30;

/// One upcoming-event card on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEvent {
    pub name: String,
    /// Display form, `Sep 03, 2026`.
    pub date_label: String,
}

/// The wall clock as shown in the header, `HH:MM`.
pub fn clock_label(now: NaiveDateTime) -> String {
    now.format("%H:%M").to_string()
}

/// Time together since the anniversary, `YY:MM:DD:HH:MM:SS`.
///
/// Clamps to all zeros for instants before the anniversary.
pub fn relationship_counter(now: NaiveDateTime) -> String {
    let start = anniversary().and_time(NaiveTime::MIN);
    let total_secs = now.signed_duration_since(start).num_seconds().max(0);

    let days = total_secs / SECS_PER_DAY;
    let years = days / DAYS_PER_YEAR;
    let months = (days % DAYS_PER_YEAR) / DAYS_PER_MONTH;
    let day_field = (days % DAYS_PER_YEAR) % DAYS_PER_MONTH;

    let rem = total_secs % SECS_PER_DAY;
    let hours = rem / SECS_PER_HOUR;
    let minutes = (rem % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = rem % SECS_PER_MINUTE;

    format!("{years:02}:{months:02}:{day_field:02}:{hours:02}:{minutes:02}:{seconds:02}")
}

/// The first two future events by date, soonest first.
///
/// Events whose date does not parse or is not strictly after `today` are
/// skipped.
pub fn upcoming_events(events: &[Event], today: NaiveDate) -> Vec<UpcomingEvent> {
    let mut dated: Vec<(NaiveDate, &Event)> = events
        .iter()
        .filter_map(|event| {
            let date = parse_entity_date(&event.date)?;
            (date > today).then_some((date, event))
        })
        .collect();
    dated.sort_by_key(|(date, _)| *date);
    dated
        .into_iter()
        .take(2)
        .map(|(date, event)| UpcomingEvent {
            name: event.name.clone(),
            date_label: date.format("%b %d, %Y").to_string(),
        })
        .collect()
}

/// The pinned saving card, first pinned goal if any.
pub fn pinned_saving(savings: &[SavingGoal]) -> Option<&SavingGoal> {
    savings.iter().find(|goal| goal.pinned)
}

/// Stores the uploaded voice-note reference and schedules the one-hour
/// reminder. The uri is required.
pub fn attach_voice_note(
    data: &mut DataState,
    scheduler: &dyn ReminderScheduler,
    uri: &str,
) -> FormResult<ReceiptId> {
    let uri = require("voice note", uri)?.to_string();
    data.set_voice_note(Some(uri));
    let receipt = schedule_voice_note_reminder(scheduler);
    info!("event=attach_voice_note module=screens status=ok receipt={receipt}");
    Ok(receipt)
}

fn anniversary() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 9, 3).unwrap_or(NaiveDate::MIN)
}
