//! Reminder scheduling seam and the app's reminder payloads.
//!
//! # Responsibility
//! - Define the fire-and-forget scheduling contract the host implements
//!   over its local-notification facility.
//! - Build the fixed reminder payloads for events, savings and voice notes.
//!
//! # Invariants
//! - Scheduling is fire-and-forget: no acknowledgment, no cancellation.
//!   Reminders for entities that are later deleted still fire.
//! - Receipts are opaque; core never dereferences one.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use log::info;
use std::time::Duration;
use uuid::Uuid;

/// Opaque receipt returned by the scheduling collaborator.
pub type ReceiptId = Uuid;

const EVENT_WEEK_TITLE: &str = "Upcoming Event Reminder 📅";
const EVENT_DAY_TITLE: &str = "Event Today! 🎉";
const SAVINGS_TITLE: &str = "Savings Maturity Reminder 💰";
const VOICE_NOTE_TITLE: &str = "Voice Note Reminder 💕";
const VOICE_NOTE_BODY: &str = "Your wife will kill you if you don't listen to her voice note!";
const VOICE_NOTE_DELAY_SECS: u64 = 3600;

/// Local-notification scheduling contract.
///
/// Both triggers are fire-and-forget; the returned receipt is the only
/// trace core keeps, and nothing ever cancels a scheduled reminder.
pub trait ReminderScheduler: Send + Sync {
    /// Schedules a reminder a delay from now.
    fn schedule_after(&self, delay: Duration, title: &str, body: &str) -> ReceiptId;

    /// Schedules a reminder at an absolute local wall-clock time.
    fn schedule_at(&self, when: NaiveDateTime, title: &str, body: &str) -> ReceiptId;
}

/// Scheduler that records requests to the log only.
///
/// Used by tests and by hosts that route real scheduling natively while
/// keeping core's call sites exercised.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogScheduler;

impl ReminderScheduler for LogScheduler {
    fn schedule_after(&self, delay: Duration, title: &str, body: &str) -> ReceiptId {
        let receipt = Uuid::new_v4();
        info!(
            "event=reminder_scheduled module=reminder trigger=after delay_s={} title_chars={} body_chars={} receipt={}",
            delay.as_secs(),
            title.chars().count(),
            body.chars().count(),
            receipt
        );
        receipt
    }

    fn schedule_at(&self, when: NaiveDateTime, title: &str, body: &str) -> ReceiptId {
        let receipt = Uuid::new_v4();
        info!(
            "event=reminder_scheduled module=reminder trigger=at when={} title_chars={} body_chars={} receipt={}",
            when,
            title.chars().count(),
            body.chars().count(),
            receipt
        );
        receipt
    }
}

/// Schedules the two reminders for a new event: one week before at 06:00
/// and day-of at 06:00.
pub fn schedule_event_reminders(
    scheduler: &dyn ReminderScheduler,
    name: &str,
    date: NaiveDate,
) -> [ReceiptId; 2] {
    let week_before = date.checked_sub_days(Days::new(7)).unwrap_or(date);
    [
        scheduler.schedule_at(
            week_before.and_time(six_am()),
            EVENT_WEEK_TITLE,
            &format!("{name} is coming up in one week!"),
        ),
        scheduler.schedule_at(
            date.and_time(six_am()),
            EVENT_DAY_TITLE,
            &format!("{name} is today!"),
        ),
    ]
}

/// Schedules the maturity reminder for a new saving goal.
pub fn schedule_saving_reminder(
    scheduler: &dyn ReminderScheduler,
    purpose: &str,
    maturity: NaiveDate,
) -> ReceiptId {
    scheduler.schedule_at(
        maturity.and_time(NaiveTime::MIN),
        SAVINGS_TITLE,
        &format!("Your savings for \"{purpose}\" has reached maturity!"),
    )
}

/// Schedules the one-hour voice-note reminder.
pub fn schedule_voice_note_reminder(scheduler: &dyn ReminderScheduler) -> ReceiptId {
    scheduler.schedule_after(
        Duration::from_secs(VOICE_NOTE_DELAY_SECS),
        VOICE_NOTE_TITLE,
        VOICE_NOTE_BODY,
    )
}

fn six_am() -> NaiveTime {
    NaiveTime::from_hms_opt(6, 0, 0).unwrap_or(NaiveTime::MIN)
}
