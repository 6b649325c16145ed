//! Events screen operations.
//!
//! # Responsibility
//! - Validate the add-event form, append through the data state and
//!   schedule the event reminders.
//! - Delete events by list index.
//!
//! # Invariants
//! - Only `name` is required; date, location and image are stored verbatim.
//! - Reminders are scheduled only when the date parses; deleting an event
//!   never cancels reminders already scheduled for it.

use crate::model::{parse_entity_date, require, Event, FormResult};
use crate::reminder::{schedule_event_reminders, ReminderScheduler};
use crate::state::DataState;
use log::{info, warn};

/// Add-form payload for a new event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewEventRequest {
    pub name: String,
    pub date: String,
    pub location: String,
    pub image: Option<String>,
}

/// Validates and appends a new event, then schedules its two reminders.
pub fn submit_event(
    data: &mut DataState,
    scheduler: &dyn ReminderScheduler,
    request: &NewEventRequest,
) -> FormResult<()> {
    let name = require("name", &request.name)?.to_string();

    let mut events = data.events().to_vec();
    events.push(Event::new(
        name.clone(),
        request.date.clone(),
        request.location.clone(),
        request.image.clone(),
    ));
    data.set_events(events);

    match parse_entity_date(&request.date) {
        Some(date) => {
            schedule_event_reminders(scheduler, &name, date);
        }
        None => warn!(
            "event=submit_event module=screens status=reminders_skipped reason=unparseable_date"
        ),
    }
    info!(
        "event=submit_event module=screens status=ok events={}",
        data.events().len()
    );
    Ok(())
}

/// Removes the event at `index`. Out-of-range indexes are ignored.
pub fn delete_event(data: &mut DataState, index: usize) {
    let mut events = data.events().to_vec();
    if index >= events.len() {
        warn!(
            "event=delete_event module=screens status=ignored reason=index_out_of_range index={index} len={}",
            events.len()
        );
        return;
    }
    events.remove(index);
    data.set_events(events);
    info!(
        "event=delete_event module=screens status=ok index={index} events={}",
        data.events().len()
    );
}
