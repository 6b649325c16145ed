use awolan_core::screens::events::{delete_event, submit_event, NewEventRequest};
use awolan_core::screens::savings::{pin_only, sorted_rows, submit_saving, NewSavingRequest};
use awolan_core::screens::{home, settings, NewExpenseRequest, NewMemoryRequest};
use awolan_core::{
    AppSession, NullEngine, PlaybackEvent, PlaybackState, ReceiptId, ReminderScheduler,
    VideoCollection,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// Scheduler that records which reminders were requested.
#[derive(Default)]
struct CountingScheduler {
    titles: Mutex<Vec<String>>,
}

impl CountingScheduler {
    fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }

    fn count(&self) -> usize {
        self.titles.lock().unwrap().len()
    }
}

impl ReminderScheduler for CountingScheduler {
    fn schedule_after(&self, _delay: Duration, title: &str, _body: &str) -> ReceiptId {
        self.titles.lock().unwrap().push(title.to_string());
        Uuid::new_v4()
    }

    fn schedule_at(&self, _when: NaiveDateTime, title: &str, _body: &str) -> ReceiptId {
        self.titles.lock().unwrap().push(title.to_string());
        Uuid::new_v4()
    }
}

fn session_with_counter() -> (AppSession, Arc<CountingScheduler>) {
    let scheduler = Arc::new(CountingScheduler::default());
    let session = AppSession::open_in_memory(Arc::new(NullEngine), scheduler.clone()).unwrap();
    (session, scheduler)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
}

#[test]
fn event_submission_schedules_two_reminders_that_outlive_the_event() {
    let (mut session, scheduler) = session_with_counter();

    let request = NewEventRequest {
        name: "Anniversary".to_string(),
        date: "2026-09-03".to_string(),
        location: "Home".to_string(),
        image: None,
    };
    submit_event(&mut session.data, session.scheduler.as_ref(), &request).unwrap();

    assert_eq!(session.data.events().len(), 1);
    let titles = scheduler.titles();
    assert_eq!(titles.len(), 2);
    assert!(titles[0].contains("Upcoming Event"));
    assert!(titles[1].contains("Event Today"));

    // Deleting the event does not cancel what was already scheduled.
    delete_event(&mut session.data, 0);
    assert!(session.data.events().is_empty());
    assert_eq!(scheduler.count(), 2);
}

#[test]
fn unparseable_event_date_stores_the_event_but_skips_reminders() {
    let (mut session, scheduler) = session_with_counter();

    let request = NewEventRequest {
        name: "Road trip".to_string(),
        date: "sometime in summer".to_string(),
        ..NewEventRequest::default()
    };
    submit_event(&mut session.data, session.scheduler.as_ref(), &request).unwrap();

    assert_eq!(session.data.events().len(), 1);
    assert_eq!(session.data.events()[0].date, "sometime in summer");
    assert_eq!(scheduler.count(), 0);
}

#[test]
fn saving_submission_schedules_the_maturity_reminder() {
    let (mut session, scheduler) = session_with_counter();

    let request = NewSavingRequest {
        purpose: "Trip".to_string(),
        amount: "1000".to_string(),
        goal_amount: "5000".to_string(),
        maturity_date: "2026-12-01".to_string(),
        pinned: false,
    };
    submit_saving(&mut session.data, session.scheduler.as_ref(), &request).unwrap();

    assert!((session.data.savings()[0].progress - 0.2).abs() < f64::EPSILON);
    assert_eq!(scheduler.count(), 1);
    assert!(scheduler.titles()[0].contains("Savings Maturity"));
}

#[test]
fn pinned_goal_leads_both_the_rows_and_the_home_card() {
    let (mut session, _scheduler) = session_with_counter();

    for purpose in ["first", "second", "third"] {
        let request = NewSavingRequest {
            purpose: purpose.to_string(),
            amount: "10".to_string(),
            goal_amount: "100".to_string(),
            maturity_date: "2026-12-01".to_string(),
            pinned: false,
        };
        submit_saving(&mut session.data, session.scheduler.as_ref(), &request).unwrap();
    }

    pin_only(&mut session.data, 2);

    let rows = sorted_rows(&session.data);
    assert_eq!(rows[0].goal.purpose, "third");
    assert_eq!(rows[0].index, 2);
    assert_eq!(
        home::pinned_saving(session.data.savings()).map(|g| g.purpose.as_str()),
        Some("third")
    );
}

#[test]
fn home_dashboard_composes_from_the_data_state() {
    let (mut session, scheduler) = session_with_counter();

    for (name, date) in [
        ("Far", "2026-12-24"),
        ("Near", "2026-06-16"),
        ("Past", "2026-01-01"),
    ] {
        let request = NewEventRequest {
            name: name.to_string(),
            date: date.to_string(),
            ..NewEventRequest::default()
        };
        submit_event(&mut session.data, session.scheduler.as_ref(), &request).unwrap();
    }
    let reminders_so_far = scheduler.count();

    let upcoming = home::upcoming_events(session.data.events(), today());
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0].name, "Near");
    assert_eq!(upcoming[0].date_label, "Jun 16, 2026");

    home::attach_voice_note(
        &mut session.data,
        session.scheduler.as_ref(),
        "/cache/note.m4a",
    )
    .unwrap();
    assert_eq!(session.data.voice_note(), Some("/cache/note.m4a"));
    assert_eq!(scheduler.count(), reminders_so_far + 1);
    assert!(scheduler.titles().last().unwrap().contains("Voice Note"));
}

#[test]
fn memories_crud_and_the_daily_listen_check() {
    let (mut session, scheduler) = session_with_counter();

    let request = NewMemoryRequest {
        text: "first dance".to_string(),
        location: "kitchen".to_string(),
        ..NewMemoryRequest::default()
    };
    let id = session.memories.add_memory(&request, today()).unwrap();
    assert_eq!(session.memories.memories().len(), 1);

    // Not played today: the check schedules a reminder.
    assert!(session
        .memories
        .check_daily_listen(session.scheduler.as_ref(), today())
        .is_some());
    assert_eq!(scheduler.count(), 1);

    let note_session = session.memories.play_note(today());
    session
        .memories
        .handle_note_event(note_session, PlaybackEvent::Loaded);
    assert_eq!(session.memories.note_playback(), PlaybackState::Playing);

    assert!(session
        .memories
        .check_daily_listen(session.scheduler.as_ref(), today())
        .is_none());
    assert_eq!(scheduler.count(), 1);

    session.memories.delete_memory(&id);
    assert!(session.memories.memories().is_empty());
}

#[test]
fn settings_upload_turns_a_file_into_a_catalog_track() {
    let (mut session, _scheduler) = session_with_counter();

    let id = settings::upload_track(
        &mut session.music,
        "Slow Waltz.mp3",
        "/files/slow_waltz.mp3",
    )
    .unwrap();

    assert!(id.starts_with("custom-"));
    assert_eq!(session.music.catalog().len(), 6);
    let track = session.music.catalog().last().unwrap();
    assert_eq!(track.title, "Slow Waltz");
}

#[test]
fn expenses_and_videos_stay_session_only_while_events_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("awolan.db");
    let scheduler = Arc::new(CountingScheduler::default());

    let mut session =
        AppSession::open(&path, Arc::new(NullEngine), scheduler.clone()).unwrap();
    let request = NewEventRequest {
        name: "Dinner".to_string(),
        date: "2026-02-14".to_string(),
        ..NewEventRequest::default()
    };
    submit_event(&mut session.data, session.scheduler.as_ref(), &request).unwrap();
    session
        .expenses
        .add_expense(&NewExpenseRequest {
            name: "flowers".to_string(),
            ..NewExpenseRequest::default()
        })
        .unwrap();
    session.videos.stage_video("/videos/a.mp4", None).unwrap();
    session
        .videos
        .save_staged(VideoCollection::Memories, "beach", "", "", today())
        .unwrap();
    drop(session);

    let reopened = AppSession::open(&path, Arc::new(NullEngine), scheduler).unwrap();
    assert_eq!(reopened.data.events().len(), 1);
    assert!(reopened.expenses.rows().is_empty());
    assert!(reopened.videos.rows(VideoCollection::Memories).is_empty());
}
