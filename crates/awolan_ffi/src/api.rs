//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the process-wide app session behind one lock.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - `init_app` must succeed before any other app call; overview calls made
//!   earlier return empty defaults, command calls return a failure envelope.
//! - The host drives audio and notifications natively; playback status comes
//!   back in through the `*_playback_event` endpoints with its session token.

use awolan_core::screens::events::{delete_event, submit_event, NewEventRequest};
use awolan_core::screens::savings::{
    delete_saving, pin_only, sorted_rows, submit_saving, toggle_pin, NewSavingRequest,
};
use awolan_core::screens::{home, settings, NewExpenseRequest, NewMemoryRequest};
use awolan_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppSession, Event, Expense, FormResult, LogScheduler, Memory, NullEngine, Palette,
    PlaybackEvent, PlaybackState, SavingGoal, Track, VideoCollection, VideoItem,
};
use chrono::{Local, NaiveDateTime};
use log::info;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

const APP_DB_FILE_NAME: &str = "awolan_app.sqlite3";
static APP_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static APP: OnceLock<Mutex<AppSession>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for command calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Created entity id, when the operation produced one.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl AppActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Response for play commands; `session` tags the engine events that belong
/// to this playback lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackResponse {
    pub ok: bool,
    pub session: u64,
    pub message: String,
}

/// Opens the app session against the store and restores all state.
///
/// Database location: explicit `db_path`, else the `AWOLAN_DB_PATH`
/// environment variable, else a file in the system temp directory.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Idempotent; later calls report success without reopening.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn init_app(db_path: Option<String>) -> AppActionResponse {
    if APP.get().is_some() {
        return AppActionResponse::success("App already initialized.", None);
    }
    let path = resolve_db_path(db_path);
    match AppSession::open(&path, Arc::new(NullEngine), Arc::new(LogScheduler)) {
        Ok(session) => {
            if APP.set(Mutex::new(session)).is_err() {
                return AppActionResponse::success("App already initialized.", None);
            }
            info!("event=init_app module=ffi status=ok");
            AppActionResponse::success("App initialized.", None)
        }
        Err(err) => AppActionResponse::failure(format!("init_app failed: {err}")),
    }
}

// ---- home ----------------------------------------------------------------

/// Home dashboard projection.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    /// Wall clock, `HH:MM`.
    pub clock: String,
    /// Relationship counter, `YY:MM:DD:HH:MM:SS`.
    pub counter: String,
    pub upcoming: Vec<UpcomingEventView>,
    pub pinned_saving: Option<SavingCardView>,
    pub voice_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEventView {
    pub name: String,
    pub date_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavingCardView {
    pub purpose: String,
    pub amount: String,
    pub goal_amount: String,
    pub progress: f64,
}

/// The home screen in one call, evaluated at the current local time.
#[flutter_rust_bridge::frb(sync)]
pub fn home_overview() -> HomeView {
    let now = local_now();
    with_app(|app| HomeView {
        clock: home::clock_label(now),
        counter: home::relationship_counter(now),
        upcoming: home::upcoming_events(app.data.events(), now.date())
            .into_iter()
            .map(|event| UpcomingEventView {
                name: event.name,
                date_label: event.date_label,
            })
            .collect(),
        pinned_saving: home::pinned_saving(app.data.savings()).map(to_saving_card),
        voice_note: app.data.voice_note().map(str::to_owned),
    })
    .unwrap_or_else(|_| HomeView {
        clock: home::clock_label(now),
        counter: home::relationship_counter(now),
        upcoming: Vec::new(),
        pinned_saving: None,
        voice_note: None,
    })
}

/// Stores an uploaded voice-note reference and schedules the one-hour
/// reminder.
///
/// # FFI contract
/// - Sync call; never panics.
/// - Returns the reminder receipt id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn attach_voice_note(uri: String) -> AppActionResponse {
    form_action(
        with_app(|app| {
            home::attach_voice_note(&mut app.data, app.scheduler.as_ref(), &uri)
                .map(|receipt| Some(receipt.to_string()))
        }),
        "Voice note attached.",
    )
}

/// Schedules the voice-note reminder unless the note was played today.
#[flutter_rust_bridge::frb(sync)]
pub fn check_daily_listen() -> AppActionResponse {
    let today = local_now().date();
    match with_app(|app| {
        app.memories
            .check_daily_listen(app.scheduler.as_ref(), today)
            .map(|receipt| receipt.to_string())
    }) {
        Ok(Some(receipt)) => {
            AppActionResponse::success("Voice note reminder scheduled.", Some(receipt))
        }
        Ok(None) => AppActionResponse::success("Voice note already played today.", None),
        Err(err) => AppActionResponse::failure(err),
    }
}

// ---- events --------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventView {
    pub name: String,
    pub date: String,
    pub location: String,
    pub image: Option<String>,
}

#[flutter_rust_bridge::frb(sync)]
pub fn events_overview() -> Vec<EventView> {
    with_app(|app| app.data.events().iter().map(to_event_view).collect()).unwrap_or_default()
}

/// Adds an event and schedules its reminders when the date parses.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; validation failures come back in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn add_event(
    name: String,
    date: String,
    location: String,
    image: Option<String>,
) -> AppActionResponse {
    let request = NewEventRequest {
        name,
        date,
        location,
        image,
    };
    form_action(
        with_app(|app| {
            submit_event(&mut app.data, app.scheduler.as_ref(), &request).map(|()| None)
        }),
        "Event added.",
    )
}

/// Removes the event at `index`; out-of-range indexes are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_event(index: u32) -> AppActionResponse {
    plain_action(
        with_app(|app| delete_event(&mut app.data, index as usize)),
        "Event removed.",
    )
}

// ---- savings -------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SavingRowView {
    /// Index into the authoritative list; the handle for row commands.
    pub index: u32,
    pub purpose: String,
    pub amount: String,
    pub goal_amount: String,
    pub maturity_date: String,
    pub pinned: bool,
    pub progress: f64,
}

/// Savings rows, pinned first.
#[flutter_rust_bridge::frb(sync)]
pub fn savings_overview() -> Vec<SavingRowView> {
    with_app(|app| {
        sorted_rows(&app.data)
            .into_iter()
            .map(|row| SavingRowView {
                index: row.index as u32,
                purpose: row.goal.purpose,
                amount: row.goal.amount,
                goal_amount: row.goal.goal_amount,
                maturity_date: row.goal.maturity_date,
                pinned: row.goal.pinned,
                progress: row.goal.progress,
            })
            .collect()
    })
    .unwrap_or_default()
}

/// Adds a saving goal and schedules the maturity reminder.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; validation failures come back in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn add_saving(
    purpose: String,
    amount: String,
    goal_amount: String,
    maturity_date: String,
    pinned: bool,
) -> AppActionResponse {
    let request = NewSavingRequest {
        purpose,
        amount,
        goal_amount,
        maturity_date,
        pinned,
    };
    form_action(
        with_app(|app| {
            submit_saving(&mut app.data, app.scheduler.as_ref(), &request).map(|()| None)
        }),
        "Saving goal added.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn remove_saving(index: u32) -> AppActionResponse {
    plain_action(
        with_app(|app| delete_saving(&mut app.data, index as usize)),
        "Saving goal removed.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn toggle_saving_pin(index: u32) -> AppActionResponse {
    plain_action(
        with_app(|app| toggle_pin(&mut app.data, index as usize)),
        "Pin toggled.",
    )
}

/// Pins one goal and unpins all others.
#[flutter_rust_bridge::frb(sync)]
pub fn pin_saving_only(index: u32) -> AppActionResponse {
    plain_action(
        with_app(|app| pin_only(&mut app.data, index as usize)),
        "Goal pinned.",
    )
}

// ---- expenses ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseView {
    pub name: String,
    pub amount: String,
    pub category: String,
    pub place: String,
}

#[flutter_rust_bridge::frb(sync)]
pub fn expenses_overview() -> Vec<ExpenseView> {
    with_app(|app| app.expenses.rows().iter().map(to_expense_view).collect()).unwrap_or_default()
}

/// Adds a session-only expense row.
#[flutter_rust_bridge::frb(sync)]
pub fn add_expense(
    name: String,
    amount: String,
    category: String,
    place: String,
) -> AppActionResponse {
    let request = NewExpenseRequest {
        name,
        amount,
        category,
        place,
    };
    form_action(
        with_app(|app| app.expenses.add_expense(&request).map(|()| None)),
        "Expense added.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn remove_expense(index: u32) -> AppActionResponse {
    plain_action(
        with_app(|app| app.expenses.delete_expense(index as usize)),
        "Expense removed.",
    )
}

// ---- memories ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryView {
    pub id: String,
    pub text: String,
    pub image: Option<String>,
    pub location: String,
    pub date: String,
    pub full_details: Option<String>,
}

/// The relationship screen in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoriesView {
    pub memories: Vec<MemoryView>,
    pub description: String,
    pub profile_picture: Option<String>,
    pub note_title: String,
    /// `idle|loading|playing|paused`.
    pub note_playback: String,
    pub note_session: u64,
}

#[flutter_rust_bridge::frb(sync)]
pub fn memories_overview() -> MemoriesView {
    with_app(|app| MemoriesView {
        memories: app.memories.memories().iter().map(to_memory_view).collect(),
        description: app.memories.description().to_string(),
        profile_picture: app.memories.profile_picture().map(str::to_owned),
        note_title: app.memories.note_title().to_string(),
        note_playback: playback_label(app.memories.note_playback()).to_string(),
        note_session: app.memories.note_session(),
    })
    .unwrap_or_else(|_| MemoriesView {
        memories: Vec::new(),
        description: String::new(),
        profile_picture: None,
        note_title: String::new(),
        note_playback: playback_label(PlaybackState::Idle).to_string(),
        note_session: 0,
    })
}

/// Adds a memory; a blank date falls back to today.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns the created memory id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn add_memory(
    text: String,
    image: Option<String>,
    location: String,
    date: String,
    full_details: Option<String>,
) -> AppActionResponse {
    let today = local_now().date();
    let request = NewMemoryRequest {
        text,
        image,
        location,
        date,
        full_details,
    };
    form_action(
        with_app(|app| app.memories.add_memory(&request, today).map(Some)),
        "Memory added.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn remove_memory(id: String) -> AppActionResponse {
    plain_action(
        with_app(|app| app.memories.delete_memory(&id)),
        "Memory removed.",
    )
}

/// Saves the partner description; empty text clears it.
#[flutter_rust_bridge::frb(sync)]
pub fn set_partner_description(text: String) -> AppActionResponse {
    plain_action(
        with_app(|app| app.memories.set_description(&text)),
        "Description saved.",
    )
}

/// Sets the session-only profile picture reference.
#[flutter_rust_bridge::frb(sync)]
pub fn set_profile_picture(uri: Option<String>) -> AppActionResponse {
    plain_action(
        with_app(|app| app.memories.set_profile_picture(uri)),
        "Profile picture set.",
    )
}

/// Starts or resumes the bundled voice note.
#[flutter_rust_bridge::frb(sync)]
pub fn play_voice_note() -> PlaybackResponse {
    let today = local_now().date();
    playback_response(with_app(|app| app.memories.play_note(today)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn pause_voice_note() -> AppActionResponse {
    plain_action(with_app(|app| app.memories.pause_note()), "Note paused.")
}

/// Feeds one engine status event into the voice-note player.
///
/// `kind` is one of `loaded|progress|finished|error`; events with a stale
/// `session` are discarded.
#[flutter_rust_bridge::frb(sync)]
pub fn voice_note_event(
    session: u64,
    kind: String,
    position_ms: Option<u64>,
    message: Option<String>,
) -> AppActionResponse {
    let Some(event) = decode_playback_event(&kind, position_ms, message) else {
        return AppActionResponse::failure(format!("unknown playback event kind: {kind}"));
    };
    plain_action(
        with_app(|app| app.memories.handle_note_event(session, event)),
        "Event applied.",
    )
}

// ---- music ---------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackView {
    pub id: String,
    pub title: String,
    pub uri: String,
    pub is_builtin: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MusicView {
    pub tracks: Vec<TrackView>,
    pub current_id: Option<String>,
    /// `idle|loading|playing|paused`.
    pub playback: String,
    pub volume: f64,
    pub session: u64,
}

#[flutter_rust_bridge::frb(sync)]
pub fn music_overview() -> MusicView {
    with_app(|app| MusicView {
        tracks: app.music.catalog().iter().map(to_track_view).collect(),
        current_id: app.music.current_track().map(|track| track.id.clone()),
        playback: playback_label(app.music.playback()).to_string(),
        volume: app.music.volume(),
        session: app.music.session(),
    })
    .unwrap_or_else(|_| MusicView {
        tracks: Vec::new(),
        current_id: None,
        playback: playback_label(PlaybackState::Idle).to_string(),
        volume: 0.0,
        session: 0,
    })
}

/// Begins playback of the first catalog track, the app-start behavior.
#[flutter_rust_bridge::frb(sync)]
pub fn start_music_session() -> PlaybackResponse {
    playback_response(with_app(|app| app.music.start_session()))
}

/// Starts loading a catalog track; playback begins on its `loaded` event.
///
/// # FFI contract
/// - Sync call; never panics.
/// - Returns the live session token to tag engine events with.
#[flutter_rust_bridge::frb(sync)]
pub fn play_track(id: String) -> PlaybackResponse {
    playback_response(with_app(|app| app.music.play_track(&id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn pause_music() -> AppActionResponse {
    plain_action(with_app(|app| app.music.pause()), "Playback paused.")
}

#[flutter_rust_bridge::frb(sync)]
pub fn resume_music() -> AppActionResponse {
    plain_action(with_app(|app| app.music.resume()), "Playback resumed.")
}

/// Sets the target volume, clamped to `0.0..=1.0`.
#[flutter_rust_bridge::frb(sync)]
pub fn set_music_volume(volume: f64) -> AppActionResponse {
    plain_action(with_app(|app| app.music.set_volume(volume)), "Volume set.")
}

/// Adds a track by explicit title and uri.
#[flutter_rust_bridge::frb(sync)]
pub fn add_music_track(title: String, uri: String) -> AppActionResponse {
    form_action(
        with_app(|app| app.music.add_track(&title, &uri).map(Some)),
        "Track added.",
    )
}

/// Adds a picked audio file, deriving the title from its file name.
#[flutter_rust_bridge::frb(sync)]
pub fn upload_music_file(file_name: String, uri: String) -> AppActionResponse {
    form_action(
        with_app(|app| settings::upload_track(&mut app.music, &file_name, &uri).map(Some)),
        "Track uploaded.",
    )
}

/// Feeds one engine status event into the music transport.
///
/// `kind` is one of `loaded|progress|finished|error`; events with a stale
/// `session` are discarded.
#[flutter_rust_bridge::frb(sync)]
pub fn music_playback_event(
    session: u64,
    kind: String,
    position_ms: Option<u64>,
    message: Option<String>,
) -> AppActionResponse {
    let Some(event) = decode_playback_event(&kind, position_ms, message) else {
        return AppActionResponse::failure(format!("unknown playback event kind: {kind}"));
    };
    plain_action(
        with_app(|app| app.music.handle_event(session, event)),
        "Event applied.",
    )
}

// ---- settings ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeOptionView {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteView {
    pub background: String,
    pub text: String,
    pub text_secondary: String,
    pub card_background: String,
    pub accent: String,
    pub border_color: String,
    pub button_secondary: String,
    pub input_background: String,
    pub font_family: String,
    pub frame_color: String,
    pub blur_tint: String,
}

/// The settings screen in one call.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsView {
    pub themes: Vec<ThemeOptionView>,
    pub active_theme: String,
    pub palette: PaletteView,
    pub wallpapers: Vec<String>,
    pub wallpaper: Option<String>,
    pub volume: f64,
}

#[flutter_rust_bridge::frb(sync)]
pub fn settings_overview() -> SettingsView {
    with_app(|app| SettingsView {
        themes: theme_option_views(),
        active_theme: app.theme.current().id().to_string(),
        palette: to_palette_view(&app.theme.palette()),
        wallpapers: wallpaper_views(),
        wallpaper: app.wallpaper.wallpaper().map(str::to_owned),
        volume: app.music.volume(),
    })
    .unwrap_or_else(|_| SettingsView {
        themes: theme_option_views(),
        active_theme: "default".to_string(),
        palette: to_palette_view(&awolan_core::ThemeName::Default.palette()),
        wallpapers: wallpaper_views(),
        wallpaper: None,
        volume: 0.0,
    })
}

/// Applies and persists a theme; unknown ids are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn select_theme(id: String) -> AppActionResponse {
    plain_action(
        with_app(|app| app.theme.select_theme(&id)),
        "Theme selected.",
    )
}

/// Sets and persists the wallpaper; `None` restores the theme background.
#[flutter_rust_bridge::frb(sync)]
pub fn set_wallpaper(reference: Option<String>) -> AppActionResponse {
    plain_action(
        with_app(|app| app.wallpaper.set_wallpaper(reference)),
        "Wallpaper set.",
    )
}

// ---- videos --------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoView {
    pub id: String,
    pub uri: String,
    pub thumbnail: Option<String>,
    pub details: String,
    pub location: String,
    pub date: String,
}

/// Rows of one collection; `collection` is `memories` or `goals`.
#[flutter_rust_bridge::frb(sync)]
pub fn videos_overview(collection: String) -> Vec<VideoView> {
    let Some(collection) = decode_collection(&collection) else {
        return Vec::new();
    };
    with_app(|app| app.videos.rows(collection).iter().map(to_video_view).collect())
        .unwrap_or_default()
}

/// Stages a picked video for the save dialog.
#[flutter_rust_bridge::frb(sync)]
pub fn stage_video(uri: String, thumbnail: Option<String>) -> AppActionResponse {
    form_action(
        with_app(|app| app.videos.stage_video(&uri, thumbnail).map(|()| None)),
        "Video staged.",
    )
}

/// Saves the staged video into a collection; a blank date falls back to
/// today. Returns the created video id.
#[flutter_rust_bridge::frb(sync)]
pub fn save_staged_video(
    collection: String,
    details: String,
    location: String,
    date: String,
) -> AppActionResponse {
    let Some(collection) = decode_collection(&collection) else {
        return AppActionResponse::failure(format!("unknown video collection: {collection}"));
    };
    let today = local_now().date();
    form_action(
        with_app(|app| {
            app.videos
                .save_staged(collection, &details, &location, &date, today)
                .map(Some)
        }),
        "Video saved.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn discard_staged_video() -> AppActionResponse {
    plain_action(
        with_app(|app| app.videos.discard_staged()),
        "Staged video discarded.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn remove_video(collection: String, id: String) -> AppActionResponse {
    let Some(collection) = decode_collection(&collection) else {
        return AppActionResponse::failure(format!("unknown video collection: {collection}"));
    };
    plain_action(
        with_app(|app| app.videos.delete_video(collection, &id)),
        "Video removed.",
    )
}

// ---- plumbing ------------------------------------------------------------

fn with_app<T>(f: impl FnOnce(&mut AppSession) -> T) -> Result<T, String> {
    let app = APP
        .get()
        .ok_or_else(|| "app not initialized; call init_app first".to_string())?;
    let mut guard = app
        .lock()
        .map_err(|_| "app session lock poisoned".to_string())?;
    Ok(f(&mut guard))
}

fn form_action(
    result: Result<FormResult<Option<String>>, String>,
    message: &str,
) -> AppActionResponse {
    match result {
        Ok(Ok(id)) => AppActionResponse::success(message, id),
        Ok(Err(err)) => AppActionResponse::failure(err.to_string()),
        Err(err) => AppActionResponse::failure(err),
    }
}

fn plain_action(result: Result<(), String>, message: &str) -> AppActionResponse {
    match result {
        Ok(()) => AppActionResponse::success(message, None),
        Err(err) => AppActionResponse::failure(err),
    }
}

fn playback_response(result: Result<u64, String>) -> PlaybackResponse {
    match result {
        Ok(session) => PlaybackResponse {
            ok: true,
            session,
            message: String::new(),
        },
        Err(err) => PlaybackResponse {
            ok: false,
            session: 0,
            message: err,
        },
    }
}

fn resolve_db_path(explicit: Option<String>) -> PathBuf {
    APP_DB_PATH
        .get_or_init(|| {
            if let Some(path) = explicit {
                let trimmed = path.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            if let Ok(raw) = std::env::var("AWOLAN_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(APP_DB_FILE_NAME)
        })
        .clone()
}

fn decode_playback_event(
    kind: &str,
    position_ms: Option<u64>,
    message: Option<String>,
) -> Option<PlaybackEvent> {
    match kind {
        "loaded" => Some(PlaybackEvent::Loaded),
        "progress" => Some(PlaybackEvent::Progress {
            position_ms: position_ms.unwrap_or(0),
        }),
        "finished" => Some(PlaybackEvent::Finished),
        "error" => Some(PlaybackEvent::Error {
            message: message.unwrap_or_default(),
        }),
        _ => None,
    }
}

fn decode_collection(raw: &str) -> Option<VideoCollection> {
    match raw {
        "memories" => Some(VideoCollection::Memories),
        "goals" => Some(VideoCollection::Goals),
        _ => None,
    }
}

fn playback_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "idle",
        PlaybackState::Loading => "loading",
        PlaybackState::Playing => "playing",
        PlaybackState::Paused => "paused",
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn to_event_view(event: &Event) -> EventView {
    EventView {
        name: event.name.clone(),
        date: event.date.clone(),
        location: event.location.clone(),
        image: event.image.clone(),
    }
}

fn to_saving_card(goal: &SavingGoal) -> SavingCardView {
    SavingCardView {
        purpose: goal.purpose.clone(),
        amount: goal.amount.clone(),
        goal_amount: goal.goal_amount.clone(),
        progress: goal.progress,
    }
}

fn to_expense_view(expense: &Expense) -> ExpenseView {
    ExpenseView {
        name: expense.name.clone(),
        amount: expense.amount.clone(),
        category: expense.category.clone(),
        place: expense.place.clone(),
    }
}

fn to_memory_view(memory: &Memory) -> MemoryView {
    MemoryView {
        id: memory.id.clone(),
        text: memory.text.clone(),
        image: memory.image.clone(),
        location: memory.location.clone(),
        date: memory.date.clone(),
        full_details: memory.full_details.clone(),
    }
}

fn to_track_view(track: &Track) -> TrackView {
    TrackView {
        id: track.id.clone(),
        title: track.title.clone(),
        uri: track.uri.clone(),
        is_builtin: track.is_builtin(),
    }
}

fn to_video_view(item: &VideoItem) -> VideoView {
    VideoView {
        id: item.id.clone(),
        uri: item.uri.clone(),
        thumbnail: item.thumbnail.clone(),
        details: item.details.clone(),
        location: item.location.clone(),
        date: item.date.clone(),
    }
}

fn theme_option_views() -> Vec<ThemeOptionView> {
    settings::theme_options()
        .into_iter()
        .map(|option| ThemeOptionView {
            id: option.id.to_string(),
            label: option.label.to_string(),
        })
        .collect()
}

fn wallpaper_views() -> Vec<String> {
    settings::wallpaper_options()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn to_palette_view(palette: &Palette) -> PaletteView {
    PaletteView {
        background: palette.background.to_string(),
        text: palette.text.to_string(),
        text_secondary: palette.text_secondary.to_string(),
        card_background: palette.card_background.to_string(),
        accent: palette.accent.to_string(),
        border_color: palette.border_color.to_string(),
        button_secondary: palette.button_secondary.to_string(),
        input_background: palette.input_background.to_string(),
        font_family: palette.font_family.to_string(),
        frame_color: palette.frame_color.to_string(),
        blur_tint: palette.blur_tint.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        add_event, add_memory, add_saving, core_version, events_overview, init_app, init_logging,
        memories_overview, music_overview, music_playback_event, pause_music, ping, play_track,
        remove_event, remove_memory, resolve_db_path, save_staged_video, select_theme,
        set_wallpaper, settings_overview, stage_video, videos_overview,
    };
    use awolan_core::db::open_db;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn commands_before_init_fail_without_panicking() {
        // Do not call ensure_app here; a parallel test may already have,
        // in which case the command succeeds instead.
        let response = add_event(
            unique_token("early"),
            String::new(),
            String::new(),
            None,
        );
        if !response.ok {
            assert!(response.message.contains("init_app"));
        }
    }

    #[test]
    fn add_event_appends_and_persists_through_the_kv_table() {
        ensure_app();
        let name = unique_token("event");

        let response = add_event(name.clone(), "2030-01-01".to_string(), String::new(), None);
        assert!(response.ok, "{}", response.message);
        assert!(events_overview().iter().any(|event| event.name == name));

        let conn = open_db(resolve_db_path(None)).expect("open db");
        let raw: String = conn
            .query_row(
                "SELECT value FROM kv WHERE key = '@awolan_events'",
                [],
                |row| row.get(0),
            )
            .expect("query events value");
        assert!(raw.contains(&name));
    }

    #[test]
    fn remove_event_deletes_the_added_row() {
        ensure_app();
        let name = unique_token("event-remove");
        let added = add_event(name.clone(), String::new(), String::new(), None);
        assert!(added.ok, "{}", added.message);

        let index = events_overview()
            .iter()
            .position(|event| event.name == name)
            .expect("added event should be listed");
        let removed = remove_event(index as u32);
        assert!(removed.ok, "{}", removed.message);
        assert!(events_overview().iter().all(|event| event.name != name));
    }

    #[test]
    fn add_saving_validates_required_fields() {
        ensure_app();
        let rejected = add_saving(
            String::new(),
            "100".to_string(),
            "500".to_string(),
            "2030-06-01".to_string(),
            false,
        );
        assert!(!rejected.ok);
        assert!(rejected.message.contains("purpose"));
    }

    #[test]
    fn theme_and_wallpaper_flow() {
        ensure_app();
        let selected = select_theme("deepSpace".to_string());
        assert!(selected.ok, "{}", selected.message);

        let wallpapered = set_wallpaper(Some("wallpaper4".to_string()));
        assert!(wallpapered.ok, "{}", wallpapered.message);

        let view = settings_overview();
        assert_eq!(view.active_theme, "deepSpace");
        assert_eq!(view.wallpaper.as_deref(), Some("wallpaper4"));
        assert_eq!(view.themes.len(), 5);
        assert_eq!(view.wallpapers.len(), 5);
    }

    #[test]
    fn music_flow_loads_then_plays_on_its_event() {
        ensure_app();
        let started = play_track("default-3".to_string());
        assert!(started.ok, "{}", started.message);

        let applied = music_playback_event(started.session, "loaded".to_string(), None, None);
        assert!(applied.ok, "{}", applied.message);

        let view = music_overview();
        assert_eq!(view.current_id.as_deref(), Some("default-3"));
        assert_eq!(view.playback, "playing");
        assert!(view.tracks.len() >= 5);

        let paused = pause_music();
        assert!(paused.ok, "{}", paused.message);
        assert_eq!(music_overview().playback, "paused");
    }

    #[test]
    fn unknown_playback_event_kind_is_rejected() {
        ensure_app();
        let response = music_playback_event(0, "rewound".to_string(), None, None);
        assert!(!response.ok);
        assert!(response.message.contains("rewound"));
    }

    #[test]
    fn memory_roundtrip_through_the_envelope() {
        ensure_app();
        let text = unique_token("memory");
        let added = add_memory(text.clone(), None, String::new(), String::new(), None);
        assert!(added.ok, "{}", added.message);
        let id = added.id.expect("created memory should return an id");

        assert!(memories_overview()
            .memories
            .iter()
            .any(|memory| memory.id == id && memory.text == text));

        let removed = remove_memory(id.clone());
        assert!(removed.ok, "{}", removed.message);
        assert!(memories_overview()
            .memories
            .iter()
            .all(|memory| memory.id != id));
    }

    #[test]
    fn staged_video_save_flow() {
        ensure_app();
        let staged = stage_video("/videos/test.mp4".to_string(), None);
        assert!(staged.ok, "{}", staged.message);

        let saved = save_staged_video(
            "goals".to_string(),
            "dream house".to_string(),
            String::new(),
            String::new(),
        );
        assert!(saved.ok, "{}", saved.message);
        let id = saved.id.expect("saved video should return an id");
        assert!(videos_overview("goals".to_string())
            .iter()
            .any(|video| video.id == id));

        let rejected = save_staged_video(
            "albums".to_string(),
            String::new(),
            String::new(),
            String::new(),
        );
        assert!(!rejected.ok);
    }

    fn ensure_app() {
        let response = init_app(None);
        assert!(response.ok, "{}", response.message);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
