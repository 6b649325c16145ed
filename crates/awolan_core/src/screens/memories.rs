//! Relationship screen: memories, partner description and the voice note.
//!
//! # Responsibility
//! - Own the persisted memories list and partner description against the
//!   records layer, the sanctioned exception to the state-component rule.
//! - Drive the bundled voice-note player over the audio-engine seam.
//! - Track the last listen date for the daily-listen reminder check.
//!
//! # Invariants
//! - Memory ids are epoch-millisecond strings assigned at creation.
//! - Voice-note events carry a session token; stale events are discarded,
//!   like the music transport.
//! - The profile picture and last-listen date are session-only.

use crate::model::{next_entity_id, require, FormResult, Memory};
use crate::playback::{AudioEngine, AudioHandle, PlaySession, PlaybackEvent};
use crate::reminder::{schedule_voice_note_reminder, ReceiptId, ReminderScheduler};
use crate::state::PlaybackState;
use crate::store::{records, KvStore};
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use std::sync::Arc;

const VOICE_NOTE_URI: &str = "asset:voicenotes/love-note.mp3";
const VOICE_NOTE_TITLE: &str = "I Love You";

/// Add-form payload for a new memory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewMemoryRequest {
    pub text: String,
    pub image: Option<String>,
    pub location: String,
    /// Stored verbatim when non-blank; otherwise today's date is used.
    pub date: String,
    pub full_details: Option<String>,
}

pub struct MemoriesScreen {
    store: Arc<KvStore>,
    engine: Arc<dyn AudioEngine>,
    memories: Vec<Memory>,
    description: String,
    profile_picture: Option<String>,
    note_handle: Option<Box<dyn AudioHandle>>,
    note_playback: PlaybackState,
    note_session: PlaySession,
    last_played_date: Option<NaiveDate>,
}

impl MemoriesScreen {
    /// Loads the memories list and partner description from the store.
    pub fn restore(store: Arc<KvStore>, engine: Arc<dyn AudioEngine>) -> Self {
        let memories = records::load_memories(&store);
        let description = records::load_description(&store);
        Self {
            store,
            engine,
            memories,
            description,
            profile_picture: None,
            note_handle: None,
            note_playback: PlaybackState::Idle,
            note_session: 0,
            last_played_date: None,
        }
    }

    /// Validates and appends a memory, returning its assigned id.
    pub fn add_memory(&mut self, request: &NewMemoryRequest, today: NaiveDate) -> FormResult<String> {
        let text = require("memory", &request.text)?.to_string();

        let id = next_entity_id().to_string();
        let date = if request.date.trim().is_empty() {
            today.format("%Y-%m-%d").to_string()
        } else {
            request.date.clone()
        };
        self.memories.push(Memory::new(
            id.clone(),
            text,
            request.image.clone(),
            request.location.clone(),
            date,
            request.full_details.clone(),
        ));
        records::save_memories(&self.store, &self.memories);
        info!(
            "event=add_memory module=screens status=ok id={id} memories={}",
            self.memories.len()
        );
        Ok(id)
    }

    /// Removes the memory with `id`. Unknown ids are ignored.
    pub fn delete_memory(&mut self, id: &str) {
        let before = self.memories.len();
        self.memories.retain(|memory| memory.id != id);
        if self.memories.len() == before {
            warn!("event=delete_memory module=screens status=ignored reason=unknown_id id={id}");
            return;
        }
        records::save_memories(&self.store, &self.memories);
        info!(
            "event=delete_memory module=screens status=ok id={id} memories={}",
            self.memories.len()
        );
    }

    pub fn memories(&self) -> &[Memory] {
        &self.memories
    }

    /// Saves the partner description. Empty text is allowed and clears it.
    pub fn set_description(&mut self, text: &str) {
        records::save_description(&self.store, text);
        self.description = text.to_string();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_profile_picture(&mut self, uri: Option<String>) {
        self.profile_picture = uri;
    }

    pub fn profile_picture(&self) -> Option<&str> {
        self.profile_picture.as_deref()
    }

    pub fn note_title(&self) -> &'static str {
        VOICE_NOTE_TITLE
    }

    /// Starts or resumes the bundled voice note and marks today as listened.
    ///
    /// Returns the session that is live after the call.
    pub fn play_note(&mut self, today: NaiveDate) -> PlaySession {
        self.last_played_date = Some(today);
        match self.note_playback {
            PlaybackState::Playing => return self.note_session,
            PlaybackState::Paused => {
                if let Some(handle) = self.note_handle.as_mut() {
                    match handle.play() {
                        Ok(()) => self.note_playback = PlaybackState::Playing,
                        Err(err) => {
                            error!("event=play_note module=screens status=error error={err}");
                            self.reset_note();
                        }
                    }
                    return self.note_session;
                }
            }
            PlaybackState::Idle | PlaybackState::Loading => {}
        }

        self.note_session += 1;
        self.drop_note_handle();
        match self.engine.load(VOICE_NOTE_URI) {
            Ok(handle) => {
                self.note_handle = Some(handle);
                self.note_playback = PlaybackState::Loading;
                info!(
                    "event=play_note module=screens status=loading session={}",
                    self.note_session
                );
            }
            Err(err) => {
                error!("event=play_note module=screens status=error error={err}");
                self.reset_note();
            }
        }
        self.note_session
    }

    /// Pauses note playback. No-op unless playing.
    pub fn pause_note(&mut self) {
        if self.note_playback != PlaybackState::Playing {
            return;
        }
        let Some(handle) = self.note_handle.as_mut() else {
            return;
        };
        match handle.pause() {
            Ok(()) => self.note_playback = PlaybackState::Paused,
            Err(err) => {
                error!("event=pause_note module=screens status=error error={err}");
                self.reset_note();
            }
        }
    }

    /// Applies one engine status event for the note player.
    pub fn handle_note_event(&mut self, session: PlaySession, event: PlaybackEvent) {
        if session != self.note_session {
            debug!(
                "event=note_event module=screens status=discarded reason=stale_session session={session} live={}",
                self.note_session
            );
            return;
        }
        match event {
            PlaybackEvent::Loaded => {
                if self.note_playback != PlaybackState::Loading {
                    return;
                }
                let Some(handle) = self.note_handle.as_mut() else {
                    return;
                };
                match handle.play() {
                    Ok(()) => self.note_playback = PlaybackState::Playing,
                    Err(err) => {
                        error!("event=note_event module=screens status=error error={err}");
                        self.reset_note();
                    }
                }
            }
            PlaybackEvent::Progress { .. } => {}
            PlaybackEvent::Finished => self.reset_note(),
            PlaybackEvent::Error { message } => {
                error!("event=note_event module=screens status=error error={message}");
                self.reset_note();
            }
        }
    }

    pub fn note_playback(&self) -> PlaybackState {
        self.note_playback
    }

    pub fn note_session(&self) -> PlaySession {
        self.note_session
    }

    pub fn last_played_date(&self) -> Option<NaiveDate> {
        self.last_played_date
    }

    /// Schedules the voice-note reminder unless the note was played today.
    pub fn check_daily_listen(
        &self,
        scheduler: &dyn ReminderScheduler,
        today: NaiveDate,
    ) -> Option<ReceiptId> {
        if self.last_played_date == Some(today) {
            return None;
        }
        Some(schedule_voice_note_reminder(scheduler))
    }

    fn drop_note_handle(&mut self) {
        if let Some(mut handle) = self.note_handle.take() {
            if let Err(err) = handle.stop() {
                warn!("event=stop_note module=screens status=error error={err}");
            }
        }
    }

    fn reset_note(&mut self) {
        self.note_handle = None;
        self.note_playback = PlaybackState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoriesScreen, NewMemoryRequest};
    use crate::model::FormError;
    use crate::playback::{NullEngine, PlaybackEvent};
    use crate::reminder::LogScheduler;
    use crate::state::PlaybackState;
    use crate::store::KvStore;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn screen() -> MemoriesScreen {
        let store = Arc::new(KvStore::open_in_memory().expect("store should open"));
        MemoriesScreen::restore(store, Arc::new(NullEngine))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).expect("test date should be valid")
    }

    #[test]
    fn add_assigns_millis_id_and_defaults_the_date() {
        let mut screen = screen();
        let request = NewMemoryRequest {
            text: "first dance".to_string(),
            ..NewMemoryRequest::default()
        };
        let id = screen.add_memory(&request, today()).expect("add should pass");

        assert!(id.parse::<i64>().is_ok(), "id should be epoch millis");
        assert_eq!(screen.memories().len(), 1);
        assert_eq!(screen.memories()[0].date, "2026-06-15");
    }

    #[test]
    fn add_requires_text() {
        let mut screen = screen();
        assert_eq!(
            screen.add_memory(&NewMemoryRequest::default(), today()),
            Err(FormError::MissingField("memory"))
        );
        assert!(screen.memories().is_empty());
    }

    #[test]
    fn delete_by_id_ignores_unknown_ids() {
        let mut screen = screen();
        let request = NewMemoryRequest {
            text: "picnic".to_string(),
            date: "2024-05-01".to_string(),
            ..NewMemoryRequest::default()
        };
        let id = screen.add_memory(&request, today()).expect("add should pass");

        screen.delete_memory("not-an-id");
        assert_eq!(screen.memories().len(), 1);

        screen.delete_memory(&id);
        assert!(screen.memories().is_empty());
    }

    #[test]
    fn description_and_memories_survive_restore() {
        let store = Arc::new(KvStore::open_in_memory().expect("store should open"));
        let mut first = MemoriesScreen::restore(Arc::clone(&store), Arc::new(NullEngine));
        first.set_description("loves sunflowers");
        let request = NewMemoryRequest {
            text: "road trip".to_string(),
            location: "coast".to_string(),
            date: "2024-08-10".to_string(),
            ..NewMemoryRequest::default()
        };
        first.add_memory(&request, today()).expect("add should pass");

        let second = MemoriesScreen::restore(store, Arc::new(NullEngine));
        assert_eq!(second.description(), "loves sunflowers");
        assert_eq!(second.memories(), first.memories());
    }

    #[test]
    fn note_player_runs_the_loading_playing_cycle() {
        let mut screen = screen();
        let session = screen.play_note(today());
        assert_eq!(screen.note_playback(), PlaybackState::Loading);

        screen.handle_note_event(session, PlaybackEvent::Loaded);
        assert_eq!(screen.note_playback(), PlaybackState::Playing);

        screen.pause_note();
        assert_eq!(screen.note_playback(), PlaybackState::Paused);

        screen.play_note(today());
        assert_eq!(screen.note_playback(), PlaybackState::Playing);

        screen.handle_note_event(session, PlaybackEvent::Finished);
        assert_eq!(screen.note_playback(), PlaybackState::Idle);
    }

    #[test]
    fn stale_note_events_are_discarded() {
        let mut screen = screen();
        let first = screen.play_note(today());
        screen.handle_note_event(first, PlaybackEvent::Finished);
        let second = screen.play_note(today());
        assert_ne!(first, second);

        screen.handle_note_event(first, PlaybackEvent::Loaded);
        assert_eq!(screen.note_playback(), PlaybackState::Loading);

        screen.handle_note_event(second, PlaybackEvent::Loaded);
        assert_eq!(screen.note_playback(), PlaybackState::Playing);
    }

    #[test]
    fn daily_listen_check_skips_only_when_played_today() {
        let mut screen = screen();
        assert!(screen.check_daily_listen(&LogScheduler, today()).is_some());

        screen.play_note(today());
        assert!(screen.check_daily_listen(&LogScheduler, today()).is_none());

        let tomorrow = today().succ_opt().expect("tomorrow should exist");
        assert!(screen.check_daily_listen(&LogScheduler, tomorrow).is_some());
    }
}
