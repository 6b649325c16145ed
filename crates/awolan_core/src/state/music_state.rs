//! Music playback transport, catalog and upload bookkeeping.
//!
//! # Responsibility
//! - Own the playback state machine (`Idle/Loading/Playing/Paused`) and the
//!   active engine handle.
//! - Keep the catalog as built-ins plus uploads and persist the uploads.
//!
//! # Invariants
//! - Every `play_track` bumps the play session; status events carrying a
//!   stale session are discarded, so an abandoned load can never clobber
//!   the track that replaced it.
//! - Engine failures reset the transport to a safe idle state and are
//!   never surfaced to the user.
//! - On natural completion the transport auto-advances in catalog order,
//!   wrapping from the last track to the first.

use crate::model::track::builtin_tracks;
use crate::model::{next_entity_id, require, FormResult, Track};
use crate::playback::{AudioEngine, AudioHandle, PlaySession, PlaybackEvent};
use crate::store::{records, KvStore};
use log::{debug, error, info, warn};
use std::sync::Arc;

const DEFAULT_VOLUME: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Loading,
    Playing,
    Paused,
}

pub struct MusicState {
    store: Arc<KvStore>,
    engine: Arc<dyn AudioEngine>,
    uploaded: Vec<Track>,
    catalog: Vec<Track>,
    current: Option<Track>,
    handle: Option<Box<dyn AudioHandle>>,
    preloaded: Option<(String, Box<dyn AudioHandle>)>,
    playback: PlaybackState,
    volume: f64,
    session: PlaySession,
}

impl MusicState {
    /// Restores uploads from the store and rebuilds the catalog.
    ///
    /// The transport starts idle; playback begins only on `play_track` or
    /// `start_session`.
    pub fn restore(store: Arc<KvStore>, engine: Arc<dyn AudioEngine>) -> Self {
        let uploaded = records::load_uploaded_tracks(&store);
        let mut catalog = builtin_tracks();
        catalog.extend(uploaded.iter().cloned());
        Self {
            store,
            engine,
            uploaded,
            catalog,
            current: None,
            handle: None,
            preloaded: None,
            playback: PlaybackState::Idle,
            volume: DEFAULT_VOLUME,
            session: 0,
        }
    }

    /// Begins playback of the first catalog track, the app-start behavior.
    pub fn start_session(&mut self) -> PlaySession {
        let Some(first_id) = self.catalog.first().map(|track| track.id.clone()) else {
            return self.session;
        };
        self.play_track(&first_id)
    }

    /// Starts loading a track by id and returns the session that is live
    /// after the call.
    ///
    /// A catalog miss is logged and leaves the transport (and session)
    /// unchanged. On success the transport enters `Loading`; playback
    /// starts when the engine's `Loaded` event arrives for this session.
    pub fn play_track(&mut self, id: &str) -> PlaySession {
        let Some(track) = self.catalog.iter().find(|track| track.id == id).cloned() else {
            warn!("event=play_track module=music status=ignored reason=track_not_found");
            return self.session;
        };

        self.session += 1;
        self.stop_current();

        let loaded = match self.take_preloaded(&track.id) {
            Some(handle) => Ok(handle),
            None => self.engine.load(&track.uri),
        };
        let mut handle = match loaded {
            Ok(handle) => handle,
            Err(err) => {
                error!(
                    "event=play_track module=music status=error track={} error={err}",
                    track.id
                );
                self.reset_to_idle();
                return self.session;
            }
        };

        if let Err(err) = handle.set_volume(self.volume) {
            warn!(
                "event=set_volume module=music status=error track={} error={err}",
                track.id
            );
        }

        info!(
            "event=play_track module=music status=loading track={} session={}",
            track.id, self.session
        );
        self.handle = Some(handle);
        self.current = Some(track);
        self.playback = PlaybackState::Loading;
        self.preload_next();
        self.session
    }

    /// Applies one engine status event to the transport.
    ///
    /// Events for a session other than the live one are discarded; this is
    /// what keeps a late completion from an abandoned load from marking a
    /// stale track current.
    pub fn handle_event(&mut self, session: PlaySession, event: PlaybackEvent) {
        if session != self.session {
            debug!(
                "event=playback_event module=music status=discarded reason=stale_session session={session} live={}",
                self.session
            );
            return;
        }

        match event {
            PlaybackEvent::Loaded => {
                if self.playback != PlaybackState::Loading {
                    return;
                }
                let Some(handle) = self.handle.as_mut() else {
                    return;
                };
                match handle.play() {
                    Ok(()) => {
                        self.playback = PlaybackState::Playing;
                        info!(
                            "event=playback_event module=music status=playing session={session}"
                        );
                    }
                    Err(err) => {
                        error!("event=playback_event module=music status=error error={err}");
                        self.reset_to_idle();
                    }
                }
            }
            PlaybackEvent::Progress { .. } => {
                // Position is display-only; core keeps no copy of it.
            }
            PlaybackEvent::Finished => {
                let Some(next_id) = self.next_track_id() else {
                    self.reset_to_idle();
                    return;
                };
                info!(
                    "event=track_finished module=music status=advance next={next_id} session={session}"
                );
                self.play_track(&next_id);
            }
            PlaybackEvent::Error { message } => {
                error!("event=playback_event module=music status=error error={message}");
                self.reset_to_idle();
            }
        }
    }

    /// Pauses playback. No-op without a handle or when not playing.
    pub fn pause(&mut self) {
        if self.playback != PlaybackState::Playing {
            return;
        }
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        match handle.pause() {
            Ok(()) => self.playback = PlaybackState::Paused,
            Err(err) => {
                error!("event=pause module=music status=error error={err}");
                self.reset_to_idle();
            }
        }
    }

    /// Resumes paused playback. No-op without a handle or when not paused.
    pub fn resume(&mut self) {
        if self.playback != PlaybackState::Paused {
            return;
        }
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        match handle.play() {
            Ok(()) => self.playback = PlaybackState::Playing,
            Err(err) => {
                error!("event=resume module=music status=error error={err}");
                self.reset_to_idle();
            }
        }
    }

    /// Adds an uploaded track, persists the uploads list and returns the
    /// assigned `custom-<epoch-millis>` id.
    pub fn add_track(&mut self, title: &str, uri: &str) -> FormResult<String> {
        let title = require("title", title)?.to_string();
        let uri = require("uri", uri)?.to_string();

        let id = format!("custom-{}", next_entity_id());
        self.uploaded.push(Track::new(id.clone(), title, uri));
        self.rebuild_catalog();
        records::save_uploaded_tracks(&self.store, &self.uploaded);
        info!(
            "event=add_track module=music status=ok id={id} uploads={}",
            self.uploaded.len()
        );
        Ok(id)
    }

    /// Updates the target volume and applies it to the active handle.
    ///
    /// Values are clamped to `0.0..=1.0`; non-finite input is ignored.
    pub fn set_volume(&mut self, value: f64) {
        if !value.is_finite() {
            warn!("event=set_volume module=music status=ignored reason=non_finite");
            return;
        }
        let clamped = value.clamp(0.0, 1.0);
        self.volume = clamped;
        if let Some(handle) = self.handle.as_mut() {
            if let Err(err) = handle.set_volume(clamped) {
                warn!("event=set_volume module=music status=error error={err}");
            }
        }
    }

    pub fn catalog(&self) -> &[Track] {
        &self.catalog
    }

    pub fn uploaded(&self) -> &[Track] {
        &self.uploaded
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn is_playing(&self) -> bool {
        self.playback == PlaybackState::Playing
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// The live play session, the token the host must tag engine events with.
    pub fn session(&self) -> PlaySession {
        self.session
    }

    fn rebuild_catalog(&mut self) {
        self.catalog = builtin_tracks();
        self.catalog.extend(self.uploaded.iter().cloned());
    }

    fn next_track_id(&self) -> Option<String> {
        let current = self.current.as_ref()?;
        let index = self
            .catalog
            .iter()
            .position(|track| track.id == current.id)?;
        let next = &self.catalog[(index + 1) % self.catalog.len()];
        Some(next.id.clone())
    }

    fn stop_current(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            if let Err(err) = handle.stop() {
                warn!("event=stop_track module=music status=error error={err}");
            }
        }
    }

    // Best-effort speculative load of the next catalog track so the coming
    // auto-advance starts without a load gap.
    fn preload_next(&mut self) {
        self.preloaded = None;
        let Some(next_id) = self.next_track_id() else {
            return;
        };
        let Some(uri) = self
            .catalog
            .iter()
            .find(|track| track.id == next_id)
            .map(|track| track.uri.clone())
        else {
            return;
        };
        match self.engine.load(&uri) {
            Ok(handle) => self.preloaded = Some((next_id, handle)),
            Err(err) => {
                debug!("event=preload module=music status=skipped error={err}");
            }
        }
    }

    fn take_preloaded(&mut self, id: &str) -> Option<Box<dyn AudioHandle>> {
        let (preloaded_id, handle) = self.preloaded.take()?;
        if preloaded_id == id {
            return Some(handle);
        }
        None
    }

    fn reset_to_idle(&mut self) {
        self.handle = None;
        self.current = None;
        self.playback = PlaybackState::Idle;
    }
}
