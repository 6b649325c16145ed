//! App session root: one store, shared state components, screen state.
//!
//! # Responsibility
//! - Open the store once and hand its shared handle to every component.
//! - Carry the external collaborator seams (audio engine, reminder
//!   scheduler) chosen by the host.
//!
//! # Invariants
//! - All components observe the same store for the life of the session.
//! - Components are plain fields so callers can borrow them disjointly,
//!   e.g. the data state mutably alongside the scheduler.

use crate::playback::AudioEngine;
use crate::reminder::ReminderScheduler;
use crate::screens::{ExpensesScreen, MemoriesScreen, VideosScreen};
use crate::state::{DataState, MusicState, ThemeState, WallpaperState};
use crate::store::{KvStore, StoreResult};
use log::info;
use std::path::Path;
use std::sync::Arc;

pub struct AppSession {
    pub theme: ThemeState,
    pub wallpaper: WallpaperState,
    pub data: DataState,
    pub music: MusicState,
    pub expenses: ExpensesScreen,
    pub memories: MemoriesScreen,
    pub videos: VideosScreen,
    pub scheduler: Arc<dyn ReminderScheduler>,
}

impl AppSession {
    /// Opens the store at `path` and restores every component from it.
    pub fn open(
        path: impl AsRef<Path>,
        engine: Arc<dyn AudioEngine>,
        scheduler: Arc<dyn ReminderScheduler>,
    ) -> StoreResult<Self> {
        let store = Arc::new(KvStore::open(path)?);
        Ok(Self::from_store(store, engine, scheduler))
    }

    /// In-memory session for tests and smoke runs; nothing survives drop.
    pub fn open_in_memory(
        engine: Arc<dyn AudioEngine>,
        scheduler: Arc<dyn ReminderScheduler>,
    ) -> StoreResult<Self> {
        let store = Arc::new(KvStore::open_in_memory()?);
        Ok(Self::from_store(store, engine, scheduler))
    }

    fn from_store(
        store: Arc<KvStore>,
        engine: Arc<dyn AudioEngine>,
        scheduler: Arc<dyn ReminderScheduler>,
    ) -> Self {
        let session = Self {
            theme: ThemeState::restore(Arc::clone(&store)),
            wallpaper: WallpaperState::restore(Arc::clone(&store)),
            data: DataState::restore(Arc::clone(&store)),
            music: MusicState::restore(Arc::clone(&store), Arc::clone(&engine)),
            expenses: ExpensesScreen::new(),
            memories: MemoriesScreen::restore(store, engine),
            videos: VideosScreen::new(),
            scheduler,
        };
        info!(
            "event=session_open module=session status=ok events={} savings={} uploads={} theme={}",
            session.data.events().len(),
            session.data.savings().len(),
            session.music.uploaded().len(),
            session.theme.current().id()
        );
        session
    }
}
