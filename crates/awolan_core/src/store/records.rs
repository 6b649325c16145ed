//! Typed record access with the app-wide storage failure policy.
//!
//! # Responsibility
//! - Map each persisted record family to its fixed storage key.
//! - Apply the load/save failure policy: log and fall back, never surface.
//!
//! # Invariants
//! - A failed or unparseable load yields the empty/default value.
//! - A failed save is logged and swallowed; in-memory state stays ahead.
//! - No value versioning: a shape change simply falls back to default.

use crate::model::{Event, Memory, SavingGoal, Track};
use crate::store::KvStore;
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Fixed storage keys. These are part of the persisted format.
pub mod keys {
    pub const EVENTS: &str = "@awolan_events";
    pub const SAVINGS: &str = "@awolan_savings";
    pub const TRACKS: &str = "@awolan_tracks";
    pub const THEME: &str = "@awolan_theme";
    pub const WALLPAPER: &str = "@awolan_wallpaper";
    pub const MEMORIES: &str = "@awolan_memories";
    pub const DESCRIPTION: &str = "@awolan_description";
}

pub fn load_events(store: &KvStore) -> Vec<Event> {
    load_list(store, keys::EVENTS, "events")
}

pub fn save_events(store: &KvStore, events: &[Event]) {
    save_list(store, keys::EVENTS, "events", events);
}

pub fn load_savings(store: &KvStore) -> Vec<SavingGoal> {
    load_list(store, keys::SAVINGS, "savings")
}

pub fn save_savings(store: &KvStore, savings: &[SavingGoal]) {
    save_list(store, keys::SAVINGS, "savings", savings);
}

/// Uploaded tracks only; the bundled catalog is compiled in.
pub fn load_uploaded_tracks(store: &KvStore) -> Vec<Track> {
    load_list(store, keys::TRACKS, "tracks")
}

pub fn save_uploaded_tracks(store: &KvStore, tracks: &[Track]) {
    save_list(store, keys::TRACKS, "tracks", tracks);
}

pub fn load_memories(store: &KvStore) -> Vec<Memory> {
    load_list(store, keys::MEMORIES, "memories")
}

pub fn save_memories(store: &KvStore, memories: &[Memory]) {
    save_list(store, keys::MEMORIES, "memories", memories);
}

/// Persisted theme identifier, raw. Validation happens at the theme state.
pub fn load_theme_id(store: &KvStore) -> Option<String> {
    load_text(store, keys::THEME, "theme")
}

pub fn save_theme_id(store: &KvStore, id: &str) {
    save_text(store, keys::THEME, "theme", id);
}

pub fn load_wallpaper(store: &KvStore) -> Option<String> {
    load_text(store, keys::WALLPAPER, "wallpaper")
}

pub fn save_wallpaper(store: &KvStore, wallpaper: &str) {
    save_text(store, keys::WALLPAPER, "wallpaper", wallpaper);
}

pub fn clear_wallpaper(store: &KvStore) {
    if let Err(err) = store.remove(keys::WALLPAPER) {
        error!("event=store_save module=store entity=wallpaper status=error op=remove error={err}");
    }
}

/// Partner description; absent reads as the empty string.
pub fn load_description(store: &KvStore) -> String {
    load_text(store, keys::DESCRIPTION, "description").unwrap_or_default()
}

pub fn save_description(store: &KvStore, description: &str) {
    save_text(store, keys::DESCRIPTION, "description", description);
}

fn load_list<T: DeserializeOwned>(store: &KvStore, key: &str, entity: &str) -> Vec<T> {
    match store.get_json::<Vec<T>>(key) {
        Ok(Some(list)) => list,
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!("event=store_load module=store entity={entity} status=fallback error={err}");
            Vec::new()
        }
    }
}

fn save_list<T: Serialize>(store: &KvStore, key: &str, entity: &str, list: &[T]) {
    if let Err(err) = store.set_json(key, &list) {
        error!("event=store_save module=store entity={entity} status=error error={err}");
    }
}

fn load_text(store: &KvStore, key: &str, entity: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            warn!("event=store_load module=store entity={entity} status=fallback error={err}");
            None
        }
    }
}

fn save_text(store: &KvStore, key: &str, entity: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        error!("event=store_save module=store entity={entity} status=error error={err}");
    }
}
