//! Events and savings lists plus the session voice note.
//!
//! # Responsibility
//! - Own the authoritative events and savings lists with full-list
//!   replacement semantics.
//! - Re-persist the whole list on every replacement.
//!
//! # Invariants
//! - Callers always hand over a complete new list; there is no incremental
//!   append/remove at this layer.
//! - The voice-note reference is session-only and never persisted.

use crate::model::{Event, SavingGoal};
use crate::store::{records, KvStore};
use std::sync::Arc;

pub struct DataState {
    store: Arc<KvStore>,
    events: Vec<Event>,
    savings: Vec<SavingGoal>,
    voice_note: Option<String>,
}

impl DataState {
    /// Loads both persisted lists through the store's fallback policy.
    pub fn restore(store: Arc<KvStore>) -> Self {
        let events = records::load_events(&store);
        let savings = records::load_savings(&store);
        Self {
            store,
            events,
            savings,
            voice_note: None,
        }
    }

    /// Replaces the events list and persists it in one step.
    pub fn set_events(&mut self, events: Vec<Event>) {
        records::save_events(&self.store, &events);
        self.events = events;
    }

    /// Replaces the savings list and persists it in one step.
    pub fn set_savings(&mut self, savings: Vec<SavingGoal>) {
        records::save_savings(&self.store, &savings);
        self.savings = savings;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn savings(&self) -> &[SavingGoal] {
        &self.savings
    }

    pub fn set_voice_note(&mut self, uri: Option<String>) {
        self.voice_note = uri;
    }

    pub fn voice_note(&self) -> Option<&str> {
        self.voice_note.as_deref()
    }
}
