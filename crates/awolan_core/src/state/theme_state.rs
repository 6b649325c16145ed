//! Active theme and derived palette.
//!
//! # Responsibility
//! - Hold the session's active theme and serve its palette.
//! - Persist the identifier on change and restore it on construction.
//!
//! # Invariants
//! - An unrecognized identifier never changes state and never errors.
//! - Re-selecting the active theme leaves the persisted value untouched.

use crate::model::{Palette, ThemeName};
use crate::store::{records, KvStore};
use log::{info, warn};
use std::sync::Arc;

pub struct ThemeState {
    store: Arc<KvStore>,
    active: ThemeName,
}

impl ThemeState {
    /// Restores the previously selected theme, falling back to the default
    /// when nothing was persisted or the persisted identifier is unknown.
    pub fn restore(store: Arc<KvStore>) -> Self {
        let active = records::load_theme_id(&store)
            .and_then(|id| ThemeName::from_id(&id))
            .unwrap_or_default();
        Self { store, active }
    }

    /// Applies and persists a theme selection.
    ///
    /// Unknown identifiers are logged and ignored; selecting the already
    /// active theme is a no-op.
    pub fn select_theme(&mut self, id: &str) {
        let Some(theme) = ThemeName::from_id(id) else {
            warn!("event=theme_select module=state status=ignored reason=unknown_id");
            return;
        };
        if theme == self.active {
            return;
        }
        self.active = theme;
        records::save_theme_id(&self.store, theme.id());
        info!(
            "event=theme_select module=state status=ok theme={}",
            theme.id()
        );
    }

    pub fn current(&self) -> ThemeName {
        self.active
    }

    /// Palette for the active theme.
    pub fn palette(&self) -> Palette {
        self.active.palette()
    }
}
