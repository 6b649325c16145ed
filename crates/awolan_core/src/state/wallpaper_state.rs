//! Selected background wallpaper.
//!
//! Wallpaper selection survives restart: the reference is persisted on every
//! change and restored on construction. `None` means the active theme's
//! background color shows instead of an image.

use crate::store::{records, KvStore};
use std::sync::Arc;

pub struct WallpaperState {
    store: Arc<KvStore>,
    wallpaper: Option<String>,
}

impl WallpaperState {
    pub fn restore(store: Arc<KvStore>) -> Self {
        let wallpaper = records::load_wallpaper(&store);
        Self { store, wallpaper }
    }

    /// Applies and persists a wallpaper reference; `None` clears it.
    pub fn set_wallpaper(&mut self, wallpaper: Option<String>) {
        match &wallpaper {
            Some(reference) => records::save_wallpaper(&self.store, reference),
            None => records::clear_wallpaper(&self.store),
        }
        self.wallpaper = wallpaper;
    }

    pub fn wallpaper(&self) -> Option<&str> {
        self.wallpaper.as_deref()
    }
}
