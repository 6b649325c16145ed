//! Shared presentation/state components, one per provider of the app shell.
//!
//! # Responsibility
//! - Own the authoritative in-memory copy of each persisted collection and
//!   presentation setting.
//! - Re-persist through the records layer on every mutation.
//!
//! # Invariants
//! - Each component is constructed once per app session and restored from
//!   the store before first use.
//! - Screen controllers call down into these components; nothing here calls
//!   back up into a controller.

pub mod data_state;
pub mod music_state;
pub mod theme_state;
pub mod wallpaper_state;

pub use data_state::DataState;
pub use music_state::{MusicState, PlaybackState};
pub use theme_state::ThemeState;
pub use wallpaper_state::WallpaperState;
