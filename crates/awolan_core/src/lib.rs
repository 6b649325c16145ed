//! Core domain logic for Awolan.
//!
//! Everything the shells embed funnels through this crate; the UI layers
//! above it hold no business rules of their own.

pub mod db;
pub mod logging;
pub mod model;
pub mod playback;
pub mod reminder;
pub mod screens;
pub mod session;
pub mod state;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    Event, Expense, FormError, FormResult, Memory, Palette, SavingGoal, ThemeName, Track,
    VideoCollection, VideoItem,
};
pub use playback::{
    AudioEngine, AudioHandle, EngineError, EngineResult, NullEngine, PlaySession, PlaybackEvent,
};
pub use reminder::{LogScheduler, ReceiptId, ReminderScheduler};
pub use session::AppSession;
pub use state::{DataState, MusicState, PlaybackState, ThemeState, WallpaperState};
pub use store::{KvStore, StoreError, StoreResult};

/// Liveness probe used by shells during bring-up.
pub fn ping() -> &'static str {
    "pong"
}

/// Version string baked in at compile time.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
