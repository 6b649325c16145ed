//! Screen controllers, one per feature area of the app shell.
//!
//! # Responsibility
//! - Hold transient form state while the user fills a screen in.
//! - Validate input, build records and hand them to the state components.
//! - Expose the display projections each screen renders from.
//!
//! # Invariants
//! - Controllers never persist directly; they go through a state component.
//!   The relationship screen is the one sanctioned exception, owning its
//!   memories list and partner description against the records layer.
//! - A validation failure aborts the submission with nothing saved.

pub mod events;
pub mod expenses;
pub mod home;
pub mod memories;
pub mod savings;
pub mod settings;
pub mod videos;

pub use events::NewEventRequest;
pub use expenses::{ExpensesScreen, NewExpenseRequest};
pub use home::UpcomingEvent;
pub use memories::{MemoriesScreen, NewMemoryRequest};
pub use savings::{NewSavingRequest, SavingRow};
pub use settings::ThemeOption;
pub use videos::{StagedVideo, VideosScreen};
