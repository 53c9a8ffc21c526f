//! Application services for board state and synchronization.

mod collection;
mod config;
mod controller;
mod error;
pub mod ordering;
mod registry;

pub use collection::{CollectionError, TaskCollection};
pub use config::{BoardConfig, ConfigError};
pub use controller::{BoardController, BoardSnapshot, LoadState, MoveOutcome, PendingMove};
pub use error::{BoardError, LoadError};
pub use registry::{FALLBACK_STATUS_ID, StatusRegistry, default_pipeline};
