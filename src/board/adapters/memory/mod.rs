//! In-memory store adapters used by tests and demos.

mod status_store;
mod task_store;

pub use status_store::InMemoryStatusStore;
pub use task_store::InMemoryTaskStore;
