//! Port contracts for the remote stores behind the board.
//!
//! The remote store is eventually consistent and offers no transactions
//! across collections; the board treats it as authoritative only at load
//! time and after a confirmed write.

pub mod status_store;
pub mod task_store;

pub use status_store::{StatusStore, StatusStoreError, StatusStoreResult};
pub use task_store::{TaskStore, TaskStoreError, TaskStoreResult};
