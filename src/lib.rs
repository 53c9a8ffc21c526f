//! Taskboard: ordered, optimistically synchronized task boards.
//!
//! This crate keeps a project's tasks in an in-memory collection, derives
//! per-status column order from each task's `(status_id, position)` pair,
//! applies drag-and-drop moves locally before the remote store confirms
//! them, and rolls a move back exactly when the store rejects it.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board values with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the remote task and status
//!   stores
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`board`]: Status registry, task collection, ordering engine and
//!   synchronization controller

pub mod board;
