//! Task board ordering and optimistic synchronization.
//!
//! The board module owns the in-memory task collection of the loaded
//! project, derives per-status column order from each task's
//! `(status_id, position)` pair, and reconciles local drag-and-drop moves
//! against a remote store that may reject them. It follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts for the remote stores in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Registry, collection, ordering engine and controller in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
