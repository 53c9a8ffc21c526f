//! Unit tests for the board module.

mod fixtures;
