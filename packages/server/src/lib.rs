//! Tandem relay server.
//!
//! Routes presence and buffer-synchronization messages between participants that
//! share a room. The server never owns document state: newcomers converge by pulling
//! buffers from their peers through the relay.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
