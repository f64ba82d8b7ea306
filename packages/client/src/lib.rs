//! Terminal participant for the Tandem relay.
//!
//! Keeps a local copy of the shared buffer, answers newcomers with it, and applies
//! whatever the peers broadcast.

pub mod buffer;
pub mod command;
pub mod error;
pub mod session;

mod connection;
mod domain;
mod execute;
mod formatter;
mod runner;
mod ui;

pub use runner::{ClientConfig, run_client};
