//! Passage - command line session client
//!
//! Wires the session core to the reqwest transport and the file token store,
//! and exposes the pieces the binary drives.

pub mod cli;
pub mod client;
pub mod render;

pub use cli::{Cli, Command};
pub use client::SessionClient;
