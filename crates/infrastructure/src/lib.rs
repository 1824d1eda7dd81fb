//! Passage Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus client configuration loading.

pub mod adapters;
pub mod client_config;
pub mod store;

pub use adapters::ReqwestTransport;
pub use client_config::{ClientConfig, ConfigError};
pub use store::{FileTokenStore, InMemoryTokenStore, origin_slug};
