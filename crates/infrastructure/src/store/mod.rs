//! Token store adapters.

mod document;
mod file;
mod memory;

pub use file::{FileTokenStore, origin_slug};
pub use memory::InMemoryTokenStore;
