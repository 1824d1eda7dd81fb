//! Outbound request types

mod config;
mod header;
mod method;

pub use config::RequestConfig;
pub use header::{AUTHORIZATION, Header, Headers};
pub use method::HttpMethod;
