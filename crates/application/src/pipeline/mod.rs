//! Request pipeline
//!
//! `ApiClient` composes a transport with a `RequestInterceptor` chosen at
//! construction time. Every call goes through the interceptor exactly once.

mod client;
mod interceptor;

pub use client::ApiClient;
pub use interceptor::{BearerInterceptor, PassThrough, RequestInterceptor, attach_bearer};
