//! Port adapters backed by third-party libraries.

mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;
