//! Application use cases (session flow orchestration).

mod bootstrap;
mod sign_in;
mod sign_out;

pub use bootstrap::*;
pub use sign_in::*;
pub use sign_out::*;
