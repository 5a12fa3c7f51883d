//! File-based protocol with the external X-13 engine: request encoding,
//! subprocess invocation, and response parsing.

mod invoke;
mod request;
mod response;

pub use invoke::run_engine;
pub use request::{write_request, EngineRequest};
pub use response::parse_d11;
