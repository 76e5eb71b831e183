//! Common test utilities and helpers
//!
//! - Mock backend helpers built on wiremock
//! - JSON fixtures shaped like the server's responses
//! - Custom assertion macros

pub mod assertions;
pub mod fixtures;
pub mod mock_server;

pub use fixtures::*;
pub use mock_server::*;
