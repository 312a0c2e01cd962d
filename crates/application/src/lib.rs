//! Application layer - Use cases and orchestration
//!
//! Defines the weather port and the polling service that turns provider
//! readings into published dashboard state.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
