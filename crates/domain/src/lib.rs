//! Domain layer for Barometer
//!
//! Contains the weather readings, the pressure-trend classifier, the
//! headache-risk scorer and the dashboard state they feed.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
