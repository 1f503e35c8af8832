//! Error handling for the relay engine.

pub mod domain;

pub use domain::DomainError;
