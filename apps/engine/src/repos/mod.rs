//! Repository functions for the domain layer.
//!
//! Free async functions generic over `ConnectionTrait`, mirroring the entity
//! layout. All guard-then-mutate operations are single conditional UPDATEs;
//! the caller never observes a half-applied transition.

pub mod configs;
pub mod games;
pub mod players;
pub mod season_view;
pub mod seasons;
pub mod turns;
