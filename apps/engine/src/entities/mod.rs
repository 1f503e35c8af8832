//! SeaORM entity definitions for the relay engine schema.

pub mod configs;
pub mod games;
pub mod players;
pub mod season_players;
pub mod seasons;
pub mod turns;
