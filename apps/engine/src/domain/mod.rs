//! Domain layer: pure relay-game logic and helpers.

pub mod config;
pub mod duration;
pub mod selector;
pub mod transition;
pub mod turn;

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod tests_config;
#[cfg(test)]
mod tests_duration;
#[cfg(test)]
mod tests_props_duration;
#[cfg(test)]
mod tests_props_selector;
#[cfg(test)]
mod tests_selector;
#[cfg(test)]
mod tests_transition;
#[cfg(test)]
mod tests_turn;

// Re-exports for ergonomics
pub use config::RelayConfig;
pub use duration::{format_duration, parse_duration};
pub use selector::{select_next_player, GameView, RosterMember, SeasonView, TurnView};
pub use turn::{validate_content, Turn, TurnContent};
