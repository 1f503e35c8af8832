#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod domain;
pub mod entities;
pub mod errors;
pub mod gateways;
pub mod infra;
pub mod repos;
pub mod services;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use domain::config::RelayConfig;
pub use domain::duration::{format_duration, parse_duration};
pub use domain::selector::{select_next_player, SeasonView};
pub use domain::turn::{Turn, TurnContent};
pub use errors::domain::DomainError;
pub use gateways::{
    NotificationGateway, NotificationInstruction, Recipient, SchedulingGateway,
};
pub use infra::db::connect_db;
pub use infra::retry::RetryPolicy;
pub use services::flow::{FlowService, JoinOutcome, ResolveOutcome};
pub use services::setup_session::SetupSession;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
