#![allow(dead_code)]

//! Shared helpers for integration tests.

pub mod gateways;

use engine::entities::configs::RepeatPolicy;
use engine::entities::turns::ContributionKind;
use engine::RelayConfig;
use migration::{Migrator, MigratorTrait};
use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceCell<()> = OnceCell::new();

#[ctor::ctor]
fn init_test_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Fresh in-memory sqlite database with the schema applied. One connection
/// only, so every handle sees the same memory database.
pub async fn test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

/// A small, valid relay config with the given roster bounds.
pub fn relay_config(guild_id: &str, min_players: u32, max_players: u32) -> RelayConfig {
    RelayConfig {
        id: 0,
        guild_id: guild_id.to_string(),
        pattern: vec![ContributionKind::Writing, ContributionKind::Drawing],
        claim_timeout: Duration::hours(12),
        write_timeout: Duration::days(2),
        draw_timeout: Duration::days(3),
        write_warning: Duration::hours(6),
        draw_warning: Duration::hours(6),
        open_duration: Duration::days(7),
        min_players,
        max_players,
        repeat_policy: RepeatPolicy::Strict,
        standalone_turns: 4,
    }
}
