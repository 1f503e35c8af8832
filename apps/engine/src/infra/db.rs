//! Database connection helper.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

pub async fn connect_db(url: &str) -> Result<DatabaseConnection, DomainError> {
    let mut opts = ConnectOptions::new(url.to_string());
    opts.sqlx_logging(false);
    let conn = Database::connect(opts).await.map_err(map_db_err)?;
    info!("database connection established");
    Ok(conn)
}
