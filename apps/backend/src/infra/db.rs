use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::error::AppError;

const MAX_ATTEMPTS: u32 = 5;
const RETRY_INTERVAL: Duration = Duration::from_millis(500);

/// Connect to Postgres and bring the statistics schema up to date.
///
/// Connection attempts are retried a few times so the backend can start
/// alongside a database container that is still booting.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(8)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let mut attempt = 1;
    let db = loop {
        match Database::connect(options.clone()).await {
            Ok(db) => break db,
            Err(e) if attempt < MAX_ATTEMPTS => {
                warn!(
                    attempt,
                    max_attempts = MAX_ATTEMPTS,
                    error = %e,
                    "[DB] connection failed; retrying"
                );
                attempt += 1;
                tokio::time::sleep(RETRY_INTERVAL).await;
            }
            Err(e) => return Err(AppError::from(e)),
        }
    };

    migrate(&db, MigrationCommand::Up).await?;
    info!(attempts = attempt, "[DB] connected and migrated");
    Ok(db)
}
