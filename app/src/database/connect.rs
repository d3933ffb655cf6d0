use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use thiserror::Error;

use crate::config::config::Config;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection Error: {0}")]
    ConnectionError(#[from] DbErr),

    #[error("Configuration Error: {0}")]
    ConfigError(String),
}

pub async fn connect_database(config: &Config) -> Result<DatabaseConnection, DatabaseError> {
    let database_url = config.database_url.as_str();

    if !database_url.starts_with("postgres://") && !database_url.starts_with("sqlite:") {
        return Err(DatabaseError::ConfigError(
            "Invalid Database URL - It must start with postgres:// or sqlite:".to_string(),
        ));
    }

    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;

    Ok(db)
}

pub async fn run_migrations(connection: &DatabaseConnection) -> Result<(), DatabaseError> {
    Migrator::up(connection, None).await?;

    Ok(())
}

/// A migrated in-memory SQLite database. One pooled connection, since every
/// SQLite memory connection is its own database.
#[cfg(test)]
pub async fn connect_test_database() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.unwrap();
    run_migrations(&db).await.unwrap();
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_unknown_scheme() {
        let config = Config {
            database_url: "mysql://localhost/desks".to_string(),
            port: 8000,
            server_ip: "127.0.0.1".to_string(),
            max_connections: 1,
            min_connections: 1,
            jwt_secret: "secret".to_string(),
            desk_page_size: 20,
            employee_page_size: 25,
            floors_file: "floors.yaml".to_string(),
            diagrams_dir: "diagrams".to_string(),
        };

        assert!(matches!(
            connect_database(&config).await,
            Err(DatabaseError::ConfigError(_))
        ));
    }
}
