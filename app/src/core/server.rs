use anyhow::Result;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, warn};

use axum::Router;

use crate::{
    config::{config::Config, floors::FloorsConfig},
    core::state::AppState,
    database::connect::{connect_database, run_migrations},
    routes::create_routers,
};

pub async fn create_server(config: Config) -> Result<(Router<()>, DatabaseConnection)> {
    let db_conn = connect_database(&config).await?;
    run_migrations(&db_conn).await?;

    let floors = match FloorsConfig::load_from_file(&config.floors_file) {
        Ok(floors) => {
            info!(
                "Loaded {} floors from {}",
                floors.floors.len(),
                config.floors_file
            );
            floors
        }
        Err(e) => {
            warn!("Failed to load {}: {}", config.floors_file, e);
            warn!("Floor-plan reconciliation from diagrams is disabled");
            FloorsConfig::new()
        }
    };

    let state = AppState {
        database: db_conn.clone(),
        config,
        floors,
    };

    let app = create_routers(Arc::new(state));

    Ok((app, db_conn))
}
