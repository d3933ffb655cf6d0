use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    core::state::AppState,
    services::{
        desk_id::Floor,
        diagram::read_desk_ids,
        error::ServiceError,
        floors::{floor_of, DeskLookup, FloorDesk, RefillReport},
    },
    utils::{jwt::Claims, response::APIError},
};

#[derive(Debug, Serialize)]
pub struct FloorInfo {
    pub floor: String,
    pub name: Option<String>,
    pub diagram: String,
}

#[derive(Debug, Serialize)]
pub struct DeskFloorResponse {
    pub desk_id: String,
    pub floor: Floor,
}

#[derive(Debug, Deserialize)]
pub struct RefillRequest {
    pub desk_ids: Vec<String>,
}

pub async fn list_floors(State(state): State<Arc<AppState>>) -> Json<Vec<FloorInfo>> {
    let floors = state
        .floors
        .floors
        .iter()
        .map(|(floor, config)| FloorInfo {
            floor: floor.clone(),
            name: config.name.clone(),
            diagram: format!("/diagrams/{}", config.diagram),
        })
        .collect();

    Json(floors)
}

pub async fn floor_desks(
    State(state): State<Arc<AppState>>,
    Path(floor): Path<String>,
) -> Result<Json<Vec<FloorDesk>>, APIError> {
    let desks = state.floor_lookup().desks_on_floor(&floor).await?;
    Ok(Json(desks))
}

pub async fn desk_floor(Path(desk_id): Path<String>) -> Result<Json<DeskFloorResponse>, APIError> {
    let floor = floor_of(&desk_id)?;
    Ok(Json(DeskFloorResponse { desk_id, floor }))
}

/// Occupancy of a single desk, as clicked on the map.
pub async fn lookup_desk(
    State(state): State<Arc<AppState>>,
    Path(desk_id): Path<String>,
) -> Result<Json<DeskLookup>, APIError> {
    let lookup = state.floor_lookup().lookup(&desk_id).await?;
    Ok(Json(lookup))
}

pub async fn diagram_ids(
    State(state): State<Arc<AppState>>,
    Path(floor): Path<String>,
) -> Result<Json<Vec<String>>, APIError> {
    let ids = load_diagram_ids(&state, &floor).await?;
    Ok(Json(ids))
}

pub async fn refill_from_diagram(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(floor): Path<String>,
) -> Result<Json<RefillReport>, APIError> {
    let ids = load_diagram_ids(&state, &floor).await?;
    info!(
        "{} refilling floor {} from diagram ({} desks)",
        claims.sub,
        floor,
        ids.len()
    );

    let report = state.floor_lookup().refill_floor(&floor, &ids).await?;
    Ok(Json(report))
}

pub async fn refill_from_list(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(floor): Path<String>,
    Json(payload): Json<RefillRequest>,
) -> Result<Json<RefillReport>, APIError> {
    info!(
        "{} refilling floor {} from a list of {} desks",
        claims.sub,
        floor,
        payload.desk_ids.len()
    );

    let report = state
        .floor_lookup()
        .refill_floor(&floor, &payload.desk_ids)
        .await?;
    Ok(Json(report))
}

async fn load_diagram_ids(state: &AppState, floor: &str) -> Result<Vec<String>, APIError> {
    let path = state
        .floors
        .diagram_path(&state.config.diagrams_dir, floor)
        .ok_or_else(|| ServiceError::NotFound(format!("Floor {} is not configured", floor)))?;

    let ids = read_desk_ids(&path).await?;
    Ok(ids.into_iter().map(String::from).collect())
}
