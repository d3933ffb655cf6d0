use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    core::state::AppState,
    models::desk::Model as Desk,
    services::directory::{ListQuery, Page},
    utils::{jwt::Claims, response::APIError},
};

#[derive(Debug, Deserialize)]
pub struct CreateDeskRequest {
    pub desk_id: String,
}

/// `employee_id` must be present; an explicit `null` empties the desk.
#[derive(Debug, Deserialize)]
pub struct SetOccupantRequest {
    #[serde(deserialize_with = "Option::deserialize")]
    pub employee_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteDeskResponse {
    pub desk_id: String,
    pub unassigned: Vec<String>,
}

pub async fn list_desks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Desk>>, APIError> {
    let page = state.directory().list_desks(&query).await?;
    Ok(Json(page))
}

pub async fn get_desk(
    State(state): State<Arc<AppState>>,
    Path(desk_id): Path<String>,
) -> Result<Json<Desk>, APIError> {
    let desk = state.directory().get_desk(&desk_id).await?;
    Ok(Json(desk))
}

pub async fn create_desk(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateDeskRequest>,
) -> Result<(StatusCode, Json<Desk>), APIError> {
    info!("{} creating desk {}", claims.sub, payload.desk_id);

    let desk = state.assignments().create_desk(&payload.desk_id).await?;
    Ok((StatusCode::CREATED, Json(desk)))
}

pub async fn set_occupant(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(desk_id): Path<String>,
    Json(payload): Json<SetOccupantRequest>,
) -> Result<Json<Desk>, APIError> {
    let assignments = state.assignments();

    let desk = match payload.employee_id.as_deref().map(str::trim) {
        Some(employee_id) => {
            info!("{} seating {} at desk {}", claims.sub, employee_id, desk_id);
            assignments.move_occupant(&desk_id, employee_id).await?
        }
        None => {
            info!("{} clearing desk {}", claims.sub, desk_id);
            assignments.clear_desk(&desk_id).await?
        }
    };

    Ok(Json(desk))
}

pub async fn delete_desk(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(desk_id): Path<String>,
) -> Result<Json<DeleteDeskResponse>, APIError> {
    info!("{} deleting desk {}", claims.sub, desk_id);

    let unassigned = state.assignments().delete_desk(&desk_id).await?;
    Ok(Json(DeleteDeskResponse {
        desk_id,
        unassigned,
    }))
}
