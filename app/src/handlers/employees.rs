use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use tracing::info;

use crate::{
    core::state::AppState,
    models::employee::Model as Employee,
    services::{
        assignment::EmployeeForm,
        directory::{ListQuery, Page},
        floors::EmployeeLocation,
    },
    utils::{jwt::Claims, response::APIError},
};

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub id: String,
    #[serde(flatten)]
    pub employee: EmployeeForm,
}

pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Employee>>, APIError> {
    let page = state.directory().list_employees(&query).await?;
    Ok(Json(page))
}

pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, APIError> {
    let employee = state.directory().get_employee(&id).await?;
    Ok(Json(employee))
}

/// Floor and desk of an employee, for jumping to them on the map.
pub async fn locate_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeLocation>, APIError> {
    let location = state.floor_lookup().locate(&id).await?;
    Ok(Json(location))
}

pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), APIError> {
    info!("{} creating employee {}", claims.sub, payload.id);

    let employee = state
        .assignments()
        .create_employee(&payload.id, payload.employee)
        .await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeForm>,
) -> Result<Json<Employee>, APIError> {
    info!("{} updating employee {}", claims.sub, id);

    let employee = state.assignments().edit_employee(&id, payload).await?;
    Ok(Json(employee))
}

pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, APIError> {
    info!("{} deleting employee {}", claims.sub, id);

    let employee = state.assignments().delete_employee(&id).await?;
    Ok(Json(employee))
}
