use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{
    core::state::AppState,
    handlers::employees::{
        create_employee, delete_employee, get_employee, list_employees, locate_employee,
        update_employee,
    },
};

pub fn employee_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_employees))
        .route("/:id", get(get_employee))
        .route("/:id/locate", get(locate_employee))
}

pub fn protected_employee_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_employee))
        .route("/:id", put(update_employee).delete(delete_employee))
}
