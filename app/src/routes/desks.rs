use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{
    core::state::AppState,
    handlers::{
        desks::{create_desk, delete_desk, get_desk, list_desks, set_occupant},
        floors::desk_floor,
    },
};

pub fn desk_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_desks))
        .route("/:desk_id", get(get_desk))
        .route("/:desk_id/floor", get(desk_floor))
}

pub fn protected_desk_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_desk))
        .route("/:desk_id", delete(delete_desk))
        .route("/:desk_id/occupant", put(set_occupant))
}
