use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{
    core::state::AppState,
    handlers::floors::{
        diagram_ids, floor_desks, list_floors, refill_from_diagram, refill_from_list,
    },
};

pub fn floor_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_floors))
        .route("/:floor/desks", get(floor_desks))
        .route("/:floor/diagram-ids", get(diagram_ids))
}

pub fn protected_floor_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/:floor/refill", post(refill_from_diagram))
        .route("/:floor/desks", put(refill_from_list))
}
