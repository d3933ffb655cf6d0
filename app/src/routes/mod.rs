pub mod desks;
pub mod employees;
pub mod floors;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    core::state::AppState,
    handlers::floors::lookup_desk,
    middlewares::auth::require_auth,
    routes::{
        desks::{desk_routes, protected_desk_routes},
        employees::{employee_routes, protected_employee_routes},
        floors::{floor_routes, protected_floor_routes},
    },
    utils::{global_error_handler::global_error_handler, response::APIResponse},
};

pub fn create_routers(state: Arc<AppState>) -> Router<()> {
    let public_routes = Router::new()
        .nest("/desks", desk_routes())
        .nest("/employees", employee_routes())
        .nest("/floors", floor_routes())
        .route("/lookup/:desk_id", get(lookup_desk));

    let protected_routes = Router::new()
        .nest("/desks", protected_desk_routes())
        .nest("/employees", protected_employee_routes())
        .nest("/floors", protected_floor_routes())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .route("/health", get(|| async { APIResponse::OK }))
        .nest_service("/diagrams", ServeDir::new(&state.config.diagrams_dir))
        .fallback(global_error_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
