/**
 * API Routes
 *
 * # Public
 * - `POST /register` - User registration
 * - `POST /login` - User login
 *
 * # Protected (bearer token required)
 * - `GET /entries`, `POST /entries`, `PUT /entries`
 * - `DELETE /entries/{id}`
 * - `GET /cars`, `POST /cars`
 * - `DELETE /cars/{id}`
 *
 * Protected routes get the gate pipeline through `route_layer`, so it only
 * runs for requests that matched one of them.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};

use crate::backend::auth::{login, register};
use crate::backend::cars::{create_car, delete_car, list_cars};
use crate::backend::entries::{create_entry, delete_entry, list_entries, update_entry};
use crate::backend::middleware::gate_middleware;
use crate::backend::server::state::AppState;

/// Add the routes reachable without a token
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Add the routes behind the authentication gates
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `state` - State handed to the gate middleware
pub fn configure_protected_routes(router: Router<AppState>, state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route(
            "/entries",
            get(list_entries).post(create_entry).put(update_entry),
        )
        .route("/entries/{id}", delete(delete_entry))
        .route("/cars", get(list_cars).post(create_car))
        .route("/cars/{id}", delete(delete_car))
        .route_layer(from_fn_with_state(state, gate_middleware));

    router.merge(protected)
}
