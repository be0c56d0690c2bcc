pub mod api;
pub mod middleware;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::common::di::AppState;

pub use api::create_api_routes;

/// Router completo de la aplicación, con el estado ya aplicado
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .nest("/api", create_api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
