use axum::routing::get;
use axum::Router;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{health, portfolios};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::<AppState>::new()
        .route("/healthcheck", get(health::healthcheck))
        .nest("/api/v1/portfolios", portfolios::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
