use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;

use crate::api::handlers::{
    health,
    leaderboard::{get_leaderboard, get_player_stats},
    matches::{create_match, list_matches},
    root, AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/matches", post(create_match).get(list_matches))
        .route("/leaderboard", get(get_leaderboard))
        .route("/stats/leaderboard", get(get_leaderboard))
        .route("/stats/:player_id", get(get_player_stats));

    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    let prefix = state.config.server.api_prefix.clone();
    let router = if prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(&prefix, api)
    };

    router
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} -> {} ({} ms)",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}
