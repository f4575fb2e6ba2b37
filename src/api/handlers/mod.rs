use std::sync::Arc;

use anyhow::Context;
use axum::Json;
use axum::extract::State;
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::config::settings::AppConfig;
use crate::database::{self, DbPool};
use crate::errors::ServiceResult;

pub mod leaderboard;
pub mod matches;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

/// Runs blocking database work on tokio's blocking pool with a pooled
/// connection.
pub(crate) async fn with_connection<T, F>(state: &Arc<AppState>, work: F) -> ServiceResult<T>
where
    F: FnOnce(&mut Connection, &AppConfig) -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || {
        let mut conn = database::get_connection(&state.pool)?;
        work(&mut conn, &state.config)
    })
    .await
    .context("Database task did not complete")?
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to Colosseum Pool Game Engine" }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> ServiceResult<Json<Value>> {
    with_connection(&state, |conn, _| {
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .context("Health check query failed")?;
        Ok(())
    })
    .await?;

    Ok(Json(json!({ "status": "ok" })))
}
