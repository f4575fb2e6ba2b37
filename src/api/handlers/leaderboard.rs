use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use std::sync::Arc;

use crate::api::models::{LeaderboardItem, LeaderboardParams, PlayerStats};
use crate::errors::ServiceResult;
use crate::services::leaderboard::{self, DEFAULT_LEADERBOARD_SIZE};
use super::{with_connection, AppState};

pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LeaderboardParams>, QueryRejection>,
) -> ServiceResult<Json<Vec<LeaderboardItem>>> {
    let Query(params) = query?;
    let limit = params.limit.unwrap_or(DEFAULT_LEADERBOARD_SIZE);

    let entries = with_connection(&state, move |conn, _| leaderboard::get_leaderboard(&*conn, limit)).await?;

    Ok(Json(entries.into_iter().map(LeaderboardItem::from).collect()))
}

pub async fn get_player_stats(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Json<PlayerStats>> {
    let Path(player_id) = path?;
    let stat = with_connection(&state, move |conn, _| leaderboard::get_player_stats(&*conn, player_id)).await?;

    Ok(Json(stat.into()))
}
