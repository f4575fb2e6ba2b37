use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Json,
};
use std::sync::Arc;

use crate::api::models::{MatchCreate, MatchParams, MatchResponse};
use crate::errors::ServiceResult;
use crate::services::matches::{self, DEFAULT_PAGE_SIZE};
use super::{with_connection, AppState};

pub async fn create_match(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MatchCreate>, JsonRejection>,
) -> ServiceResult<Json<MatchResponse>> {
    let Json(body) = payload?;
    let recorded = with_connection(&state, move |conn, config| {
        matches::submit_match(conn, &config.rating, body.winner_id, body.loser_id)
    })
    .await?;

    Ok(Json(recorded.into()))
}

pub async fn list_matches(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MatchParams>, QueryRejection>,
) -> ServiceResult<Json<Vec<MatchResponse>>> {
    let Query(params) = query?;
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);

    let rows = with_connection(&state, move |conn, _| matches::list_matches(&*conn, skip, limit)).await?;

    Ok(Json(rows.into_iter().map(MatchResponse::from).collect()))
}
