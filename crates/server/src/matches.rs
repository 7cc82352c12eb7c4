//! Match API endpoints

use api_types::matches::{MatchFinish, MatchNew, MatchStatus, MatchView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::Match;

use crate::{ServerError, server::ServerState};

fn map_status(status: engine::MatchStatus) -> MatchStatus {
    match status {
        engine::MatchStatus::Upcoming => MatchStatus::Upcoming,
        engine::MatchStatus::Ongoing => MatchStatus::Ongoing,
        engine::MatchStatus::Completed => MatchStatus::Completed,
    }
}

pub(crate) fn match_view(m: Match) -> MatchView {
    MatchView {
        id: m.id,
        event_id: m.event_id,
        home_team: m.home_team,
        away_team: m.away_team,
        status: map_status(m.status),
        home_goals: m.home_goals,
        away_goals: m.away_goals,
        start_time: m.start_time,
    }
}

pub(crate) fn match_new(payload: MatchNew) -> engine::MatchNew {
    engine::MatchNew {
        home_team: payload.home_team,
        away_team: payload.away_team,
        start_time: payload.start_time,
    }
}

/// Add a match to an event still being prepared.
pub async fn create(
    State(state): State<ServerState>,
    Path(event_id): Path<i32>,
    Json(payload): Json<MatchNew>,
) -> Result<(StatusCode, Json<MatchView>), ServerError> {
    let created = state
        .engine
        .create_match(event_id, match_new(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(match_view(created))))
}

pub async fn start(
    State(state): State<ServerState>,
    Path(match_id): Path<i32>,
) -> Result<Json<MatchView>, ServerError> {
    let started = state.engine.start_match(match_id).await?;
    Ok(Json(match_view(started)))
}

/// Record the final score; predictions on the match get their points.
pub async fn finish(
    State(state): State<ServerState>,
    Path(match_id): Path<i32>,
    Query(score): Query<MatchFinish>,
) -> Result<Json<MatchView>, ServerError> {
    let finished = state
        .engine
        .finish_match(match_id, score.home_goals, score.away_goals)
        .await?;
    Ok(Json(match_view(finished)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(match_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_match(match_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
