//! Prediction API endpoints

use api_types::prediction::{PredictionNew, PredictionUpdate, PredictionView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Prediction, User};

use crate::{ServerError, server::ServerState};

fn prediction_view(prediction: Prediction) -> PredictionView {
    PredictionView {
        id: prediction.id,
        match_id: prediction.match_id,
        user_id: prediction.user_id,
        home_goals: prediction.home_goals,
        away_goals: prediction.away_goals,
        points: prediction.points,
    }
}

/// The caller's predictions on the matches of one event.
pub async fn list_for_event(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(event_id): Path<i32>,
) -> Result<Json<Vec<PredictionView>>, ServerError> {
    let predictions = state
        .engine
        .predictions_for_event(event_id, user.id)
        .await?;
    Ok(Json(
        predictions.into_iter().map(prediction_view).collect(),
    ))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<PredictionNew>,
) -> Result<(StatusCode, Json<PredictionView>), ServerError> {
    let new = engine::PredictionNew {
        match_id: payload.match_id,
        home_goals: payload.home_goals,
        away_goals: payload.away_goals,
    };
    let prediction = state.engine.create_prediction(new, user.id).await?;
    Ok((StatusCode::CREATED, Json(prediction_view(prediction))))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(prediction_id): Path<i32>,
    Json(payload): Json<PredictionUpdate>,
) -> Result<Json<PredictionView>, ServerError> {
    let data = engine::PredictionUpdate {
        home_goals: payload.home_goals,
        away_goals: payload.away_goals,
    };
    let prediction = state
        .engine
        .update_prediction(prediction_id, data, user.id)
        .await?;
    Ok(Json(prediction_view(prediction)))
}
