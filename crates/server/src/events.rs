//! Event API endpoints

use api_types::event::{EventList, EventNew, EventStatus, EventView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::Event;

use crate::{
    ServerError,
    matches::{match_new, match_view},
    server::{BearerHeader, ServerState, authenticate},
};

const DEFAULT_LIMIT: u64 = 100;

fn map_status(status: engine::EventStatus) -> EventStatus {
    match status {
        engine::EventStatus::Created => EventStatus::Created,
        engine::EventStatus::Upcoming => EventStatus::Upcoming,
        engine::EventStatus::Ongoing => EventStatus::Ongoing,
        engine::EventStatus::Closed => EventStatus::Closed,
        engine::EventStatus::Completed => EventStatus::Completed,
        engine::EventStatus::Archived => EventStatus::Archived,
        engine::EventStatus::Cancelled => EventStatus::Cancelled,
    }
}

fn event_view(event: Event) -> EventView {
    EventView {
        id: event.id,
        name: event.name,
        deadline: event.deadline,
        status: map_status(event.status),
        matches: event.matches.into_iter().map(match_view).collect(),
    }
}

/// List events by deadline.
///
/// `admin_mode` also lists events still in `created` status and is reserved
/// to superusers.
pub async fn list(
    State(state): State<ServerState>,
    bearer: BearerHeader,
    Query(query): Query<EventList>,
) -> Result<Json<Vec<EventView>>, ServerError> {
    let admin_mode = query.admin_mode.unwrap_or(false);
    if admin_mode {
        let user = authenticate(&state, bearer).await?;
        if !user.is_superuser {
            return Err(ServerError::Forbidden(
                "admin mode requires a superuser".to_string(),
            ));
        }
    }

    let events = state
        .engine
        .events(
            admin_mode,
            query.offset.unwrap_or(0),
            query.limit.unwrap_or(DEFAULT_LIMIT),
        )
        .await?;
    Ok(Json(events.into_iter().map(event_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(event_id): Path<i32>,
) -> Result<Json<EventView>, ServerError> {
    let event = state.engine.event(event_id).await?;
    Ok(Json(event_view(event)))
}

/// Create an event in `created` status, with its initial matches if any.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventNew>,
) -> Result<(StatusCode, Json<EventView>), ServerError> {
    let matches = payload.matches.into_iter().map(match_new).collect();
    let event = state
        .engine
        .new_event(&payload.name, payload.deadline, matches)
        .await?;
    Ok((StatusCode::CREATED, Json(event_view(event))))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(event_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_event(event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn upgrade(
    State(state): State<ServerState>,
    Path(event_id): Path<i32>,
) -> Result<Json<EventView>, ServerError> {
    Ok(Json(event_view(state.engine.upgrade_event(event_id).await?)))
}

pub async fn run(
    State(state): State<ServerState>,
    Path(event_id): Path<i32>,
) -> Result<Json<EventView>, ServerError> {
    Ok(Json(event_view(state.engine.run_event(event_id).await?)))
}

pub async fn start(
    State(state): State<ServerState>,
    Path(event_id): Path<i32>,
) -> Result<Json<EventView>, ServerError> {
    Ok(Json(event_view(state.engine.start_event(event_id).await?)))
}

pub async fn close(
    State(state): State<ServerState>,
    Path(event_id): Path<i32>,
) -> Result<Json<EventView>, ServerError> {
    Ok(Json(event_view(state.engine.close_event(event_id).await?)))
}

pub async fn finish(
    State(state): State<ServerState>,
    Path(event_id): Path<i32>,
) -> Result<Json<EventView>, ServerError> {
    Ok(Json(event_view(state.engine.finish_event(event_id).await?)))
}

pub async fn cancel(
    State(state): State<ServerState>,
    Path(event_id): Path<i32>,
) -> Result<Json<EventView>, ServerError> {
    Ok(Json(event_view(state.engine.cancel_event(event_id).await?)))
}

pub async fn archive(
    State(state): State<ServerState>,
    Path(event_id): Path<i32>,
) -> Result<Json<EventView>, ServerError> {
    Ok(Json(event_view(state.engine.archive_event(event_id).await?)))
}
