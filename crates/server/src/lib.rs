use api_types::ErrorBody;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use auth::AuthConfig;
pub use server::{ServerState, router, run_with_listener};

mod auth;
mod events;
mod matches;
mod predictions;
mod server;
mod user;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Missing, malformed or expired credentials.
    Unauthorized,
    /// Authenticated, but without the required privilege.
    Forbidden(String),
    /// Failure that must not leak to the client.
    Internal(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::UserNotFound(_)
        | EngineError::EventNotFound(_)
        | EngineError::MatchNotFound(_)
        | EngineError::PredictionNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::UnexpectedEventStatus(_)
        | EngineError::TooFewMatches { .. }
        | EngineError::MatchesAreNotFinished { .. }
        | EngineError::UnexpectedMatchStatus(_)
        | EngineError::MatchAlreadyIsCompleted(_)
        | EngineError::PredictionAlreadyExists(_)
        | EngineError::UserAlreadyExists(_)
        | EngineError::InvalidEmailOrPassword => StatusCode::BAD_REQUEST,
        EngineError::UserIsNotAllowed(_) => StatusCode::FORBIDDEN,
        EngineError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::PasswordHash(_) | EngineError::Database(_) | EngineError::Blocking(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::PasswordHash(hash_err) => {
            tracing::error!("password hashing error: {hash_err}");
            "internal server error".to_string()
        }
        EngineError::Blocking(join_err) => {
            tracing::error!("blocking task error: {join_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "could not validate credentials".to_string(),
            ),
            ServerError::Forbidden(err) => (StatusCode::FORBIDDEN, err),
            ServerError::Internal(err) => {
                tracing::error!("internal error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let mut response = (status, Json(ErrorBody { error })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
