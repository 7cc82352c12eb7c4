//! The module contains the errors the engine can throw.
//!
//! They fall in a few families the HTTP boundary maps once:
//!
//! - not found: [`UserNotFound`], [`EventNotFound`], [`MatchNotFound`],
//!   [`PredictionNotFound`];
//! - lifecycle preconditions: [`UnexpectedEventStatus`], [`TooFewMatches`],
//!   [`MatchesAreNotFinished`], [`UnexpectedMatchStatus`],
//!   [`MatchAlreadyIsCompleted`], [`PredictionAlreadyExists`],
//!   [`UserAlreadyExists`], [`InvalidEmailOrPassword`];
//! - ownership: [`UserIsNotAllowed`];
//! - validation: [`InvalidInput`];
//! - infrastructure: [`Database`], [`PasswordHash`], [`Blocking`].
//!
//!  [`UserNotFound`]: EngineError::UserNotFound
//!  [`EventNotFound`]: EngineError::EventNotFound
//!  [`MatchNotFound`]: EngineError::MatchNotFound
//!  [`PredictionNotFound`]: EngineError::PredictionNotFound
//!  [`UnexpectedEventStatus`]: EngineError::UnexpectedEventStatus
//!  [`TooFewMatches`]: EngineError::TooFewMatches
//!  [`MatchesAreNotFinished`]: EngineError::MatchesAreNotFinished
//!  [`UnexpectedMatchStatus`]: EngineError::UnexpectedMatchStatus
//!  [`MatchAlreadyIsCompleted`]: EngineError::MatchAlreadyIsCompleted
//!  [`PredictionAlreadyExists`]: EngineError::PredictionAlreadyExists
//!  [`UserAlreadyExists`]: EngineError::UserAlreadyExists
//!  [`InvalidEmailOrPassword`]: EngineError::InvalidEmailOrPassword
//!  [`UserIsNotAllowed`]: EngineError::UserIsNotAllowed
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`Database`]: EngineError::Database
//!  [`PasswordHash`]: EngineError::PasswordHash
//!  [`Blocking`]: EngineError::Blocking
use bcrypt::BcryptError;
use sea_orm::DbErr;
use thiserror::Error;
use tokio::task::JoinError;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("user \"{0}\" not found")]
    UserNotFound(String),
    #[error("event {0} not found")]
    EventNotFound(i32),
    #[error("match {0} not found")]
    MatchNotFound(i32),
    #[error("prediction {0} not found")]
    PredictionNotFound(i32),
    #[error("Unexpected event status: {0}")]
    UnexpectedEventStatus(String),
    #[error("event needs exactly {expected} matches, it has {found}")]
    TooFewMatches { expected: usize, found: usize },
    #[error("event {event_id} still has {pending} unfinished matches")]
    MatchesAreNotFinished { event_id: i32, pending: usize },
    #[error("Unexpected match status: {0}")]
    UnexpectedMatchStatus(String),
    #[error("match {0} is already completed")]
    MatchAlreadyIsCompleted(i32),
    #[error("prediction for match {0} already exists")]
    PredictionAlreadyExists(i32),
    #[error("\"{0}\" already registered")]
    UserAlreadyExists(String),
    #[error("invalid email or password")]
    InvalidEmailOrPassword,
    #[error("User is not allowed: {0}")]
    UserIsNotAllowed(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    PasswordHash(#[from] BcryptError),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("blocking task failed: {0}")]
    Blocking(#[from] JoinError),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserNotFound(a), Self::UserNotFound(b)) => a == b,
            (Self::EventNotFound(a), Self::EventNotFound(b)) => a == b,
            (Self::MatchNotFound(a), Self::MatchNotFound(b)) => a == b,
            (Self::PredictionNotFound(a), Self::PredictionNotFound(b)) => a == b,
            (Self::UnexpectedEventStatus(a), Self::UnexpectedEventStatus(b)) => a == b,
            (
                Self::TooFewMatches {
                    expected: a,
                    found: x,
                },
                Self::TooFewMatches {
                    expected: b,
                    found: y,
                },
            ) => a == b && x == y,
            (
                Self::MatchesAreNotFinished {
                    event_id: a,
                    pending: x,
                },
                Self::MatchesAreNotFinished {
                    event_id: b,
                    pending: y,
                },
            ) => a == b && x == y,
            (Self::UnexpectedMatchStatus(a), Self::UnexpectedMatchStatus(b)) => a == b,
            (Self::MatchAlreadyIsCompleted(a), Self::MatchAlreadyIsCompleted(b)) => a == b,
            (Self::PredictionAlreadyExists(a), Self::PredictionAlreadyExists(b)) => a == b,
            (Self::UserAlreadyExists(a), Self::UserAlreadyExists(b)) => a == b,
            (Self::InvalidEmailOrPassword, Self::InvalidEmailOrPassword) => true,
            (Self::UserIsNotAllowed(a), Self::UserIsNotAllowed(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::PasswordHash(a), Self::PasswordHash(b)) => a.to_string() == b.to_string(),
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            (Self::Blocking(a), Self::Blocking(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
