//! Domain engine of the match predictions service.
//!
//! The [`Engine`] owns the database connection and exposes every business
//! operation: account management, the event/match lifecycle, predictions and
//! their scoring. Each operation runs inside a single database transaction.

pub use error::EngineError;
pub use events::{Event, EventStatus};
pub use matches::{Match, MatchNew, MatchStatus};
pub use ops::{DEFAULT_MATCHES_COUNT, Engine, EngineBuilder};
pub use predictions::{Prediction, PredictionNew, PredictionUpdate};
pub use scoring::{Outcome, Scoreline};
pub use users::User;

mod error;
mod events;
mod matches;
mod ops;
mod password;
mod predictions;
pub mod scoring;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
