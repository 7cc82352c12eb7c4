//! An `Event` groups the matches users predict on and carries its own
//! lifecycle.
//!
//! The main ladder is `created → upcoming → ongoing → closed → completed`.
//! `archived` and `cancelled` are terminal side branches reached through
//! dedicated operations, never through [`EventStatus::next`].

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, Match, MatchStatus, ResultEngine};

/// Lifecycle status of an event, stored as its ordinal.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[sea_orm(num_value = 0)]
    Created,
    #[sea_orm(num_value = 1)]
    Upcoming,
    #[sea_orm(num_value = 2)]
    Ongoing,
    #[sea_orm(num_value = 3)]
    Closed,
    #[sea_orm(num_value = 4)]
    Completed,
    #[sea_orm(num_value = 5)]
    Archived,
    #[sea_orm(num_value = 6)]
    Cancelled,
}

impl EventStatus {
    /// Successor on the main ladder, `None` once the ladder is exhausted.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Created => Some(Self::Upcoming),
            Self::Upcoming => Some(Self::Ongoing),
            Self::Ongoing => Some(Self::Closed),
            Self::Closed => Some(Self::Completed),
            Self::Completed | Self::Archived | Self::Cancelled => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Closed => "closed",
            Self::Completed => "completed",
            Self::Archived => "archived",
            Self::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read projection of an event with its matches ordered by kick-off.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub deadline: DateTime<Utc>,
    pub status: EventStatus,
    pub matches: Vec<Match>,
}

impl Event {
    pub(crate) fn from_parts(model: Model, matches: Vec<Match>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            deadline: model.deadline,
            status: model.status,
            matches,
        }
    }
}

/// Check whether `status` can move one step up the ladder and return the
/// new status.
///
/// `created → upcoming` needs exactly `matches_count` matches and
/// `closed → completed` needs every match completed.
pub(crate) fn next_status(
    event_id: i32,
    status: EventStatus,
    matches: &[Match],
    matches_count: usize,
) -> ResultEngine<EventStatus> {
    let next = status.next().ok_or_else(|| {
        EngineError::UnexpectedEventStatus(format!("event {event_id} is already {status}"))
    })?;

    match (status, next) {
        (EventStatus::Created, EventStatus::Upcoming) if matches.len() != matches_count => {
            Err(EngineError::TooFewMatches {
                expected: matches_count,
                found: matches.len(),
            })
        }
        (EventStatus::Closed, EventStatus::Completed) => {
            let pending = matches
                .iter()
                .filter(|m| m.status != MatchStatus::Completed)
                .count();
            if pending > 0 {
                return Err(EngineError::MatchesAreNotFinished { event_id, pending });
            }
            Ok(next)
        }
        _ => Ok(next),
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub status: EventStatus,
    pub deadline: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::matches::Entity")]
    Matches,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new_event(name: String, deadline: DateTime<Utc>) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
            status: ActiveValue::Set(EventStatus::Created),
            deadline: ActiveValue::Set(deadline),
        }
    }
}
