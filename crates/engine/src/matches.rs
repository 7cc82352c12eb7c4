//! The module contains `Match`, a single fixture inside an event.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{ResultEngine, scoring::Scoreline, util};

/// Status of a match, stored as its ordinal.
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
pub enum MatchStatus {
    #[sea_orm(num_value = 0)]
    Upcoming,
    #[sea_orm(num_value = 1)]
    Ongoing,
    #[sea_orm(num_value = 2)]
    Completed,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }
}

impl core::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A match.
///
/// Goals stay `None` until the match is completed; they are written once,
/// together with the `completed` status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: i32,
    pub event_id: i32,
    pub home_team: String,
    pub away_team: String,
    pub status: MatchStatus,
    pub home_goals: Option<i32>,
    pub away_goals: Option<i32>,
    pub start_time: DateTime<Utc>,
}

impl Match {
    /// Final scoreline, only known once the match is completed.
    pub fn scoreline(&self) -> Option<Scoreline> {
        Scoreline::from_parts(self.home_goals, self.away_goals)
    }
}

/// Data required to add a match to an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchNew {
    pub home_team: String,
    pub away_team: String,
    /// Kick-off; one day from now when omitted.
    pub start_time: Option<DateTime<Utc>>,
}

impl MatchNew {
    pub fn new(home_team: &str, away_team: &str, start_time: Option<DateTime<Utc>>) -> Self {
        Self {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            start_time,
        }
    }

    /// Validate the fixture and turn it into a row for `event_id`.
    pub(crate) fn into_active_model(self, event_id: i32) -> ResultEngine<ActiveModel> {
        let home_team = util::normalize_team(&self.home_team, "home team")?;
        let away_team = util::normalize_team(&self.away_team, "away team")?;
        let start_time = self
            .start_time
            .unwrap_or_else(|| Utc::now() + Duration::days(1));

        Ok(ActiveModel {
            id: ActiveValue::NotSet,
            home_team: ActiveValue::Set(home_team),
            away_team: ActiveValue::Set(away_team),
            status: ActiveValue::Set(MatchStatus::Upcoming),
            home_goals: ActiveValue::Set(None),
            away_goals: ActiveValue::Set(None),
            start_time: ActiveValue::Set(start_time),
            event_id: ActiveValue::Set(event_id),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub home_team: String,
    pub away_team: String,
    pub status: MatchStatus,
    pub home_goals: Option<i32>,
    pub away_goals: Option<i32>,
    pub start_time: DateTimeUtc,
    pub event_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Events,
    #[sea_orm(has_many = "super::predictions::Entity")]
    Predictions,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::predictions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Predictions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Match {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            event_id: value.event_id,
            home_team: value.home_team,
            away_team: value.away_team,
            status: value.status,
            home_goals: value.home_goals,
            away_goals: value.away_goals,
            start_time: value.start_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_match_starts_upcoming_without_goals() {
        let model = MatchNew::new(" Italy ", "Spain", None)
            .into_active_model(4)
            .unwrap();

        assert_eq!(model.home_team, ActiveValue::Set("Italy".to_string()));
        assert_eq!(model.status, ActiveValue::Set(MatchStatus::Upcoming));
        assert_eq!(model.home_goals, ActiveValue::Set(None));
        assert_eq!(model.event_id, ActiveValue::Set(4));
        match model.start_time {
            ActiveValue::Set(start) => assert!(start > Utc::now()),
            other => panic!("unexpected start time {other:?}"),
        }
    }

    #[test]
    fn short_team_names_are_rejected() {
        assert!(MatchNew::new("It", "Spain", None).into_active_model(1).is_err());
        assert!(MatchNew::new("Italy", "  ", None).into_active_model(1).is_err());
    }

    #[test]
    fn scoreline_needs_both_goals() {
        let mut m = Match {
            id: 1,
            event_id: 1,
            home_team: "Italy".to_string(),
            away_team: "Spain".to_string(),
            status: MatchStatus::Completed,
            home_goals: Some(2),
            away_goals: Some(1),
            start_time: Utc::now(),
        };
        assert_eq!(m.scoreline(), Some(Scoreline::new(2, 1)));
        m.away_goals = None;
        assert_eq!(m.scoreline(), None);
    }
}
