//! A `Prediction` is a user's guessed scoreline for one match.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, scoring::Scoreline, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: i32,
    pub match_id: i32,
    pub user_id: Uuid,
    pub home_goals: Option<i32>,
    pub away_goals: Option<i32>,
    /// `None` until the match is completed.
    pub points: Option<i32>,
}

/// A new guess for `match_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionNew {
    pub match_id: i32,
    pub home_goals: i32,
    pub away_goals: i32,
}

/// Replacement guess for an existing prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionUpdate {
    pub home_goals: i32,
    pub away_goals: i32,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "predictions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub home_goals: Option<i32>,
    pub away_goals: Option<i32>,
    pub points: Option<i32>,
    pub match_id: i32,
    pub user_id: String,
}

impl Model {
    pub(crate) fn guess(&self) -> Option<Scoreline> {
        Scoreline::from_parts(self.home_goals, self.away_goals)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Matches,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new_prediction(new: PredictionNew, user_id: Uuid) -> Self {
        Self {
            id: ActiveValue::NotSet,
            home_goals: ActiveValue::Set(Some(new.home_goals)),
            away_goals: ActiveValue::Set(Some(new.away_goals)),
            points: ActiveValue::Set(None),
            match_id: ActiveValue::Set(new.match_id),
            user_id: ActiveValue::Set(user_id.to_string()),
        }
    }
}

impl TryFrom<Model> for Prediction {
    type Error = EngineError;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            match_id: value.match_id,
            user_id: parse_uuid(&value.user_id, "user")?,
            home_goals: value.home_goals,
            away_goals: value.away_goals,
            points: value.points,
        })
    }
}
