use sea_orm::{
    ActiveValue, DatabaseTransaction, JoinType, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    EngineError, MatchStatus, Prediction, PredictionNew, PredictionUpdate, ResultEngine, matches,
    predictions, util,
};

use super::{Engine, with_tx};

impl Engine {
    pub async fn prediction_by_id(&self, prediction_id: i32) -> ResultEngine<Prediction> {
        with_tx!(self, |db_tx| {
            let model = self.require_prediction(&db_tx, prediction_id).await?;
            Prediction::try_from(model)
        })
    }

    /// The predictions `user_id` made on the matches of one event.
    pub async fn predictions_for_event(
        &self,
        event_id: i32,
        user_id: Uuid,
    ) -> ResultEngine<Vec<Prediction>> {
        with_tx!(self, |db_tx| {
            self.require_event(&db_tx, event_id).await?;

            let models = predictions::Entity::find()
                .join(JoinType::InnerJoin, predictions::Relation::Matches.def())
                .filter(matches::Column::EventId.eq(event_id))
                .filter(predictions::Column::UserId.eq(user_id.to_string()))
                .order_by_asc(matches::Column::StartTime)
                .order_by_asc(predictions::Column::Id)
                .all(&db_tx)
                .await?;

            models
                .into_iter()
                .map(Prediction::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Store a new guess for an upcoming match.
    ///
    /// At most one prediction per user and match; the unique index on
    /// `(match_id, user_id)` backs the check below.
    pub async fn create_prediction(
        &self,
        new: PredictionNew,
        user_id: Uuid,
    ) -> ResultEngine<Prediction> {
        util::validate_goals(new.home_goals, new.away_goals)?;

        with_tx!(self, |db_tx| {
            self.require_open_match(&db_tx, new.match_id).await?;

            let exists = predictions::Entity::find()
                .filter(predictions::Column::MatchId.eq(new.match_id))
                .filter(predictions::Column::UserId.eq(user_id.to_string()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::PredictionAlreadyExists(new.match_id));
            }

            let model = insert_prediction(&db_tx, new, user_id).await?;
            Prediction::try_from(model)
        })
    }

    /// Replace the guess of a prediction owned by `user_id`.
    pub async fn update_prediction(
        &self,
        prediction_id: i32,
        data: PredictionUpdate,
        user_id: Uuid,
    ) -> ResultEngine<Prediction> {
        with_tx!(self, |db_tx| {
            let model = self.require_prediction(&db_tx, prediction_id).await?;
            if model.user_id != user_id.to_string() {
                return Err(EngineError::UserIsNotAllowed(format!(
                    "prediction {prediction_id} belongs to another user"
                )));
            }
            util::validate_goals(data.home_goals, data.away_goals)?;
            self.require_open_match(&db_tx, model.match_id).await?;

            let mut active: predictions::ActiveModel = model.into();
            active.home_goals = ActiveValue::Set(Some(data.home_goals));
            active.away_goals = ActiveValue::Set(Some(data.away_goals));
            let model = active.update(&db_tx).await?;
            Prediction::try_from(model)
        })
    }

    /// A match that still accepts predictions.
    async fn require_open_match(
        &self,
        db: &DatabaseTransaction,
        match_id: i32,
    ) -> ResultEngine<matches::Model> {
        let model = self.require_match(db, match_id).await?;
        if model.status != MatchStatus::Upcoming {
            return Err(EngineError::UnexpectedMatchStatus(format!(
                "match {match_id} is {}, predictions are closed",
                model.status
            )));
        }
        Ok(model)
    }
}

/// Insert a guess, reporting a lost race on `(match_id, user_id)` as a duplicate.
async fn insert_prediction(
    db: &DatabaseTransaction,
    new: PredictionNew,
    user_id: Uuid,
) -> ResultEngine<predictions::Model> {
    match predictions::ActiveModel::new_prediction(new, user_id)
        .insert(db)
        .await
    {
        Ok(model) => Ok(model),
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(EngineError::PredictionAlreadyExists(new.match_id))
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use migration::MigratorTrait;
    use sea_orm::Database;

    use super::*;
    use crate::MatchNew;

    #[tokio::test]
    async fn unique_index_violation_is_a_duplicate() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        let engine = Engine::builder()
            .database(db.clone())
            .password_cost(4)
            .matches_count(1)
            .build()
            .await
            .unwrap();

        let event = engine
            .new_event(
                "Cup",
                Utc::now() + Duration::days(7),
                vec![MatchNew::new("Home", "Away", None)],
            )
            .await
            .unwrap();
        engine.run_event(event.id).await.unwrap();
        let user = engine.register("fan@example.com", "secret").await.unwrap();
        let new = PredictionNew {
            match_id: event.matches[0].id,
            home_goals: 1,
            away_goals: 0,
        };
        engine.create_prediction(new, user.id).await.unwrap();

        let db_tx = db.begin().await.unwrap();
        let err = insert_prediction(&db_tx, new, user.id).await.unwrap_err();
        assert_eq!(err, EngineError::PredictionAlreadyExists(new.match_id));
    }
}
