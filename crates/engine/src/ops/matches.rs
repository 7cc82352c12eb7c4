use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    EngineError, EventStatus, Match, MatchNew, MatchStatus, ResultEngine, matches, predictions,
    scoring::{self, Scoreline},
    util,
};

use super::{Engine, with_tx};

impl Engine {
    pub async fn match_by_id(&self, match_id: i32) -> ResultEngine<Match> {
        with_tx!(self, |db_tx| {
            self.require_match(&db_tx, match_id).await.map(Match::from)
        })
    }

    /// Add a match to an event still in `created` status.
    pub async fn create_match(&self, event_id: i32, new_match: MatchNew) -> ResultEngine<Match> {
        with_tx!(self, |db_tx| {
            let event = self.require_event(&db_tx, event_id).await?;
            if event.status != EventStatus::Created {
                return Err(EngineError::UnexpectedEventStatus(format!(
                    "matches can only be added to created events, event {event_id} is {}",
                    event.status
                )));
            }

            let model = new_match.into_active_model(event_id)?.insert(&db_tx).await?;
            tracing::info!(
                "event {event_id}: added match {} ({} - {})",
                model.id,
                model.home_team,
                model.away_team
            );
            Ok(Match::from(model))
        })
    }

    /// `upcoming → ongoing`; predictions are closed from now on.
    pub async fn start_match(&self, match_id: i32) -> ResultEngine<Match> {
        with_tx!(self, |db_tx| {
            let model = self.require_match(&db_tx, match_id).await?;
            if model.status != MatchStatus::Upcoming {
                return Err(EngineError::UnexpectedMatchStatus(format!(
                    "match {match_id} is {}, expected upcoming",
                    model.status
                )));
            }

            let mut active: matches::ActiveModel = model.into();
            active.status = ActiveValue::Set(MatchStatus::Ongoing);
            let model = active.update(&db_tx).await?;
            tracing::info!("match {match_id} started");
            Ok(Match::from(model))
        })
    }

    /// Record the final score and award points to every prediction on the
    /// match.
    pub async fn finish_match(
        &self,
        match_id: i32,
        home_goals: i32,
        away_goals: i32,
    ) -> ResultEngine<Match> {
        util::validate_goals(home_goals, away_goals)?;
        let scoreline = Scoreline::new(home_goals, away_goals);

        with_tx!(self, |db_tx| {
            let model = self.require_match(&db_tx, match_id).await?;
            if model.status == MatchStatus::Completed {
                return Err(EngineError::MatchAlreadyIsCompleted(match_id));
            }

            let mut active: matches::ActiveModel = model.into();
            active.home_goals = ActiveValue::Set(Some(home_goals));
            active.away_goals = ActiveValue::Set(Some(away_goals));
            active.status = ActiveValue::Set(MatchStatus::Completed);
            let model = active.update(&db_tx).await?;

            let scored = predictions::Entity::find()
                .filter(predictions::Column::MatchId.eq(match_id))
                .all(&db_tx)
                .await?;
            let count = scored.len();
            for prediction in scored {
                let points = scoring::points(scoreline, prediction.guess());
                let mut active: predictions::ActiveModel = prediction.into();
                active.points = ActiveValue::Set(Some(points));
                active.update(&db_tx).await?;
            }

            tracing::info!(
                "match {match_id} finished {home_goals}-{away_goals}, scored {count} predictions"
            );
            Ok(Match::from(model))
        })
    }

    /// Delete a match together with its predictions.
    pub async fn delete_match(&self, match_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_match(&db_tx, match_id).await?;
            model.delete(&db_tx).await?;
            tracing::info!("deleted match {match_id}");
            Ok(())
        })
    }
}
