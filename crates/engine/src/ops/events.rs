use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};

use crate::{
    EngineError, Event, EventStatus, Match, MatchNew, ResultEngine,
    events::{self, next_status},
    matches, util,
};

use super::{Engine, with_tx};

/// Largest page `events` returns.
const MAX_PAGE_SIZE: u64 = 100;

impl Engine {
    /// List events ordered by deadline.
    ///
    /// Events still being prepared (`created`) are only listed in admin mode.
    /// The storage binds `offset` as a signed 64-bit integer.
    pub async fn events(&self, admin_mode: bool, offset: u64, limit: u64) -> ResultEngine<Vec<Event>> {
        if i64::try_from(offset).is_err() {
            return Err(EngineError::InvalidInput(format!(
                "offset {offset} is out of range"
            )));
        }

        with_tx!(self, |db_tx| {
            let mut query = events::Entity::find();
            if !admin_mode {
                query = query.filter(events::Column::Status.ne(EventStatus::Created));
            }
            let models = query
                .order_by_asc(events::Column::Deadline)
                .order_by_asc(events::Column::Id)
                .offset(offset)
                .limit(limit.min(MAX_PAGE_SIZE))
                .all(&db_tx)
                .await?;

            let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
            let mut grouped: HashMap<i32, Vec<Match>> = HashMap::new();
            if !ids.is_empty() {
                let match_models = matches::Entity::find()
                    .filter(matches::Column::EventId.is_in(ids))
                    .order_by_asc(matches::Column::StartTime)
                    .order_by_asc(matches::Column::Id)
                    .all(&db_tx)
                    .await?;
                for model in match_models {
                    grouped.entry(model.event_id).or_default().push(model.into());
                }
            }

            Ok(models
                .into_iter()
                .map(|model| {
                    let matches = grouped.remove(&model.id).unwrap_or_default();
                    Event::from_parts(model, matches)
                })
                .collect())
        })
    }

    /// Return an event with its matches.
    pub async fn event(&self, event_id: i32) -> ResultEngine<Event> {
        with_tx!(self, |db_tx| {
            let model = self.require_event(&db_tx, event_id).await?;
            self.load_event(&db_tx, model).await
        })
    }

    /// Create an event in `created` status, optionally with its first matches.
    pub async fn new_event(
        &self,
        name: &str,
        deadline: DateTime<Utc>,
        new_matches: Vec<MatchNew>,
    ) -> ResultEngine<Event> {
        let name = util::normalize_name(name, "event name", 1)?;

        with_tx!(self, |db_tx| {
            let model = events::ActiveModel::new_event(name, deadline)
                .insert(&db_tx)
                .await?;
            for new_match in new_matches {
                new_match.into_active_model(model.id)?.insert(&db_tx).await?;
            }
            tracing::info!("created event {} ({})", model.id, model.name);
            self.load_event(&db_tx, model).await
        })
    }

    /// Delete an event; its matches and their predictions go with it.
    pub async fn delete_event(&self, event_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_event(&db_tx, event_id).await?;
            model.delete(&db_tx).await?;
            tracing::info!("deleted event {event_id}");
            Ok(())
        })
    }

    /// Move an event one step up its ladder.
    pub async fn upgrade_event(&self, event_id: i32) -> ResultEngine<Event> {
        self.advance_event(event_id, None).await
    }

    /// `created → upcoming`
    pub async fn run_event(&self, event_id: i32) -> ResultEngine<Event> {
        self.advance_event(event_id, Some(EventStatus::Created)).await
    }

    /// `upcoming → ongoing`
    pub async fn start_event(&self, event_id: i32) -> ResultEngine<Event> {
        self.advance_event(event_id, Some(EventStatus::Upcoming)).await
    }

    /// `ongoing → closed`
    pub async fn close_event(&self, event_id: i32) -> ResultEngine<Event> {
        self.advance_event(event_id, Some(EventStatus::Ongoing)).await
    }

    /// `closed → completed`
    pub async fn finish_event(&self, event_id: i32) -> ResultEngine<Event> {
        self.advance_event(event_id, Some(EventStatus::Closed)).await
    }

    /// Cancel an event that has not completed yet.
    pub async fn cancel_event(&self, event_id: i32) -> ResultEngine<Event> {
        self.branch_event(event_id, EventStatus::Cancelled, |status| {
            status < EventStatus::Completed
        })
        .await
    }

    /// Archive a completed event.
    pub async fn archive_event(&self, event_id: i32) -> ResultEngine<Event> {
        self.branch_event(event_id, EventStatus::Archived, |status| {
            status == EventStatus::Completed
        })
        .await
    }

    async fn advance_event(
        &self,
        event_id: i32,
        expected: Option<EventStatus>,
    ) -> ResultEngine<Event> {
        with_tx!(self, |db_tx| {
            let model = self.require_event(&db_tx, event_id).await?;
            if let Some(expected) = expected
                && model.status != expected
            {
                return Err(EngineError::UnexpectedEventStatus(format!(
                    "event {event_id} is {}, expected {expected}",
                    model.status
                )));
            }

            let matches = self.event_matches(&db_tx, event_id).await?;
            let previous = model.status;
            let next = next_status(event_id, previous, &matches, self.matches_count)?;

            let mut active: events::ActiveModel = model.into();
            active.status = ActiveValue::Set(next);
            let model = active.update(&db_tx).await?;
            tracing::info!("event {event_id}: {previous} -> {next}");

            Ok(Event::from_parts(model, matches))
        })
    }

    async fn branch_event(
        &self,
        event_id: i32,
        target: EventStatus,
        allowed_from: impl Fn(EventStatus) -> bool,
    ) -> ResultEngine<Event> {
        with_tx!(self, |db_tx| {
            let model = self.require_event(&db_tx, event_id).await?;
            let previous = model.status;
            if !allowed_from(previous) {
                return Err(EngineError::UnexpectedEventStatus(format!(
                    "event {event_id} is {previous}, it cannot become {target}"
                )));
            }

            let mut active: events::ActiveModel = model.into();
            active.status = ActiveValue::Set(target);
            let model = active.update(&db_tx).await?;
            tracing::info!("event {event_id}: {previous} -> {target}");

            self.load_event(&db_tx, model).await
        })
    }
}
