use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Event, Match, ResultEngine, events, matches, predictions, users,
};

use super::Engine;

/// Generates a `require_*` lookup that turns a missing row into the matching
/// not-found error.
macro_rules! impl_require_by_id {
    ($require_fn:ident, $entity:path, $model:path, $not_found:path) => {
        pub(super) async fn $require_fn(
            &self,
            db: &DatabaseTransaction,
            id: i32,
        ) -> ResultEngine<$model> {
            <$entity>::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| $not_found(id))
        }
    };
}

impl Engine {
    impl_require_by_id!(
        require_event,
        events::Entity,
        events::Model,
        EngineError::EventNotFound
    );

    impl_require_by_id!(
        require_match,
        matches::Entity,
        matches::Model,
        EngineError::MatchNotFound
    );

    impl_require_by_id!(
        require_prediction,
        predictions::Entity,
        predictions::Model,
        EngineError::PredictionNotFound
    );

    pub(super) async fn require_user(
        &self,
        db: &DatabaseTransaction,
        user_id: Uuid,
    ) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(user_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::UserNotFound(user_id.to_string()))
    }

    pub(super) async fn find_user_by_email(
        &self,
        db: &DatabaseTransaction,
        email: &str,
    ) -> ResultEngine<Option<users::Model>> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await
            .map_err(Into::into)
    }

    /// Matches of one event, ordered by kick-off.
    pub(super) async fn event_matches(
        &self,
        db: &DatabaseTransaction,
        event_id: i32,
    ) -> ResultEngine<Vec<Match>> {
        let models = matches::Entity::find()
            .filter(matches::Column::EventId.eq(event_id))
            .order_by_asc(matches::Column::StartTime)
            .order_by_asc(matches::Column::Id)
            .all(db)
            .await?;
        Ok(models.into_iter().map(Match::from).collect())
    }

    /// Build the read projection of an event.
    pub(super) async fn load_event(
        &self,
        db: &DatabaseTransaction,
        model: events::Model,
    ) -> ResultEngine<Event> {
        let matches = self.event_matches(db, model.id).await?;
        Ok(Event::from_parts(model, matches))
    }
}
