use sea_orm::{ConnectionTrait, Statement};

use engine::{EngineError, MatchStatus, PredictionNew, PredictionUpdate};

mod common;
use common::{engine_with_db, event_with_matches, running_event, user};

fn guess(match_id: i32, home_goals: i32, away_goals: i32) -> PredictionNew {
    PredictionNew {
        match_id,
        home_goals,
        away_goals,
    }
}

#[tokio::test]
async fn one_prediction_per_user_and_match() {
    let (engine, _db) = engine_with_db().await;
    let event = running_event(&engine, "Cup").await;
    let alice = user(&engine, "alice@example.com").await;
    let bob = user(&engine, "bob@example.com").await;
    let match_id = event.matches[0].id;

    let first = engine
        .create_prediction(guess(match_id, 1, 0), alice.id)
        .await
        .unwrap();
    assert_eq!(first.user_id, alice.id);
    assert_eq!(first.points, None);

    let err = engine
        .create_prediction(guess(match_id, 3, 3), alice.id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::PredictionAlreadyExists(match_id));

    engine
        .create_prediction(guess(match_id, 3, 3), bob.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn storage_rejects_duplicate_predictions() {
    let (engine, db) = engine_with_db().await;
    let event = running_event(&engine, "Cup").await;
    let alice = user(&engine, "alice@example.com").await;
    let match_id = event.matches[0].id;
    engine
        .create_prediction(guess(match_id, 1, 0), alice.id)
        .await
        .unwrap();

    let backend = db.get_database_backend();
    let res = db
        .execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO predictions (home_goals, away_goals, match_id, user_id) VALUES (?, ?, ?, ?)",
            vec![2.into(), 2.into(), match_id.into(), alice.id.to_string().into()],
        ))
        .await;
    assert!(res.is_err());
}

#[tokio::test]
async fn predictions_need_an_upcoming_match_and_sane_goals() {
    let (engine, _db) = engine_with_db().await;
    let event = running_event(&engine, "Cup").await;
    let alice = user(&engine, "alice@example.com").await;
    let match_id = event.matches[0].id;

    let err = engine
        .create_prediction(guess(match_id, 10, 0), alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let err = engine
        .create_prediction(guess(999, 1, 0), alice.id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::MatchNotFound(999));

    engine.start_match(match_id).await.unwrap();
    let err = engine
        .create_prediction(guess(match_id, 1, 0), alice.id)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::UnexpectedMatchStatus(format!(
            "match {match_id} is {}, predictions are closed",
            MatchStatus::Ongoing
        ))
    );
}

#[tokio::test]
async fn only_the_owner_updates_a_prediction() {
    let (engine, _db) = engine_with_db().await;
    let event = running_event(&engine, "Cup").await;
    let alice = user(&engine, "alice@example.com").await;
    let mallory = user(&engine, "mallory@example.com").await;
    let match_id = event.matches[0].id;
    let prediction = engine
        .create_prediction(guess(match_id, 1, 0), alice.id)
        .await
        .unwrap();

    let change = PredictionUpdate {
        home_goals: 2,
        away_goals: 2,
    };
    let err = engine
        .update_prediction(prediction.id, change, mallory.id)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::UserIsNotAllowed(format!(
            "prediction {} belongs to another user",
            prediction.id
        ))
    );

    let updated = engine
        .update_prediction(prediction.id, change, alice.id)
        .await
        .unwrap();
    assert_eq!((updated.home_goals, updated.away_goals), (Some(2), Some(2)));

    engine.start_match(match_id).await.unwrap();
    let err = engine
        .update_prediction(prediction.id, change, alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::UnexpectedMatchStatus(_)));

    assert_eq!(
        engine
            .update_prediction(4242, change, alice.id)
            .await
            .unwrap_err(),
        EngineError::PredictionNotFound(4242)
    );
}

#[tokio::test]
async fn finishing_a_match_scores_its_predictions() {
    let (engine, _db) = engine_with_db().await;
    let event = running_event(&engine, "Cup").await;
    let match_id = event.matches[0].id;
    let other_match = event.matches[1].id;

    let mut ids = Vec::new();
    for (email, home, away) in [
        ("exact@example.com", 2, 2),
        ("draw@example.com", 0, 0),
        ("wrong@example.com", 2, 0),
    ] {
        let player = user(&engine, email).await;
        let prediction = engine
            .create_prediction(guess(match_id, home, away), player.id)
            .await
            .unwrap();
        ids.push(prediction.id);
    }
    let untouched = engine
        .create_prediction(guess(other_match, 2, 2), user(&engine, "x@example.com").await.id)
        .await
        .unwrap();

    engine.finish_match(match_id, 2, 2).await.unwrap();

    let mut points = Vec::new();
    for id in ids {
        points.push(engine.prediction_by_id(id).await.unwrap().points);
    }
    assert_eq!(points, [Some(3), Some(1), Some(0)]);
    assert_eq!(
        engine.prediction_by_id(untouched.id).await.unwrap().points,
        None
    );
}

#[tokio::test]
async fn predictions_are_listed_per_event_and_user() {
    let (engine, _db) = engine_with_db().await;
    let event = running_event(&engine, "Cup").await;
    let other = running_event(&engine, "Other").await;
    let alice = user(&engine, "alice@example.com").await;
    let bob = user(&engine, "bob@example.com").await;

    for m in event.matches.iter().take(2) {
        engine
            .create_prediction(guess(m.id, 1, 1), alice.id)
            .await
            .unwrap();
    }
    engine
        .create_prediction(guess(event.matches[0].id, 0, 1), bob.id)
        .await
        .unwrap();
    engine
        .create_prediction(guess(other.matches[0].id, 0, 1), alice.id)
        .await
        .unwrap();

    let listed = engine.predictions_for_event(event.id, alice.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|p| p.user_id == alice.id));
    assert!(
        listed
            .iter()
            .all(|p| event.matches.iter().any(|m| m.id == p.match_id))
    );

    let draft = event_with_matches(&engine, "Draft", 1).await;
    assert!(
        engine
            .predictions_for_event(draft.id, alice.id)
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        engine
            .predictions_for_event(777, alice.id)
            .await
            .unwrap_err(),
        EngineError::EventNotFound(777)
    );
}

#[tokio::test]
async fn deletes_cascade_to_predictions() {
    let (engine, _db) = engine_with_db().await;
    let event = running_event(&engine, "Cup").await;
    let alice = user(&engine, "alice@example.com").await;
    let bob = user(&engine, "bob@example.com").await;

    let by_alice = engine
        .create_prediction(guess(event.matches[0].id, 1, 0), alice.id)
        .await
        .unwrap();
    let by_bob = engine
        .create_prediction(guess(event.matches[1].id, 1, 0), bob.id)
        .await
        .unwrap();

    engine.delete_user(alice.id).await.unwrap();
    assert_eq!(
        engine.prediction_by_id(by_alice.id).await.unwrap_err(),
        EngineError::PredictionNotFound(by_alice.id)
    );

    engine.delete_match(event.matches[1].id).await.unwrap();
    assert_eq!(
        engine.prediction_by_id(by_bob.id).await.unwrap_err(),
        EngineError::PredictionNotFound(by_bob.id)
    );
}
