use engine::{EngineError, EventStatus, MatchNew, MatchStatus, Scoreline};

mod common;
use common::{engine_with_db, event_with_matches, running_event};

#[tokio::test]
async fn matches_are_added_only_while_the_event_is_created() {
    let (engine, _db) = engine_with_db().await;
    let event = event_with_matches(&engine, "Cup", 4).await;

    let added = engine
        .create_match(event.id, MatchNew::new("Lions", "Tigers", None))
        .await
        .unwrap();
    assert_eq!(added.event_id, event.id);
    assert_eq!(added.status, MatchStatus::Upcoming);

    let event = engine.run_event(event.id).await.unwrap();
    assert_eq!(event.status, EventStatus::Upcoming);
    assert_eq!(event.matches.len(), 5);

    let err = engine
        .create_match(event.id, MatchNew::new("Bears", "Wolves", None))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::UnexpectedEventStatus(_)));

    let err = engine
        .create_match(999, MatchNew::new("Bears", "Wolves", None))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::EventNotFound(999));
}

#[tokio::test]
async fn start_only_moves_upcoming_matches() {
    let (engine, _db) = engine_with_db().await;
    let event = running_event(&engine, "Cup").await;
    let match_id = event.matches[0].id;

    let started = engine.start_match(match_id).await.unwrap();
    assert_eq!(started.status, MatchStatus::Ongoing);

    let err = engine.start_match(match_id).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::UnexpectedMatchStatus(format!(
            "match {match_id} is ongoing, expected upcoming"
        ))
    );
    assert_eq!(
        engine.start_match(31337).await.unwrap_err(),
        EngineError::MatchNotFound(31337)
    );
}

#[tokio::test]
async fn finish_records_the_score_once() {
    let (engine, _db) = engine_with_db().await;
    let event = running_event(&engine, "Cup").await;
    let match_id = event.matches[1].id;

    let finished = engine.finish_match(match_id, 2, 1).await.unwrap();
    assert_eq!(finished.status, MatchStatus::Completed);
    assert_eq!(finished.scoreline(), Some(Scoreline::new(2, 1)));

    let err = engine.finish_match(match_id, 0, 0).await.unwrap_err();
    assert_eq!(err, EngineError::MatchAlreadyIsCompleted(match_id));
    assert_eq!(
        engine.match_by_id(match_id).await.unwrap().scoreline(),
        Some(Scoreline::new(2, 1))
    );
}

#[tokio::test]
async fn finish_rejects_goals_out_of_range() {
    let (engine, _db) = engine_with_db().await;
    let event = running_event(&engine, "Cup").await;
    let match_id = event.matches[0].id;

    for (home, away) in [(-1, 0), (0, 10)] {
        let err = engine.finish_match(match_id, home, away).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)), "{home}-{away}");
    }
    assert_eq!(
        engine.match_by_id(match_id).await.unwrap().status,
        MatchStatus::Upcoming
    );
}

#[tokio::test]
async fn deleting_a_match_leaves_the_event() {
    let (engine, _db) = engine_with_db().await;
    let event = event_with_matches(&engine, "Cup", 3).await;
    let match_id = event.matches[0].id;

    engine.delete_match(match_id).await.unwrap();

    assert_eq!(
        engine.match_by_id(match_id).await.unwrap_err(),
        EngineError::MatchNotFound(match_id)
    );
    assert_eq!(engine.event(event.id).await.unwrap().matches.len(), 2);
    assert_eq!(
        engine.delete_match(match_id).await.unwrap_err(),
        EngineError::MatchNotFound(match_id)
    );
}
