#![allow(dead_code)]

use chrono::{Duration, Utc};
use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, Event, MatchNew, User};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .password_cost(4)
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub fn fixtures(count: usize) -> Vec<MatchNew> {
    (0..count)
        .map(|i| {
            MatchNew::new(
                &format!("Home {i}"),
                &format!("Away {i}"),
                Some(Utc::now() + Duration::hours(i as i64 + 1)),
            )
        })
        .collect()
}

/// An event in `created` status holding `count` matches.
pub async fn event_with_matches(engine: &Engine, name: &str, count: usize) -> Event {
    engine
        .new_event(name, Utc::now() + Duration::days(7), fixtures(count))
        .await
        .unwrap()
}

/// An event already moved to `upcoming`, so its matches accept predictions.
pub async fn running_event(engine: &Engine, name: &str) -> Event {
    let event = event_with_matches(engine, name, engine.matches_count()).await;
    engine.run_event(event.id).await.unwrap()
}

pub async fn user(engine: &Engine, email: &str) -> User {
    engine.register(email, "secret").await.unwrap()
}
