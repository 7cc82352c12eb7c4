use sea_orm::Database;

use engine::{Engine, EngineError};

mod common;
use common::{engine_with_db, user};

#[tokio::test]
async fn register_normalizes_the_email() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .register("  Alice@Example.COM ", "secret")
        .await
        .unwrap();
    assert_eq!(created.email, "alice@example.com");
    assert!(created.is_active);
    assert!(!created.is_superuser);

    assert_eq!(engine.user(created.id).await.unwrap(), created);
    assert_eq!(
        engine.user_by_email("ALICE@example.com").await.unwrap(),
        created
    );
}

#[tokio::test]
async fn register_rejects_duplicates_and_bad_input() {
    let (engine, _db) = engine_with_db().await;
    user(&engine, "alice@example.com").await;

    assert_eq!(
        engine
            .register("ALICE@example.com", "other")
            .await
            .unwrap_err(),
        EngineError::UserAlreadyExists("alice@example.com".to_string())
    );
    for email in ["", "alice", "alice@", "@example.com", "a b@example.com", "a@b"] {
        let err = engine.register(email, "secret").await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)), "{email:?}");
    }
    let err = engine.register("bob@example.com", "").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn authenticate_checks_password_and_activity() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;

    let logged = engine
        .authenticate("Alice@Example.com", "secret")
        .await
        .unwrap();
    assert_eq!(logged.id, alice.id);

    for (email, password) in [
        ("alice@example.com", "wrong"),
        ("nobody@example.com", "secret"),
        ("not-an-email", "secret"),
    ] {
        assert_eq!(
            engine.authenticate(email, password).await.unwrap_err(),
            EngineError::InvalidEmailOrPassword
        );
    }

    engine.set_active(alice.id, false).await.unwrap();
    assert_eq!(
        engine
            .authenticate("alice@example.com", "secret")
            .await
            .unwrap_err(),
        EngineError::InvalidEmailOrPassword
    );
}

#[tokio::test]
async fn superuser_flag_and_deletion() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;

    assert!(engine.set_superuser(alice.id, true).await.unwrap().is_superuser);
    assert!(engine.user(alice.id).await.unwrap().is_superuser);
    assert!(!engine.set_superuser(alice.id, false).await.unwrap().is_superuser);

    engine.delete_user(alice.id).await.unwrap();
    assert_eq!(
        engine.user(alice.id).await.unwrap_err(),
        EngineError::UserNotFound(alice.id.to_string())
    );
    assert_eq!(
        engine.set_superuser(alice.id, true).await.unwrap_err(),
        EngineError::UserNotFound(alice.id.to_string())
    );
}

#[tokio::test]
async fn builder_rejects_invalid_settings() {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let err = Engine::builder()
        .database(db.clone())
        .matches_count(0)
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let err = Engine::builder()
        .database(db.clone())
        .password_cost(2)
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let engine = Engine::builder()
        .database(db)
        .matches_count(3)
        .build()
        .await
        .unwrap();
    assert_eq!(engine.matches_count(), 3);
}
