use prassign_database_interface::DatabaseError;
use pretty_assertions::assert_eq;

use crate::{
    fixtures::{seed_team, user},
    testcase::db_test_case,
};

#[tokio::test]
async fn create() {
    db_test_case("user_create", |db| async move {
        let tx = db.begin().await?;

        assert!(matches!(
            db.users_create(&tx, user("alice", "core", true)).await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        db.teams_create(&tx, "core").await?;
        let created = db.users_create(&tx, user("alice", "core", true)).await?;
        assert_eq!(created, user("alice", "core", true));

        assert!(matches!(
            db.users_create(&tx, user("alice", "core", false)).await,
            Err(DatabaseError::UserAlreadyExists(id)) if id == "alice"
        ));
        assert_eq!(db.users_get(&tx, "alice").await?, Some(created));

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn update() {
    db_test_case("user_update", |db| async move {
        let tx = db.begin().await?;
        seed_team(db.as_ref(), &tx, "core", &[("alice", true)]).await?;
        db.teams_create(&tx, "infra").await?;

        assert!(matches!(
            db.users_update(&tx, user("bob", "core", true)).await,
            Err(DatabaseError::UnknownUser(_))
        ));
        assert!(matches!(
            db.users_update(&tx, user("alice", "unknown", true)).await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        let mut moved = user("alice", "infra", false);
        moved.username = "Alice".into();
        db.users_update(&tx, moved.clone()).await?;

        assert_eq!(db.users_get_expect(&tx, "alice").await?, moved);
        assert!(db.teams_get_expect(&tx, "core").await?.members.is_empty());
        assert_eq!(db.teams_get_expect(&tx, "infra").await?.members.len(), 1);

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_active() {
    db_test_case("user_set_active", |db| async move {
        let tx = db.begin().await?;

        assert!(matches!(
            db.users_set_active(&tx, "alice", false).await,
            Err(DatabaseError::UnknownUser(_))
        ));

        seed_team(db.as_ref(), &tx, "core", &[("alice", true)]).await?;
        assert!(!db.users_set_active(&tx, "alice", false).await?.is_active);
        assert!(db.users_set_active(&tx, "alice", true).await?.is_active);
        assert!(db.users_get_expect(&tx, "alice").await?.is_active);

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}
