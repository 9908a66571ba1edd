use prassign_database_interface::DatabaseError;
use pretty_assertions::assert_eq;

use crate::{fixtures::seed_team, testcase::db_test_case};

#[tokio::test]
async fn commit() {
    db_test_case("transaction_commit", |db| async move {
        let tx = db.begin().await?;
        seed_team(db.as_ref(), &tx, "core", &[("alice", true)]).await?;
        db.commit(tx).await?;

        let tx = db.begin().await?;
        assert_eq!(db.teams_get_expect(&tx, "core").await?.members.len(), 1);
        db.rollback(tx).await?;
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn rollback() {
    db_test_case("transaction_rollback", |db| async move {
        let tx = db.begin().await?;
        seed_team(db.as_ref(), &tx, "core", &[("alice", true)]).await?;
        db.rollback(tx).await?;

        let tx = db.begin().await?;
        assert_eq!(db.teams_get(&tx, "core").await?, None);
        assert_eq!(db.users_get(&tx, "alice").await?, None);
        db.rollback(tx).await?;
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn closed() {
    db_test_case("transaction_closed", |db| async move {
        let tx = db.begin().await?;
        let shared = tx.clone();
        db.commit(tx).await?;

        assert!(matches!(
            db.teams_create(&shared, "core").await,
            Err(DatabaseError::TransactionClosed(id)) if id == shared.id()
        ));
        assert!(matches!(
            db.commit(shared).await,
            Err(DatabaseError::TransactionClosed(_))
        ));
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn shared_between_tasks() {
    db_test_case("transaction_shared_between_tasks", |db| async move {
        let tx = db.begin().await?;
        db.teams_create(&tx, "core").await?;

        let db_ref = db.as_ref();
        let results = futures::future::join_all((0..4).map(|i| {
            let tx = tx.clone();
            async move {
                db_ref
                    .users_create(&tx, crate::fixtures::user(&format!("user{i}"), "core", true))
                    .await
            }
        }))
        .await;
        for result in results {
            result?;
        }

        assert_eq!(db.teams_get_expect(&tx, "core").await?.members.len(), 4);
        db.commit(tx).await?;
        Ok(())
    })
    .await;
}
