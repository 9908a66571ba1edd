use prassign_database_interface::DatabaseError;
use prassign_models::PullRequestStatus;
use pretty_assertions::assert_eq;
use time::macros::datetime;

use crate::{
    fixtures::{pull_request, seed_team},
    testcase::db_test_case,
};

#[tokio::test]
async fn create() {
    db_test_case("pull_request_create", |db| async move {
        let tx = db.begin().await?;

        assert!(matches!(
            db.pull_requests_create(&tx, pull_request("p1", "alice")).await,
            Err(DatabaseError::UnknownUser(id)) if id == "alice"
        ));

        seed_team(db.as_ref(), &tx, "core", &[("alice", true), ("bob", true)]).await?;

        let mut instance = pull_request("p1", "alice");
        instance.reviewers = vec!["bob".into()];
        let created = db.pull_requests_create(&tx, instance).await?;
        assert_eq!(created, pull_request("p1", "alice"));

        assert!(matches!(
            db.pull_requests_create(&tx, pull_request("p1", "bob")).await,
            Err(DatabaseError::PullRequestAlreadyExists(id)) if id == "p1"
        ));

        assert_eq!(db.pull_requests_get(&tx, "p1").await?, Some(created));
        assert_eq!(db.pull_requests_get(&tx, "p2").await?, None);
        assert!(matches!(
            db.pull_requests_get_expect(&tx, "p2").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn lock() {
    db_test_case("pull_request_lock", |db| async move {
        let tx = db.begin().await?;
        seed_team(db.as_ref(), &tx, "core", &[("alice", true), ("bob", true)]).await?;
        db.pull_requests_create(&tx, pull_request("p1", "alice")).await?;
        db.reviewers_assign(&tx, "p1", &["bob".into()]).await?;

        let locked = db.pull_requests_lock(&tx, "p1").await?.unwrap();
        assert_eq!(locked.reviewers, vec!["bob".to_string()]);
        assert_eq!(db.pull_requests_lock(&tx, "p2").await?, None);

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn merge() {
    db_test_case("pull_request_merge", |db| async move {
        let tx = db.begin().await?;

        assert!(matches!(
            db.pull_requests_merge(&tx, "p1", datetime!(2024-03-02 12:00 UTC)).await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        seed_team(db.as_ref(), &tx, "core", &[("alice", true)]).await?;
        db.pull_requests_create(&tx, pull_request("p1", "alice")).await?;

        let merged = db
            .pull_requests_merge(&tx, "p1", datetime!(2024-03-02 12:00 UTC))
            .await?;
        assert_eq!(merged.status, PullRequestStatus::Merged);
        assert_eq!(merged.merged_at, Some(datetime!(2024-03-02 12:00 UTC)));

        // Merging twice keeps the first merge date.
        let again = db
            .pull_requests_merge(&tx, "p1", datetime!(2024-03-05 12:00 UTC))
            .await?;
        assert_eq!(again, merged);

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_reviewing() {
    db_test_case("pull_request_list_reviewing", |db| async move {
        let tx = db.begin().await?;
        seed_team(
            db.as_ref(),
            &tx,
            "core",
            &[("alice", true), ("bob", true), ("carol", true)],
        )
        .await?;

        assert_eq!(db.pull_requests_list_reviewing(&tx, "bob").await?, vec![]);

        db.pull_requests_create(&tx, pull_request("p2", "alice")).await?;
        db.pull_requests_create(&tx, pull_request("p1", "alice")).await?;
        db.pull_requests_create(&tx, pull_request("p3", "carol")).await?;
        db.reviewers_assign(&tx, "p2", &["bob".into(), "carol".into()])
            .await?;
        db.reviewers_assign(&tx, "p1", &["bob".into()]).await?;
        db.reviewers_assign(&tx, "p3", &["alice".into()]).await?;

        let reviewing = db.pull_requests_list_reviewing(&tx, "bob").await?;
        assert_eq!(
            reviewing.iter().map(|pr| pr.id.as_str()).collect::<Vec<_>>(),
            vec!["p1", "p2"]
        );
        assert_eq!(
            reviewing[1].reviewers,
            vec!["bob".to_string(), "carol".to_string()]
        );

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}
