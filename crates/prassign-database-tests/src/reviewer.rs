use prassign_database_interface::DatabaseError;
use pretty_assertions::assert_eq;

use crate::{
    fixtures::{pull_request, seed_team},
    testcase::db_test_case,
};

#[tokio::test]
async fn assign() {
    db_test_case("reviewer_assign", |db| async move {
        let tx = db.begin().await?;

        assert!(matches!(
            db.reviewers_assign(&tx, "p1", &["bob".into()]).await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        seed_team(
            db.as_ref(),
            &tx,
            "core",
            &[("alice", true), ("bob", true), ("carol", true)],
        )
        .await?;
        db.pull_requests_create(&tx, pull_request("p1", "alice")).await?;

        assert!(matches!(
            db.reviewers_assign(&tx, "p1", &["zoe".into()]).await,
            Err(DatabaseError::UnknownUser(id)) if id == "zoe"
        ));

        db.reviewers_assign(&tx, "p1", &["carol".into(), "bob".into()])
            .await?;
        db.reviewers_assign(&tx, "p1", &["bob".into()]).await?;

        assert_eq!(
            db.reviewers_list(&tx, "p1").await?,
            vec!["carol".to_string(), "bob".to_string()]
        );
        assert_eq!(db.reviewers_list(&tx, "p2").await?, Vec::<String>::new());

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace() {
    db_test_case("reviewer_replace", |db| async move {
        let tx = db.begin().await?;
        seed_team(
            db.as_ref(),
            &tx,
            "core",
            &[("alice", true), ("bob", true), ("carol", true), ("dave", true)],
        )
        .await?;
        db.pull_requests_create(&tx, pull_request("p1", "alice")).await?;
        db.reviewers_assign(&tx, "p1", &["bob".into(), "carol".into()])
            .await?;

        assert!(matches!(
            db.reviewers_replace(&tx, "p2", "bob", "dave").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));
        assert!(matches!(
            db.reviewers_replace(&tx, "p1", "bob", "zoe").await,
            Err(DatabaseError::UnknownUser(_))
        ));
        assert!(matches!(
            db.reviewers_replace(&tx, "p1", "alice", "dave").await,
            Err(DatabaseError::ReviewerNotAssigned(pr, user)) if pr == "p1" && user == "alice"
        ));

        db.reviewers_replace(&tx, "p1", "bob", "dave").await?;
        assert_eq!(
            db.pull_requests_get_expect(&tx, "p1").await?.reviewers,
            vec!["dave".to_string(), "carol".to_string()]
        );

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn remove() {
    db_test_case("reviewer_remove", |db| async move {
        let tx = db.begin().await?;
        seed_team(
            db.as_ref(),
            &tx,
            "core",
            &[("alice", true), ("bob", true), ("carol", true), ("dave", true)],
        )
        .await?;
        db.pull_requests_create(&tx, pull_request("p1", "alice")).await?;
        db.reviewers_assign(&tx, "p1", &["bob".into(), "carol".into()])
            .await?;

        assert!(matches!(
            db.reviewers_remove(&tx, "p2", "bob").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));
        assert!(matches!(
            db.reviewers_remove(&tx, "p1", "dave").await,
            Err(DatabaseError::ReviewerNotAssigned(pr, user)) if pr == "p1" && user == "dave"
        ));

        db.reviewers_remove(&tx, "p1", "bob").await?;
        assert_eq!(db.reviewers_list(&tx, "p1").await?, vec!["carol".to_string()]);

        // A new reviewer goes after the remaining ones
        db.reviewers_assign(&tx, "p1", &["dave".into()]).await?;
        assert_eq!(
            db.reviewers_list(&tx, "p1").await?,
            vec!["carol".to_string(), "dave".to_string()]
        );

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}
