use prassign_database_interface::DatabaseError;
use prassign_models::{PullRequestCounts, Team, TeamMember};
use pretty_assertions::assert_eq;
use time::macros::datetime;

use crate::{
    fixtures::{pull_request, seed_team, user},
    testcase::db_test_case,
};

#[tokio::test]
async fn create() {
    db_test_case("team_create", |db| async move {
        let tx = db.begin().await?;

        db.teams_create(&tx, "core").await?;
        assert!(matches!(
            db.teams_create(&tx, "core").await,
            Err(DatabaseError::TeamAlreadyExists(name)) if name == "core"
        ));
        db.teams_create(&tx, "infra").await?;

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get() {
    db_test_case("team_get", |db| async move {
        let tx = db.begin().await?;

        assert_eq!(db.teams_get(&tx, "core").await?, None);
        assert!(matches!(
            db.teams_get_expect(&tx, "core").await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        seed_team(db.as_ref(), &tx, "core", &[("carol", true), ("alice", true), ("bob", false)])
            .await?;
        seed_team(db.as_ref(), &tx, "infra", &[("dan", true)]).await?;

        assert_eq!(
            db.teams_get_expect(&tx, "core").await?,
            Team {
                team_name: "core".into(),
                members: vec![
                    TeamMember::from(user("alice", "core", true)),
                    TeamMember::from(user("bob", "core", false)),
                    TeamMember::from(user("carol", "core", true)),
                ]
            }
        );

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn deactivate_members() {
    db_test_case("team_deactivate_members", |db| async move {
        let tx = db.begin().await?;

        assert!(matches!(
            db.teams_deactivate_members(&tx, "core").await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        seed_team(db.as_ref(), &tx, "core", &[("alice", true), ("bob", true)]).await?;
        seed_team(db.as_ref(), &tx, "infra", &[("dan", true)]).await?;
        db.teams_deactivate_members(&tx, "core").await?;

        let core = db.teams_get_expect(&tx, "core").await?;
        assert!(core.members.iter().all(|m| !m.is_active));
        assert!(db.users_get_expect(&tx, "dan").await?.is_active);

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn pull_request_counts() {
    db_test_case("team_pull_request_counts", |db| async move {
        let tx = db.begin().await?;

        assert!(matches!(
            db.teams_pull_request_counts(&tx, "core").await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        seed_team(db.as_ref(), &tx, "core", &[("alice", true), ("bob", true)]).await?;
        seed_team(db.as_ref(), &tx, "infra", &[("dan", true)]).await?;
        assert_eq!(
            db.teams_pull_request_counts(&tx, "core").await?,
            PullRequestCounts::default()
        );

        db.pull_requests_create(&tx, pull_request("p1", "alice")).await?;
        db.pull_requests_create(&tx, pull_request("p2", "bob")).await?;
        db.pull_requests_create(&tx, pull_request("p3", "dan")).await?;
        db.pull_requests_merge(&tx, "p2", datetime!(2024-03-02 12:00 UTC))
            .await?;

        assert_eq!(
            db.teams_pull_request_counts(&tx, "core").await?,
            PullRequestCounts {
                total: 2,
                open: 1,
                merged: 1
            }
        );

        db.commit(tx).await?;
        Ok(())
    })
    .await;
}
