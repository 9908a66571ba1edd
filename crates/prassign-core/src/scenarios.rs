//! End-to-end behaviors of the assignment use cases on the memory backend.

use std::collections::HashSet;

use prassign_database_interface::{ReviewerStore, TxManager};
use pretty_assertions::assert_eq;
use shaku::HasComponent;

use crate::{
    context::tests::CoreContextTest,
    use_cases::{
        pulls::{CreatePullRequestInterface, MergePullRequestInterface, ReassignPullRequestInterface},
        reviews::CascadeReassignForDeactivatedMembersInterface,
        teams::{DeactivateTeamInterface, GetTeamInterface},
        users::{ListUserReviewsInterface, SetUserIsActiveInterface},
    },
    DomainError,
};

fn as_set(values: &[String]) -> HashSet<&str> {
    values.iter().map(String::as_str).collect()
}

async fn create_pull_request(ctx: &CoreContextTest, id: &str, author_id: &str) -> Vec<String> {
    let create: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
    create
        .run(&ctx.as_context(), id, "Feature", author_id)
        .await
        .unwrap()
        .reviewers
}

#[tokio::test]
async fn scenario_a_three_member_team() {
    let ctx = CoreContextTest::new();
    ctx.seed_team("core", &[("alice", true), ("bob", true), ("carol", true)])
        .await;

    let reviewers = create_pull_request(&ctx, "p1", "alice").await;
    assert_eq!(as_set(&reviewers), HashSet::from(["bob", "carol"]));
}

#[tokio::test]
async fn scenario_b_lonely_author() {
    let ctx = CoreContextTest::new();
    ctx.seed_team("solo", &[("dan", true)]).await;

    assert!(create_pull_request(&ctx, "p1", "dan").await.is_empty());
}

#[tokio::test]
async fn scenario_c_no_eligible_candidate() {
    let ctx = CoreContextTest::new();
    ctx.seed_team("core", &[("alice", true), ("bob", true), ("carol", true)])
        .await;
    let before = create_pull_request(&ctx, "p1", "alice").await;

    let reassign: &dyn ReassignPullRequestInterface = ctx.core_module.resolve_ref();
    assert!(matches!(
        reassign.run(&ctx.as_context(), "p1", "bob").await,
        Err(DomainError::NoEligibleCandidate { .. })
    ));

    let reviews: &dyn ListUserReviewsInterface = ctx.core_module.resolve_ref();
    let bob_reviews = reviews.run(&ctx.as_context(), "bob").await.unwrap();
    assert_eq!(bob_reviews.len(), 1);
    assert_eq!(bob_reviews[0].reviewers, before);
}

#[tokio::test]
async fn scenario_d_merged_pull_request() {
    let ctx = CoreContextTest::new();
    ctx.seed_team(
        "core",
        &[("alice", true), ("bob", true), ("carol", true), ("dan", true)],
    )
    .await;
    let reviewers = create_pull_request(&ctx, "p1", "alice").await;

    let merge: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
    merge.run(&ctx.as_context(), "p1").await.unwrap();

    let reassign: &dyn ReassignPullRequestInterface = ctx.core_module.resolve_ref();
    for reviewer_id in reviewers.iter().map(String::as_str).chain(["dan", "ghost"]) {
        assert!(matches!(
            reassign.run(&ctx.as_context(), "p1", reviewer_id).await,
            Err(DomainError::MergedPullRequest { .. })
        ));
    }
}

#[tokio::test]
async fn scenario_e_cascade_after_deactivation() {
    let ctx = CoreContextTest::new();
    ctx.seed_team("core", &[("alice", true), ("bob", true), ("carol", true)])
        .await;
    ctx.seed_team("platform", &[("erin", true), ("frank", true), ("grace", true)])
        .await;
    create_pull_request(&ctx, "p1", "alice").await;
    create_pull_request(&ctx, "p2", "erin").await;

    let deactivate: &dyn DeactivateTeamInterface = ctx.core_module.resolve_ref();
    deactivate.run(&ctx.as_context(), "core").await.unwrap();

    // Nobody in "core" is left to take over
    let cascade: &dyn CascadeReassignForDeactivatedMembersInterface =
        ctx.core_module.resolve_ref();
    let substitutions = cascade.run(&ctx.as_context(), None, "core").await.unwrap();
    assert!(substitutions.is_empty());

    // Inactive reviewers without a replacement lose their slot
    let reviews: &dyn ListUserReviewsInterface = ctx.core_module.resolve_ref();
    for user_id in ["alice", "bob", "carol"] {
        assert!(reviews.run(&ctx.as_context(), user_id).await.unwrap().is_empty());
    }

    // Other teams are untouched
    let platform_reviews = reviews.run(&ctx.as_context(), "frank").await.unwrap();
    assert_eq!(platform_reviews.len(), 1);
    assert_eq!(platform_reviews[0].id, "p2");
}

#[tokio::test]
async fn cascade_substitutions_match_replacements() {
    let ctx = CoreContextTest::new();
    ctx.seed_team(
        "core",
        &[("alice", true), ("bob", true), ("carol", true), ("dan", true), ("erin", true)],
    )
    .await;
    for id in ["p1", "p2", "p3", "p4"] {
        create_pull_request(&ctx, id, "alice").await;
    }

    let set_active: &dyn SetUserIsActiveInterface =
        ctx.core_module.resolve_ref();
    set_active.run(&ctx.as_context(), "bob", false).await.unwrap();

    let reviews: &dyn ListUserReviewsInterface = ctx.core_module.resolve_ref();
    let bob_reviews = reviews.run(&ctx.as_context(), "bob").await.unwrap();

    let cascade: &dyn CascadeReassignForDeactivatedMembersInterface =
        ctx.core_module.resolve_ref();
    let substitutions = cascade.run(&ctx.as_context(), None, "core").await.unwrap();

    // Pool has at least two active candidates left for every pull request
    assert_eq!(substitutions.len(), bob_reviews.len());
    assert!(reviews.run(&ctx.as_context(), "bob").await.unwrap().is_empty());

    for substitution in substitutions {
        assert_eq!(substitution.old_reviewer_id, "bob");
        assert!(!["alice", "bob"].contains(&substitution.new_reviewer_id.as_str()));
    }
}

#[tokio::test]
async fn reviewer_set_properties() {
    let ctx = CoreContextTest::new();
    ctx.seed_team(
        "core",
        &[("alice", true), ("bob", true), ("carol", false), ("dan", true), ("erin", true)],
    )
    .await;
    let active_teammates = HashSet::from(["bob", "dan", "erin"]);

    for i in 0..20 {
        let id = format!("p{i}");
        let reviewers = create_pull_request(&ctx, &id, "alice").await;

        assert_eq!(reviewers.len(), 2);
        assert_eq!(as_set(&reviewers).len(), 2);
        assert!(as_set(&reviewers).is_subset(&active_teammates));

        let reassign: &dyn ReassignPullRequestInterface = ctx.core_module.resolve_ref();
        let reassigned = reassign
            .run(&ctx.as_context(), &id, &reviewers[0])
            .await
            .unwrap();
        assert!(!reviewers.contains(&reassigned.replaced_by));
        assert_ne!(reassigned.replaced_by, "alice");
        assert_eq!(as_set(&reassigned.pull_request.reviewers).len(), 2);
    }
}

#[tokio::test]
async fn add_then_get_round_trip() {
    let ctx = CoreContextTest::new();
    let created = ctx
        .seed_team("core", &[("carol", true), ("alice", false), ("bob", true)])
        .await;

    let get: &dyn GetTeamInterface = ctx.core_module.resolve_ref();
    let team = get.run(&ctx.as_context(), "core").await.unwrap();

    let members: HashSet<_> = team.members.iter().cloned().collect();
    assert_eq!(members, created.members.into_iter().collect::<HashSet<_>>());
    assert_eq!(team.members.len(), 3);
}

#[tokio::test]
async fn concurrent_reassignments_of_one_reviewer() {
    let ctx = CoreContextTest::new();
    ctx.seed_team(
        "core",
        &[("alice", true), ("bob", true), ("carol", true), ("dan", true), ("erin", true)],
    )
    .await;
    let reviewers = create_pull_request(&ctx, "p1", "alice").await;
    let old_reviewer_id = reviewers[0].as_str();

    let reassign: &dyn ReassignPullRequestInterface = ctx.core_module.resolve_ref();
    let (first_ctx, second_ctx) = (ctx.as_context(), ctx.as_context());
    let (first, second) = tokio::join!(
        reassign.run(&first_ctx, "p1", old_reviewer_id),
        reassign.run(&second_ctx, "p1", old_reviewer_id),
    );

    let (reassigned, error) = match (first, second) {
        (Ok(reassigned), Err(error)) | (Err(error), Ok(reassigned)) => (reassigned, error),
        (first, second) => panic!("expected exactly one success, got {first:?} and {second:?}"),
    };
    assert!(matches!(
        error,
        DomainError::ReviewerNotAssigned { .. } | DomainError::NoEligibleCandidate { .. }
    ));

    let tx = ctx.db_service.begin().await.unwrap();
    let stored = ctx.db_service.reviewers_list(&tx, "p1").await.unwrap();
    ctx.db_service.rollback(tx).await.unwrap();

    assert_eq!(stored, reassigned.pull_request.reviewers);
    assert_eq!(as_set(&stored).len(), 2);
    assert!(!stored.iter().any(|r| r == old_reviewer_id));
    assert!(stored.contains(&reassigned.replaced_by));
}
