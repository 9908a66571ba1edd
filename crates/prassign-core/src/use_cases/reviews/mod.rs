pub(crate) mod assign_reviewers;
pub(crate) mod cascade_reassign_for_deactivated_members;
pub(crate) mod reassign_reviewer;
pub(crate) mod reviewer_pool;

pub use assign_reviewers::AssignReviewersInterface;
pub use cascade_reassign_for_deactivated_members::CascadeReassignForDeactivatedMembersInterface;
pub use reassign_reviewer::ReassignReviewerInterface;
pub use reviewer_pool::REVIEWERS_TARGET_COUNT;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    assign_reviewers::MockAssignReviewersInterface,
    cascade_reassign_for_deactivated_members::MockCascadeReassignForDeactivatedMembersInterface,
    reassign_reviewer::MockReassignReviewerInterface,
};
