pub(crate) mod add_team;
pub(crate) mod deactivate_team;
pub(crate) mod get_team;
pub(crate) mod get_team_stats;

pub use add_team::AddTeamInterface;
pub use deactivate_team::DeactivateTeamInterface;
pub use get_team::GetTeamInterface;
pub use get_team_stats::GetTeamStatsInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    add_team::MockAddTeamInterface, deactivate_team::MockDeactivateTeamInterface,
    get_team::MockGetTeamInterface, get_team_stats::MockGetTeamStatsInterface,
};
