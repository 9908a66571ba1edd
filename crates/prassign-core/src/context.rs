use prassign_config::Config;
use prassign_database_interface::DbService;

use crate::{CallScope, CoreModule};

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub db_service: &'a (dyn DbService + 'a),
    pub call_scope: CallScope,
}

#[cfg(any(test, feature = "testkit"))]
pub(crate) mod tests {
    use prassign_config::Config;
    use prassign_database_memory::MemoryDb;
    use prassign_models::{Team, TeamMember};

    use crate::{
        use_cases::teams::{add_team::AddTeam, AddTeamInterface},
        CallScope, CoreContext, CoreModule,
    };

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub db_service: MemoryDb,
        pub call_scope: CallScope,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            Self {
                config: Config::from_env_no_version(),
                core_module: CoreModule::builder().build(),
                db_service: MemoryDb::new(),
                call_scope: CallScope::new(),
            }
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                db_service: &self.db_service,
                call_scope: self.call_scope.clone(),
            }
        }

        /// Create a team with `(user_id, is_active)` members.
        #[allow(dead_code)]
        pub async fn seed_team(&self, team_name: &str, members: &[(&str, bool)]) -> Team {
            AddTeam
                .run(
                    &self.as_context(),
                    Team {
                        team_name: team_name.into(),
                        members: members
                            .iter()
                            .map(|(user_id, is_active)| TeamMember {
                                user_id: (*user_id).into(),
                                username: user_id.to_uppercase(),
                                is_active: *is_active,
                            })
                            .collect(),
                    },
                )
                .await
                .unwrap()
        }
    }
}
