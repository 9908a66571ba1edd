use std::{io::Write, sync::Arc};

use clap::Parser;
use prassign_config::Config;
use prassign_core::{use_cases::teams::AddTeamInterface, CallScope, CoreContext, CoreModule};
use prassign_database_interface::{PullRequestStore, ReviewerStore, TxManager};
use prassign_database_memory::MemoryDb;
use prassign_models::{PullRequest, Team, TeamMember};
use shaku::HasComponent;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub db_service: MemoryDb,
}

impl CommandContextTest {
    pub fn new() -> Self {
        Self {
            config: Config::from_env_no_version(),
            core_module: CoreModule::builder().build(),
            db_service: MemoryDb::new(),
        }
    }

    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: &self.db_service,
            call_scope: CallScope::new(),
        }
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            core_module: self.core_module,
            db_service: Box::new(self.db_service),
            writer,
        }
    }

    pub async fn seed_team(&self, team_name: &str, members: &[(&str, bool)]) {
        let add_team: &dyn AddTeamInterface = self.core_module.resolve_ref();
        add_team
            .run(
                &self.as_core_context(),
                Team {
                    team_name: team_name.into(),
                    members: members
                        .iter()
                        .map(|(user_id, is_active)| TeamMember {
                            user_id: user_id.to_string(),
                            username: user_id.to_uppercase(),
                            is_active: *is_active,
                        })
                        .collect(),
                },
            )
            .await
            .unwrap();
    }

    /// Insert a pull request with a fixed reviewer list, bypassing assignment.
    pub async fn seed_pull_request(&self, pull_request_id: &str, author_id: &str, reviewers: &[&str]) {
        let tx = self.db_service.begin().await.unwrap();
        self.db_service
            .pull_requests_create(
                &tx,
                PullRequest::new(
                    pull_request_id,
                    format!("PR {pull_request_id}"),
                    author_id,
                    OffsetDateTime::now_utc(),
                ),
            )
            .await
            .unwrap();
        let reviewers: Vec<String> = reviewers.iter().map(|r| r.to_string()).collect();
        self.db_service
            .reviewers_assign(&tx, pull_request_id, &reviewers)
            .await
            .unwrap();
        self.db_service.commit(tx).await.unwrap();
    }
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let buf = Arc::new(RwLock::new(Vec::new()));

    {
        let command_args = {
            let mut tmp_args = vec!["prassign"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = Args::try_parse_from(command_args);
        match args {
            Ok(args) => CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone()))
                .await
                .unwrap(),
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    }

    let vec = buf.read().await.to_vec();
    std::str::from_utf8(&vec).unwrap().to_string()
}

/// Same as `test_command`, but returns the command error instead of panicking.
pub(crate) async fn test_command_error(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let mut tmp_args = vec!["prassign"];
    tmp_args.extend(command_args);

    let args = Args::try_parse_from(tmp_args).unwrap();
    let buf = Arc::new(RwLock::new(Vec::new()));
    CommandExecutor::parse_args_async(args, ctx.into_context(buf))
        .await
        .unwrap_err()
        .to_string()
}
