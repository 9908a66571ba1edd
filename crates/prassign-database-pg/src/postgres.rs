use async_trait::async_trait;
use prassign_database_interface::{
    DatabaseError, DbService, PullRequestStore, Result, ReviewerStore, TeamStore, Transaction,
    TxManager, UserStore,
};
use prassign_models::{PullRequest, PullRequestCounts, Team, TeamMember, User};
use sqlx::{PgConnection, PgPool, Postgres};
use time::OffsetDateTime;
use tokio::sync::{Mutex, MutexGuard};

use crate::row::{PullRequestRow, TeamMemberRow, UserRow};

type InnerTransaction = sqlx::Transaction<'static, Postgres>;

/// One `sqlx` transaction shared by every clone of the scope.
/// Statements issued concurrently on it are serialized by the mutex.
struct PgTransaction {
    inner: Mutex<Option<InnerTransaction>>,
}

const SELECT_PULL_REQUEST: &str = r#"
    SELECT id, name, author_id, status, created_at, merged_at
    FROM pull_request
    WHERE id = $1
"#;

const SELECT_PULL_REQUEST_FOR_UPDATE: &str = r#"
    SELECT id, name, author_id, status, created_at, merged_at
    FROM pull_request
    WHERE id = $1
    FOR UPDATE
"#;

pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lock_transaction(
        tx: &Transaction,
    ) -> Result<MutexGuard<'_, Option<InnerTransaction>>> {
        Ok(tx.handle::<PgTransaction>()?.inner.lock().await)
    }

    fn connection<'g>(
        guard: &'g mut Option<InnerTransaction>,
        tx: &Transaction,
    ) -> Result<&'g mut PgConnection> {
        guard
            .as_mut()
            .map(|inner| &mut **inner)
            .ok_or(DatabaseError::TransactionClosed(tx.id()))
    }

    async fn take_transaction(tx: &Transaction) -> Result<InnerTransaction> {
        Self::lock_transaction(tx)
            .await?
            .take()
            .ok_or(DatabaseError::TransactionClosed(tx.id()))
    }

    async fn fetch_team_id(conn: &mut PgConnection, team_name: &str) -> Result<Option<i32>> {
        sqlx::query_scalar::<_, i32>(
            r#"
            SELECT id
            FROM team
            WHERE name = $1
        "#,
        )
        .bind(team_name)
        .fetch_optional(conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
    }

    async fn fetch_team_id_expect(conn: &mut PgConnection, team_name: &str) -> Result<i32> {
        Self::fetch_team_id(conn, team_name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownTeam(team_name.into()))
    }

    async fn fetch_user(conn: &mut PgConnection, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id AS user_id, u.username, t.name AS team_name, u.is_active
            FROM app_user u
            INNER JOIN team t ON t.id = u.team_id
            WHERE u.id = $1
        "#,
        )
        .bind(user_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(row.map(Into::into))
    }

    async fn user_exists(conn: &mut PgConnection, user_id: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM app_user WHERE id = $1)")
            .bind(user_id)
            .fetch_one(conn)
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
    }

    async fn pull_request_exists(conn: &mut PgConnection, pull_request_id: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM pull_request WHERE id = $1)")
            .bind(pull_request_id)
            .fetch_one(conn)
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
    }

    async fn fetch_reviewers(conn: &mut PgConnection, pull_request_id: &str) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT user_id
            FROM reviewer
            WHERE pull_request_id = $1
            ORDER BY position
        "#,
        )
        .bind(pull_request_id)
        .fetch_all(conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
    }

    async fn fetch_pull_request(
        conn: &mut PgConnection,
        pull_request_id: &str,
        for_update: bool,
    ) -> Result<Option<PullRequest>> {
        let query = if for_update {
            SELECT_PULL_REQUEST_FOR_UPDATE
        } else {
            SELECT_PULL_REQUEST
        };

        let row = sqlx::query_as::<_, PullRequestRow>(query)
            .bind(pull_request_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        match row {
            Some(row) => {
                let mut pr: PullRequest = row.into();
                pr.reviewers = Self::fetch_reviewers(conn, pull_request_id).await?;
                Ok(Some(pr))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl TxManager for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn begin(&self) -> Result<Transaction> {
        let inner = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(Transaction::new(PgTransaction {
            inner: Mutex::new(Some(inner)),
        }))
    }

    #[tracing::instrument(skip(self))]
    async fn commit(&self, tx: Transaction) -> Result<()> {
        Self::take_transaction(&tx)
            .await?
            .commit()
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
    }

    #[tracing::instrument(skip(self))]
    async fn rollback(&self, tx: Transaction) -> Result<()> {
        Self::take_transaction(&tx)
            .await?
            .rollback()
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
    }
}

#[async_trait]
impl TeamStore for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn teams_create(&self, tx: &Transaction, team_name: &str) -> Result<u64> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO team (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            RETURNING id
        "#,
        )
        .bind(team_name)
        .fetch_optional(conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        id.map(|id| id as u64)
            .ok_or_else(|| DatabaseError::TeamAlreadyExists(team_name.into()))
    }

    #[tracing::instrument(skip(self))]
    async fn teams_get(&self, tx: &Transaction, team_name: &str) -> Result<Option<Team>> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        let team_id = match Self::fetch_team_id(&mut *conn, team_name).await? {
            Some(id) => id,
            None => return Ok(None),
        };

        let members = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT id AS user_id, username, is_active
            FROM app_user
            WHERE team_id = $1
            ORDER BY id
        "#,
        )
        .bind(team_id)
        .fetch_all(conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(Some(Team {
            team_name: team_name.into(),
            members: members.into_iter().map(TeamMember::from).collect(),
        }))
    }

    #[tracing::instrument(skip(self))]
    async fn teams_deactivate_members(&self, tx: &Transaction, team_name: &str) -> Result<()> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        let team_id = Self::fetch_team_id_expect(&mut *conn, team_name).await?;
        sqlx::query(
            r#"
            UPDATE app_user
            SET is_active = FALSE
            WHERE team_id = $1
        "#,
        )
        .bind(team_id)
        .execute(conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn teams_pull_request_counts(
        &self,
        tx: &Transaction,
        team_name: &str,
    ) -> Result<PullRequestCounts> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        let team_id = Self::fetch_team_id_expect(&mut *conn, team_name).await?;
        let (total, open, merged) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE p.status = 'OPEN'),
                COUNT(*) FILTER (WHERE p.status = 'MERGED')
            FROM pull_request p
            INNER JOIN app_user u ON u.id = p.author_id
            WHERE u.team_id = $1
        "#,
        )
        .bind(team_id)
        .fetch_one(conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(PullRequestCounts {
            total: total as u64,
            open: open as u64,
            merged: merged as u64,
        })
    }
}

#[async_trait]
impl UserStore for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn users_create(&self, tx: &Transaction, instance: User) -> Result<User> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        let team_id = Self::fetch_team_id_expect(&mut *conn, &instance.team_name).await?;
        let created = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO app_user (id, username, team_id, is_active)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            RETURNING id
        "#,
        )
        .bind(&instance.user_id)
        .bind(&instance.username)
        .bind(team_id)
        .bind(instance.is_active)
        .fetch_optional(conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        match created {
            Some(_) => Ok(instance),
            None => Err(DatabaseError::UserAlreadyExists(instance.user_id)),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn users_update(&self, tx: &Transaction, instance: User) -> Result<User> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        let team_id = Self::fetch_team_id_expect(&mut *conn, &instance.team_name).await?;
        let result = sqlx::query(
            r#"
            UPDATE app_user
            SET username = $2,
                team_id = $3,
                is_active = $4
            WHERE id = $1
        "#,
        )
        .bind(&instance.user_id)
        .bind(&instance.username)
        .bind(team_id)
        .bind(instance.is_active)
        .execute(conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        if result.rows_affected() == 0 {
            Err(DatabaseError::UnknownUser(instance.user_id))
        } else {
            Ok(instance)
        }
    }

    #[tracing::instrument(skip(self))]
    async fn users_get(&self, tx: &Transaction, user_id: &str) -> Result<Option<User>> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        Self::fetch_user(conn, user_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn users_set_active(
        &self,
        tx: &Transaction,
        user_id: &str,
        value: bool,
    ) -> Result<User> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        sqlx::query(
            r#"
            UPDATE app_user
            SET is_active = $2
            WHERE id = $1
        "#,
        )
        .bind(user_id)
        .bind(value)
        .execute(&mut *conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Self::fetch_user(conn, user_id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownUser(user_id.into()))
    }
}

#[async_trait]
impl PullRequestStore for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn pull_requests_create(
        &self,
        tx: &Transaction,
        mut instance: PullRequest,
    ) -> Result<PullRequest> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        if !Self::user_exists(&mut *conn, &instance.author_id).await? {
            return Err(DatabaseError::UnknownUser(instance.author_id));
        }

        let created = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO pull_request (id, name, author_id, status, created_at, merged_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            RETURNING id
        "#,
        )
        .bind(&instance.id)
        .bind(&instance.name)
        .bind(&instance.author_id)
        .bind(instance.status.to_str())
        .bind(instance.created_at)
        .bind(instance.merged_at)
        .fetch_optional(conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        match created {
            Some(_) => {
                instance.reviewers.clear();
                Ok(instance)
            }
            None => Err(DatabaseError::PullRequestAlreadyExists(instance.id)),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_get(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
    ) -> Result<Option<PullRequest>> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        Self::fetch_pull_request(conn, pull_request_id, false).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_lock(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
    ) -> Result<Option<PullRequest>> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        Self::fetch_pull_request(conn, pull_request_id, true).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_merge(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
        merged_at: OffsetDateTime,
    ) -> Result<PullRequest> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        sqlx::query(
            r#"
            UPDATE pull_request
            SET status = 'MERGED',
                merged_at = $2
            WHERE id = $1
            AND status = 'OPEN'
        "#,
        )
        .bind(pull_request_id)
        .bind(merged_at)
        .execute(&mut *conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Self::fetch_pull_request(conn, pull_request_id, false)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_list_reviewing(
        &self,
        tx: &Transaction,
        user_id: &str,
    ) -> Result<Vec<PullRequest>> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        let rows = sqlx::query_as::<_, PullRequestRow>(
            r#"
            SELECT p.id, p.name, p.author_id, p.status, p.created_at, p.merged_at
            FROM pull_request p
            INNER JOIN reviewer r ON r.pull_request_id = p.id
            WHERE r.user_id = $1
            ORDER BY p.id
        "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        let mut values = Vec::with_capacity(rows.len());
        for row in rows {
            let mut pr: PullRequest = row.into();
            pr.reviewers = Self::fetch_reviewers(&mut *conn, &pr.id).await?;
            values.push(pr);
        }

        Ok(values)
    }
}

#[async_trait]
impl ReviewerStore for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn reviewers_list(&self, tx: &Transaction, pull_request_id: &str) -> Result<Vec<String>> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        Self::fetch_reviewers(conn, pull_request_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn reviewers_assign(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
        user_ids: &[String],
    ) -> Result<()> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        if !Self::pull_request_exists(&mut *conn, pull_request_id).await? {
            return Err(DatabaseError::UnknownPullRequest(pull_request_id.into()));
        }

        for user_id in user_ids {
            if !Self::user_exists(&mut *conn, user_id).await? {
                return Err(DatabaseError::UnknownUser(user_id.clone()));
            }

            sqlx::query(
                r#"
                INSERT INTO reviewer (pull_request_id, user_id, position)
                SELECT $1, $2, COALESCE(MAX(position) + 1, 0)
                FROM reviewer
                WHERE pull_request_id = $1
                ON CONFLICT (pull_request_id, user_id) DO NOTHING
            "#,
            )
            .bind(pull_request_id)
            .bind(user_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn reviewers_replace(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
        old_user_id: &str,
        new_user_id: &str,
    ) -> Result<()> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        if !Self::pull_request_exists(&mut *conn, pull_request_id).await? {
            return Err(DatabaseError::UnknownPullRequest(pull_request_id.into()));
        }
        if !Self::user_exists(&mut *conn, new_user_id).await? {
            return Err(DatabaseError::UnknownUser(new_user_id.into()));
        }

        let result = sqlx::query(
            r#"
            UPDATE reviewer
            SET user_id = $3
            WHERE pull_request_id = $1
            AND user_id = $2
        "#,
        )
        .bind(pull_request_id)
        .bind(old_user_id)
        .bind(new_user_id)
        .execute(conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        if result.rows_affected() == 0 {
            Err(DatabaseError::ReviewerNotAssigned(
                pull_request_id.into(),
                old_user_id.into(),
            ))
        } else {
            Ok(())
        }
    }

    #[tracing::instrument(skip(self))]
    async fn reviewers_remove(
        &self,
        tx: &Transaction,
        pull_request_id: &str,
        user_id: &str,
    ) -> Result<()> {
        let mut guard = Self::lock_transaction(tx).await?;
        let conn = Self::connection(&mut guard, tx)?;

        if !Self::pull_request_exists(&mut *conn, pull_request_id).await? {
            return Err(DatabaseError::UnknownPullRequest(pull_request_id.into()));
        }

        let result = sqlx::query(
            r#"
            DELETE FROM reviewer
            WHERE pull_request_id = $1
            AND user_id = $2
        "#,
        )
        .bind(pull_request_id)
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        if result.rows_affected() == 0 {
            Err(DatabaseError::ReviewerNotAssigned(
                pull_request_id.into(),
                user_id.into(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DbService for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1;")
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(())
    }
}
