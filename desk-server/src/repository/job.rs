use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::Database;

use super::{RepositoryError, Result, ENTITY_ACCOUNT, ENTITY_JOB, ENTITY_USER};

/// A support job raised against an account.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub account_id: Uuid,
    /// The user who owns the job.
    pub user_id: Uuid,
    pub support_person_id: Option<Uuid>,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

pub struct CreateJob {
    pub account_id: Uuid,
    pub user_id: Uuid,
    pub support_person_id: Uuid,
    pub title: String,
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// All jobs, oldest first.
    async fn read_all(&self) -> Result<Vec<Job>>;

    async fn create(&self, request: CreateJob) -> Result<Job>;

    async fn delete(&self, id: &Uuid) -> Result<()>;

    async fn set_support_person(&self, id: &Uuid, support_person_id: &Uuid) -> Result<()>;
}

#[derive(Clone)]
pub struct PgJobStore {
    database: Database,
}

impl PgJobStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn read_all(&self) -> Result<Vec<Job>> {
        tracing::trace!("reading jobs");

        let sql = r"
            SELECT
                *
            FROM
                jobs
            ORDER BY
                created_at, id
        ";

        Ok(sqlx::query_as(sql)
            .fetch_all(self.database.pool())
            .await?)
    }

    async fn create(&self, request: CreateJob) -> Result<Job> {
        let mut tx = self.database.transaction().await?;

        let id = Uuid::new_v4();

        let sql = r"
            INSERT INTO jobs (
                id,
                account_id,
                user_id,
                support_person_id,
                title
            )
            SELECT
                $1, a.id, $3, $4, $5
            FROM
                accounts a
            WHERE
                a.id = $2
            RETURNING *
        ";

        let job: Option<Job> = sqlx::query_as(sql)
            .bind(id)
            .bind(request.account_id)
            .bind(request.user_id)
            .bind(request.support_person_id)
            .bind(&request.title)
            .fetch_optional(&mut *tx)
            .await
            .map_err(RepositoryError::from)
            .map_err(|e| match e.violated_foreign_key() {
                Some(constraint) => {
                    RepositoryError::not_found(ENTITY_USER, missing_user(constraint, &request))
                }
                None => e,
            })?;

        let job =
            job.ok_or_else(|| RepositoryError::not_found(ENTITY_ACCOUNT, &request.account_id))?;

        tx.commit().await?;

        tracing::trace!(
            id = id.to_string(),
            account_id = request.account_id.to_string(),
            user_id = request.user_id.to_string(),
            "job created"
        );

        Ok(job)
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut tx = self.database.transaction().await?;

        let sql = r"
            DELETE FROM
                jobs
            WHERE
                id = $1
        ";

        let deleted = sqlx::query(sql)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        tx.commit().await?;

        if deleted {
            tracing::trace!(id = id.to_string(), "job deleted");
            Ok(())
        } else {
            tracing::trace!(id = id.to_string(), "no such job, nothing deleted");
            Err(RepositoryError::not_found(ENTITY_JOB, id))
        }
    }

    async fn set_support_person(&self, id: &Uuid, support_person_id: &Uuid) -> Result<()> {
        let sql = r"
            UPDATE
                jobs
            SET
                support_person_id = $2
            WHERE
                id = $1
        ";

        let updated = sqlx::query(sql)
            .bind(id)
            .bind(support_person_id)
            .execute(self.database.pool())
            .await?
            .rows_affected()
            > 0;

        if updated {
            tracing::trace!(
                id = id.to_string(),
                support_person_id = support_person_id.to_string(),
                "job support person updated"
            );
            Ok(())
        } else {
            Err(RepositoryError::not_found(ENTITY_JOB, id))
        }
    }
}

/// Foreign key from `jobs.user_id` to `users`, as named by PostgreSQL.
const JOB_OWNER_FOREIGN_KEY: &str = "jobs_user_id_fkey";

/// The user a job insert referenced that the violated constraint could not
/// resolve. Violations of the account key never reach here, since the insert
/// selects from `accounts`.
fn missing_user<'a>(constraint: &str, request: &'a CreateJob) -> &'a Uuid {
    if constraint == JOB_OWNER_FOREIGN_KEY {
        &request.user_id
    } else {
        &request.support_person_id
    }
}
