use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::Database;

use super::{RepositoryError, Result, ENTITY_ACCOUNT};

/// A customer account.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct CreateAccount {
    pub name: String,
    pub email: Option<String>,
}

pub struct UpdateAccount {
    pub name: String,
    pub email: Option<String>,
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn read_all(&self) -> Result<Vec<Account>>;

    async fn create(&self, request: CreateAccount) -> Result<Account>;

    async fn update(&self, id: &Uuid, request: UpdateAccount) -> Result<Account>;

    /// Permanently removes the account. Fails with
    /// [`RepositoryError::NotFound`] when no such account exists.
    async fn delete(&self, id: &Uuid) -> Result<()>;
}

#[derive(Clone)]
pub struct PgAccountStore {
    database: Database,
}

impl PgAccountStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn read_all(&self) -> Result<Vec<Account>> {
        tracing::trace!("reading accounts");

        let sql = r"
            SELECT
                *
            FROM
                accounts
            ORDER BY
                created_at, id
        ";

        Ok(sqlx::query_as(sql)
            .fetch_all(self.database.pool())
            .await?)
    }

    async fn create(&self, request: CreateAccount) -> Result<Account> {
        let mut tx = self.database.transaction().await?;

        let id = Uuid::new_v4();

        let sql = r"
            INSERT INTO accounts (
                id,
                name,
                email
            ) VALUES (
                $1,
                $2,
                $3
            ) RETURNING *
        ";

        let account: Account = sqlx::query_as(sql)
            .bind(id)
            .bind(&request.name)
            .bind(request.email.as_ref())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::trace!(id = id.to_string(), name = request.name, "account created");

        Ok(account)
    }

    async fn update(&self, id: &Uuid, request: UpdateAccount) -> Result<Account> {
        let mut tx = self.database.transaction().await?;

        let sql = r"
            UPDATE
                accounts
            SET
                name = $2,
                email = $3,
                updated_at = NOW()
            WHERE
                id = $1
            RETURNING *
        ";

        let account: Option<Account> = sqlx::query_as(sql)
            .bind(id)
            .bind(&request.name)
            .bind(request.email.as_ref())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        let account = account.ok_or_else(|| RepositoryError::not_found(ENTITY_ACCOUNT, id))?;

        tracing::trace!(id = id.to_string(), "account updated");

        Ok(account)
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut tx = self.database.transaction().await?;

        let sql = r"
            DELETE FROM
                accounts
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
            tracing::trace!(id = id.to_string(), "account deleted");
            Ok(())
        } else {
            tracing::trace!(id = id.to_string(), "no such account, nothing deleted");
            Err(RepositoryError::not_found(ENTITY_ACCOUNT, id))
        }
    }
}
