use async_trait::async_trait;
use uuid::Uuid;

use crate::database::Database;

use super::Result;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolves a session token to the signed-in user, if the session exists
    /// and has not expired.
    async fn resolve(&self, token: &str) -> Result<Option<Uuid>>;
}

#[derive(Clone)]
pub struct PgSessionStore {
    database: Database,
}

impl PgSessionStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn resolve(&self, token: &str) -> Result<Option<Uuid>> {
        let sql = r"
            SELECT
                user_id
            FROM
                sessions
            WHERE
                token = $1
                AND
                expires_at > NOW()
        ";

        let user_id: Option<(Uuid,)> = sqlx::query_as(sql)
            .bind(token)
            .fetch_optional(self.database.pool())
            .await?;

        Ok(user_id.map(|(id,)| id))
    }
}
