use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::ConnectOptions;
use tracing::log::LevelFilter;

pub type DbConnectOptions = sqlx::postgres::PgConnectOptions;
pub type DbPool = sqlx::postgres::PgPool;
pub type DbPoolOptions = sqlx::postgres::PgPoolOptions;
pub type DbTransaction = sqlx::Transaction<'static, sqlx::Postgres>;

const SLOW_STATEMENT_THRESHOLD: Duration = Duration::from_millis(100);
static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub async fn new(url: &str, min_connections: u32, max_connections: u32) -> sqlx::Result<Self> {
        let connection_options: DbConnectOptions = url.parse()?;
        let connection_options = connection_options
            .log_statements(LevelFilter::Trace)
            .log_slow_statements(LevelFilter::Info, SLOW_STATEMENT_THRESHOLD);
        let pool = DbPoolOptions::new()
            .min_connections(min_connections)
            .max_connections(max_connections)
            .connect_with(connection_options)
            .await?;
        tracing::debug!(
            min_connections = min_connections,
            max_connections = max_connections,
            "connected to database"
        );
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), MigrateError> {
        for migration in MIGRATOR.migrations.iter() {
            tracing::debug!(
                desc = migration.description.to_string(),
                "migration {:0>3}",
                migration.version
            );
        }

        MIGRATOR.run(&self.pool).await?;

        tracing::debug!(
            count = MIGRATOR.migrations.len(),
            "all migration(s) applied"
        );

        Ok(())
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub async fn transaction(&self) -> sqlx::Result<DbTransaction> {
        self.pool.begin().await
    }
}
