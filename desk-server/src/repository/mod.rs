use std::sync::Arc;

use desk_core::RecordId;
use thiserror::Error;
use uuid::Uuid;

use crate::database::Database;

pub mod account;
pub mod job;
pub mod memory;
pub mod session;

pub use account::{Account, AccountStore, CreateAccount, UpdateAccount};
pub use job::{CreateJob, Job, JobStore};
pub use session::SessionStore;

pub type Result<T> = std::result::Result<T, RepositoryError>;

pub(crate) const ENTITY_ACCOUNT: &str = "account";
pub(crate) const ENTITY_JOB: &str = "job";
pub(crate) const ENTITY_USER: &str = "user";

const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity_type} with ID {id} does not exist")]
    NotFound { entity_type: String, id: String },
    #[error("query failed: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub fn not_found(entity_type: &str, id: &Uuid) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: RecordId::from(id).to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Name of the foreign key constraint this error violated, if any.
    pub(crate) fn violated_foreign_key(&self) -> Option<&str> {
        match self {
            Self::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) =>
            {
                Some(e.constraint().unwrap_or_default())
            }
            _ => None,
        }
    }
}

/// Store access handed to every handler. Each store is a trait object so the
/// server can run against PostgreSQL or the in-process [`memory::MemoryStore`].
#[derive(Clone)]
pub struct Repository {
    accounts: Arc<dyn AccountStore>,
    jobs: Arc<dyn JobStore>,
    sessions: Arc<dyn SessionStore>,
}

impl Repository {
    pub fn new(database: Database) -> Self {
        Self {
            accounts: Arc::new(account::PgAccountStore::new(database.clone())),
            jobs: Arc::new(job::PgJobStore::new(database.clone())),
            sessions: Arc::new(session::PgSessionStore::new(database)),
        }
    }

    pub fn in_memory(store: memory::MemoryStore) -> Self {
        Self {
            accounts: Arc::new(store.clone()),
            jobs: Arc::new(store.clone()),
            sessions: Arc::new(store),
        }
    }

    pub fn account(&self) -> &dyn AccountStore {
        self.accounts.as_ref()
    }

    pub fn job(&self) -> &dyn JobStore {
        self.jobs.as_ref()
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.sessions.as_ref()
    }
}
