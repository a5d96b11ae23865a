//! In-process stores backed by plain collections. Used by the test suite and
//! by `--in-memory` runs of the server; behaves like the PostgreSQL schema,
//! including cascading account deletes to their jobs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use super::{
    Account, AccountStore, CreateAccount, CreateJob, Job, JobStore, RepositoryError, Result,
    SessionStore, UpdateAccount, ENTITY_ACCOUNT, ENTITY_JOB, ENTITY_USER,
};

#[derive(Default)]
struct State {
    users: Vec<Uuid>,
    sessions: HashMap<String, Uuid>,
    accounts: Vec<Account>,
    jobs: Vec<Job>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, id: Uuid) {
        let mut state = self.state.lock();
        if !state.users.contains(&id) {
            state.users.push(id);
        }
    }

    /// Registers a user and a session token that resolves to them.
    pub fn insert_session(&self, token: &str, user_id: Uuid) {
        self.insert_user(user_id);
        self.state.lock().sessions.insert(token.to_string(), user_id);
    }

    pub fn insert_account(&self, account: Account) {
        self.state.lock().accounts.push(account);
    }

    pub fn insert_job(&self, job: Job) {
        self.state.lock().jobs.push(job);
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.state.lock().accounts.clone()
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.state.lock().jobs.clone()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn read_all(&self) -> Result<Vec<Account>> {
        Ok(self.accounts())
    }

    async fn create(&self, request: CreateAccount) -> Result<Account> {
        let account = Account {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.state.lock().accounts.push(account.clone());
        Ok(account)
    }

    async fn update(&self, id: &Uuid, request: UpdateAccount) -> Result<Account> {
        let mut state = self.state.lock();
        let account = state
            .accounts
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| RepositoryError::not_found(ENTITY_ACCOUNT, id))?;
        account.name = request.name;
        account.email = request.email;
        account.updated_at = Some(Utc::now());
        Ok(account.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut state = self.state.lock();
        let before = state.accounts.len();
        state.accounts.retain(|a| &a.id != id);
        if state.accounts.len() == before {
            return Err(RepositoryError::not_found(ENTITY_ACCOUNT, id));
        }
        state.jobs.retain(|j| &j.account_id != id);
        Ok(())
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn read_all(&self) -> Result<Vec<Job>> {
        Ok(self.jobs())
    }

    async fn create(&self, request: CreateJob) -> Result<Job> {
        let mut state = self.state.lock();
        if !state.accounts.iter().any(|a| a.id == request.account_id) {
            return Err(RepositoryError::not_found(
                ENTITY_ACCOUNT,
                &request.account_id,
            ));
        }
        for user_id in [&request.user_id, &request.support_person_id] {
            if !state.users.contains(user_id) {
                return Err(RepositoryError::not_found(ENTITY_USER, user_id));
            }
        }
        let job = Job {
            id: Uuid::new_v4(),
            account_id: request.account_id,
            user_id: request.user_id,
            support_person_id: Some(request.support_person_id),
            title: request.title,
            created_at: Utc::now(),
        };
        state.jobs.push(job.clone());
        Ok(job)
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut state = self.state.lock();
        let before = state.jobs.len();
        state.jobs.retain(|j| &j.id != id);
        if state.jobs.len() == before {
            Err(RepositoryError::not_found(ENTITY_JOB, id))
        } else {
            Ok(())
        }
    }

    async fn set_support_person(&self, id: &Uuid, support_person_id: &Uuid) -> Result<()> {
        let mut state = self.state.lock();
        let job = state
            .jobs
            .iter_mut()
            .find(|j| &j.id == id)
            .ok_or_else(|| RepositoryError::not_found(ENTITY_JOB, id))?;
        job.support_person_id = Some(*support_person_id);
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn resolve(&self, token: &str) -> Result<Option<Uuid>> {
        Ok(self.state.lock().sessions.get(token).copied())
    }
}
