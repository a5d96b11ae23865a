use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use desk_core::RecordId;
use serde::{Deserialize, Serialize};

use crate::api::v1::ApiError;
use crate::auth::Identity;
use crate::repository::{self, Repository};

/// Handler for `GET /api/v1/jobs`
pub async fn read_all(
    _identity: Identity,
    Extension(repository): Extension<Repository>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let jobs: Vec<Job> = repository
        .job()
        .read_all()
        .await?
        .into_iter()
        .map(Job::from)
        .collect();
    Ok(Json(jobs))
}

/// Conversion from repository [`repository::Job`] to API [`Job`].
impl From<repository::Job> for Job {
    fn from(job: repository::Job) -> Self {
        Self {
            id: job.id.into(),
            account_id: job.account_id.into(),
            user_id: job.user_id.into(),
            support_person_id: job.support_person_id.map(RecordId::from),
            title: job.title,
            created_at: job.created_at,
        }
    }
}

/// An API [`Job`] type.
#[derive(Debug, Serialize, Deserialize)]
pub struct Job {
    pub id: RecordId,
    pub account_id: RecordId,
    pub user_id: RecordId,
    pub support_person_id: Option<RecordId>,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
