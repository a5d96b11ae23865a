use axum::{Extension, Json};
use desk_core::validation::{self, FormInput, Rule, Schema};
use desk_core::RecordId;
use serde::Deserialize;

use crate::{
    api::form::FormFields,
    auth::Identity,
    notifier::Notifier,
    repository::{CreateJob, Repository},
};

use super::{notify_outcome, ActionError, ActionSuccess, JOB_TITLE_MAX_LENGTH};

#[derive(Debug, Deserialize)]
pub struct CreateJobForm {
    pub account_id: RecordId,
    pub title: String,
    pub support_person_id: Option<RecordId>,
}

impl FormInput for CreateJobForm {
    fn schema() -> Schema {
        Schema::new()
            .field("account_id", [Rule::record_id()])
            .field(
                "title",
                [Rule::required(), Rule::max_length(JOB_TITLE_MAX_LENGTH)],
            )
            .optional("support_person_id", [Rule::record_id()])
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteJobForm {
    pub id: RecordId,
}

impl FormInput for DeleteJobForm {
    fn schema() -> Schema {
        Schema::new().field("id", [Rule::record_id()])
    }
}

/// Handler for `POST /actions/jobs/create`
///
/// The signed-in user owns the new job, and supports it too unless another
/// support person is named.
pub async fn create(
    identity: Identity,
    Extension(repository): Extension<Repository>,
    Extension(notifier): Extension<Notifier>,
    FormFields(fields): FormFields,
) -> Result<Json<ActionSuccess>, ActionError> {
    let form: CreateJobForm = validation::parse(fields)?;

    let support_person_id = form
        .support_person_id
        .map(RecordId::into_uuid)
        .unwrap_or(identity.user_id);

    let result = repository
        .job()
        .create(CreateJob {
            account_id: form.account_id.into_uuid(),
            user_id: identity.user_id,
            support_person_id,
            title: form.title.trim().to_string(),
        })
        .await;
    let job = notify_outcome(&notifier, identity.user_id, result, "Job created")?;

    tracing::debug!(
        id = job.id.to_string(),
        account_id = job.account_id.to_string(),
        user_id = identity.user_id.to_string(),
        "job created"
    );

    Ok(Json(ActionSuccess::created(job.id)))
}

/// Handler for `POST /actions/jobs/delete`
pub async fn delete(
    identity: Identity,
    Extension(repository): Extension<Repository>,
    Extension(notifier): Extension<Notifier>,
    FormFields(fields): FormFields,
) -> Result<Json<ActionSuccess>, ActionError> {
    let form: DeleteJobForm = validation::parse(fields)?;

    let result = repository.job().delete(form.id.as_uuid()).await;
    notify_outcome(&notifier, identity.user_id, result, "Job deleted")?;

    tracing::debug!(
        id = form.id.to_string(),
        user_id = identity.user_id.to_string(),
        "job deleted"
    );

    Ok(Json(ActionSuccess::ok()))
}
