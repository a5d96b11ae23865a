use axum::{Extension, Json};
use desk_core::validation::{self, FormInput, Rule, Schema};
use desk_core::RecordId;
use serde::Deserialize;

use crate::{
    api::form::FormFields,
    auth::Identity,
    notifier::Notifier,
    repository::{CreateAccount, Repository, UpdateAccount},
};

use super::{notify_outcome, ActionError, ActionSuccess, CUSTOMER_NAME_MAX_LENGTH};

#[derive(Debug, Deserialize)]
pub struct CreateCustomerForm {
    pub name: String,
    pub email: Option<String>,
}

impl FormInput for CreateCustomerForm {
    fn schema() -> Schema {
        Schema::new()
            .field(
                "name",
                [Rule::required(), Rule::max_length(CUSTOMER_NAME_MAX_LENGTH)],
            )
            .optional("email", [Rule::email()])
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerForm {
    pub id: RecordId,
    pub name: String,
    pub email: Option<String>,
}

impl FormInput for UpdateCustomerForm {
    fn schema() -> Schema {
        Schema::new()
            .field("id", [Rule::record_id()])
            .field(
                "name",
                [Rule::required(), Rule::max_length(CUSTOMER_NAME_MAX_LENGTH)],
            )
            .optional("email", [Rule::email()])
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteCustomerForm {
    pub id: RecordId,
}

impl FormInput for DeleteCustomerForm {
    fn schema() -> Schema {
        Schema::new().field("id", [Rule::record_id()])
    }
}

/// Handler for `POST /actions/customers/create`
pub async fn create(
    identity: Identity,
    Extension(repository): Extension<Repository>,
    Extension(notifier): Extension<Notifier>,
    FormFields(fields): FormFields,
) -> Result<Json<ActionSuccess>, ActionError> {
    let form: CreateCustomerForm = validation::parse(fields)?;

    let result = repository
        .account()
        .create(CreateAccount {
            name: form.name.trim().to_string(),
            email: form.email.map(|e| e.trim().to_string()),
        })
        .await;
    let account = notify_outcome(&notifier, identity.user_id, result, "Customer created")?;

    tracing::debug!(
        id = account.id.to_string(),
        user_id = identity.user_id.to_string(),
        "customer created"
    );

    Ok(Json(ActionSuccess::created(account.id)))
}

/// Handler for `POST /actions/customers/update`
pub async fn update(
    identity: Identity,
    Extension(repository): Extension<Repository>,
    Extension(notifier): Extension<Notifier>,
    FormFields(fields): FormFields,
) -> Result<Json<ActionSuccess>, ActionError> {
    let form: UpdateCustomerForm = validation::parse(fields)?;

    let result = repository
        .account()
        .update(
            form.id.as_uuid(),
            UpdateAccount {
                name: form.name.trim().to_string(),
                email: form.email.map(|e| e.trim().to_string()),
            },
        )
        .await;
    notify_outcome(&notifier, identity.user_id, result, "Customer updated")?;

    tracing::debug!(
        id = form.id.to_string(),
        user_id = identity.user_id.to_string(),
        "customer updated"
    );

    Ok(Json(ActionSuccess::ok()))
}

/// Handler for `POST /actions/customers/delete`
pub async fn delete(
    identity: Identity,
    Extension(repository): Extension<Repository>,
    Extension(notifier): Extension<Notifier>,
    FormFields(fields): FormFields,
) -> Result<Json<ActionSuccess>, ActionError> {
    let form: DeleteCustomerForm = validation::parse(fields)?;

    let result = repository.account().delete(form.id.as_uuid()).await;
    notify_outcome(&notifier, identity.user_id, result, "Customer deleted")?;

    tracing::debug!(
        id = form.id.to_string(),
        user_id = identity.user_id.to_string(),
        "customer deleted"
    );

    Ok(Json(ActionSuccess::ok()))
}
