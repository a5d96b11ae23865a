use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use desk_core::RecordId;
use serde::{Deserialize, Serialize};

use crate::api::v1::ApiError;
use crate::auth::Identity;
use crate::repository::{Account, Repository};

/// Handler for `GET /api/v1/customers`
pub async fn read_all(
    _identity: Identity,
    Extension(repository): Extension<Repository>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers: Vec<Customer> = repository
        .account()
        .read_all()
        .await?
        .into_iter()
        .map(Customer::from)
        .collect();
    Ok(Json(customers))
}

/// Conversion from repository [`Account`] to API [`Customer`].
impl From<Account> for Customer {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.into(),
            name: account.name,
            email: account.email,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// An API [`Customer`] type.
#[derive(Debug, Serialize, Deserialize)]
pub struct Customer {
    pub id: RecordId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
