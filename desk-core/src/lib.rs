//! Types shared by the desk server and operator CLI: record identifiers,
//! form schema validation and toast notifications.

pub mod record_id;
pub mod toast;
pub mod validation;

pub use record_id::RecordId;
