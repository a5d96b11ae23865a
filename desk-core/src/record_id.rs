use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use harsh::Harsh;
use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

lazy_static! {
    static ref HARSH: Harsh = Harsh::builder()
        .salt("desk.record")
        .build()
        .expect("hashid alphabet and salt are valid");
}

/// Opaque identifier of a persisted record.
///
/// Rows are keyed by UUID in the store; outside the store the UUID is always
/// carried in its short, URL-safe hashid form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<&Uuid> for RecordId {
    fn from(id: &Uuid) -> Self {
        Self(*id)
    }
}

impl From<RecordId> for Uuid {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseRecordIdError {
    #[error("identifier is empty")]
    Empty,
    #[error("not a valid identifier")]
    DecodeFailure,
}

impl FromStr for RecordId {
    type Err = ParseRecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseRecordIdError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ParseRecordIdError::DecodeFailure);
        }

        // harsh's decoder can overflow on crafted input and panics in debug
        // builds; in release builds the same input wraps silently, so the
        // decoded value must also re-encode to the original string.
        let decoded = panic::catch_unwind(AssertUnwindSafe(|| HARSH.decode(s)))
            .map_err(|_| ParseRecordIdError::DecodeFailure)?
            .map_err(|_| ParseRecordIdError::DecodeFailure)?;
        let id = match decoded.as_slice() {
            [lo, hi] => Self(Uuid::from_u128(*lo as u128 | ((*hi as u128) << 64))),
            _ => return Err(ParseRecordIdError::DecodeFailure),
        };

        if id.to_string() == s {
            Ok(id)
        } else {
            Err(ParseRecordIdError::DecodeFailure)
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.as_u128();
        let hi = (n >> 64) as u64;
        let lo = n as u64;
        f.write_str(&HARSH.encode(&[lo, hi]))
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<RecordId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
