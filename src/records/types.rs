//! Student record type and the validation applied before a record enters the store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest admissible student id (eight decimal digits).
pub const MIN_STUDENT_ID: i64 = 10_000_000;
/// Largest admissible student id (eight decimal digits).
pub const MAX_STUDENT_ID: i64 = 99_999_999;

/// Errors produced by record operations.
///
/// Every variant is raised before the store is touched, so a failed call never leaves a
/// partially applied write behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Id falls outside the eight-digit range or could not be parsed.
    #[error("Invalid student ID: must be an 8-digit integer")]
    InvalidId,
    /// Name or email is empty, or age is not positive.
    #[error("Invalid student data")]
    InvalidData,
    /// Update body carries a different id than the addressed record.
    #[error("Student ID in body does not match URL")]
    IdMismatch,
    /// Create targeted an id that is already stored.
    #[error("Student ID already exists")]
    AlreadyExists,
    /// Operation targeted an id with no stored record.
    #[error("Student not found")]
    NotFound,
}

impl RecordError {
    /// Whether the error belongs to the bad-input class (as opposed to conflict or absence).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidId | Self::InvalidData | Self::IdMismatch)
    }
}

/// A student profile keyed by its eight-digit id.
///
/// Missing JSON fields decode to zero values and are then rejected by [`StudentRecord::validate`],
/// which keeps the error message specific to the violated rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentRecord {
    /// Unique eight-digit identifier.
    pub id: i64,
    /// Display name; never empty once stored.
    pub name: String,
    /// Age in years; always positive once stored.
    pub age: i64,
    /// Contact address; only non-emptiness is checked.
    pub email: String,
}

impl StudentRecord {
    /// Convenience constructor used by callers and tests.
    pub fn new(id: i64, name: impl Into<String>, age: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            email: email.into(),
        }
    }

    /// Check the id range and field rules required for admission to the store.
    pub fn validate(&self) -> Result<(), RecordError> {
        validate_id(self.id)?;
        if self.name.is_empty() || self.age <= 0 || self.email.is_empty() {
            return Err(RecordError::InvalidData);
        }
        Ok(())
    }
}

/// Reject ids outside `[MIN_STUDENT_ID, MAX_STUDENT_ID]`.
pub fn validate_id(id: i64) -> Result<(), RecordError> {
    if (MIN_STUDENT_ID..=MAX_STUDENT_ID).contains(&id) {
        Ok(())
    } else {
        Err(RecordError::InvalidId)
    }
}

/// Parse a raw path segment into a validated student id.
pub fn parse_id(raw: &str) -> Result<i64, RecordError> {
    let id = raw.parse::<i64>().map_err(|_| RecordError::InvalidId)?;
    validate_id(id)?;
    Ok(id)
}
