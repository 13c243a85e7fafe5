//! Student records: the domain type, its validation rules, and the concurrent store.

mod store;
pub mod types;

pub use store::{InMemoryRecordStore, RecordStore};
pub use types::{MAX_STUDENT_ID, MIN_STUDENT_ID, RecordError, StudentRecord, parse_id, validate_id};
