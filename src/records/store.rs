//! Concurrent in-memory storage for student records.

use super::types::{RecordError, StudentRecord, validate_id};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Storage backend for student records.
///
/// Implementations validate before mutating and hand out owned copies, so callers never hold
/// a reference into the backing collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record, failing when the id is already present.
    async fn create(&self, record: StudentRecord) -> Result<StudentRecord, RecordError>;

    /// Snapshot every stored record. Order is unspecified.
    async fn get_all(&self) -> Vec<StudentRecord>;

    /// Fetch a copy of the record stored under `id`.
    async fn get(&self, id: i64) -> Result<StudentRecord, RecordError>;

    /// Replace the record stored under `id` in its entirety.
    async fn update(&self, id: i64, record: StudentRecord) -> Result<StudentRecord, RecordError>;

    /// Remove the record stored under `id`.
    async fn delete(&self, id: i64) -> Result<(), RecordError>;
}

/// [`RecordStore`] backed by a `HashMap` behind a single reader/writer lock.
///
/// Reads share the lock; every mutation takes it exclusively, so readers never see a
/// half-applied write and mutations on any ids are serialized.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<i64, StudentRecord>>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create(&self, record: StudentRecord) -> Result<StudentRecord, RecordError> {
        record.validate()?;

        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(RecordError::AlreadyExists);
        }
        records.insert(record.id, record.clone());
        tracing::info!(student_id = record.id, "Student created");
        Ok(record)
    }

    async fn get_all(&self) -> Vec<StudentRecord> {
        self.records.read().await.values().cloned().collect()
    }

    async fn get(&self, id: i64) -> Result<StudentRecord, RecordError> {
        validate_id(id)?;
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RecordError::NotFound)
    }

    async fn update(&self, id: i64, record: StudentRecord) -> Result<StudentRecord, RecordError> {
        validate_id(id)?;
        if record.id != id {
            return Err(RecordError::IdMismatch);
        }
        record.validate()?;

        let mut records = self.records.write().await;
        let slot = records.get_mut(&id).ok_or(RecordError::NotFound)?;
        *slot = record.clone();
        tracing::info!(student_id = id, "Student updated");
        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<(), RecordError> {
        validate_id(id)?;

        let mut records = self.records.write().await;
        records.remove(&id).ok_or(RecordError::NotFound)?;
        tracing::info!(student_id = id, "Student deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ada() -> StudentRecord {
        StudentRecord::new(12_345_678, "Ada", 30, "ada@x.com")
    }

    #[tokio::test]
    async fn create_then_get_returns_equal_record() {
        let store = InMemoryRecordStore::new();
        let created = store.create(ada()).await.expect("create");
        assert_eq!(created, ada());
        assert_eq!(store.get(12_345_678).await.expect("get"), ada());
    }

    #[tokio::test]
    async fn duplicate_create_leaves_existing_record_untouched() {
        let store = InMemoryRecordStore::new();
        store.create(ada()).await.expect("create");

        let imposter = StudentRecord::new(12_345_678, "Grace", 40, "grace@x.com");
        assert_eq!(store.create(imposter).await, Err(RecordError::AlreadyExists));
        assert_eq!(store.get(12_345_678).await.expect("get"), ada());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn invalid_records_are_never_admitted() {
        let store = InMemoryRecordStore::new();
        let out_of_range = StudentRecord::new(1_234_567, "Ada", 30, "ada@x.com");
        let no_email = StudentRecord::new(12_345_678, "Ada", 30, "");

        assert_eq!(store.create(out_of_range).await, Err(RecordError::InvalidId));
        assert_eq!(store.create(no_email).await, Err(RecordError::InvalidData));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn out_of_range_ids_fail_without_side_effects() {
        let store = InMemoryRecordStore::new();
        store.create(ada()).await.expect("create");

        for id in [0, 9_999_999, 100_000_000, -1] {
            assert_eq!(store.get(id).await, Err(RecordError::InvalidId));
            assert_eq!(store.delete(id).await, Err(RecordError::InvalidId));
            let body = StudentRecord { id, ..ada() };
            assert_eq!(store.update(id, body).await, Err(RecordError::InvalidId));
        }
        assert_eq!(store.get_all().await, vec![ada()]);
    }

    #[tokio::test]
    async fn update_rejects_mismatched_body_id_whether_or_not_path_exists() {
        let store = InMemoryRecordStore::new();
        store.create(ada()).await.expect("create");

        let body = StudentRecord::new(87_654_321, "Ada", 31, "ada@x.com");
        assert_eq!(
            store.update(12_345_678, body.clone()).await,
            Err(RecordError::IdMismatch)
        );
        assert_eq!(
            store.update(11_111_111, body).await,
            Err(RecordError::IdMismatch)
        );
        assert_eq!(store.get(12_345_678).await.expect("get"), ada());
    }

    #[tokio::test]
    async fn update_replaces_whole_record() {
        let store = InMemoryRecordStore::new();
        store.create(ada()).await.expect("create");

        let replacement = StudentRecord::new(12_345_678, "Ada Lovelace", 36, "ada@analytical.org");
        let updated = store
            .update(12_345_678, replacement.clone())
            .await
            .expect("update");
        assert_eq!(updated, replacement);
        assert_eq!(store.get(12_345_678).await.expect("get"), replacement);
    }

    #[tokio::test]
    async fn update_missing_record_is_not_found() {
        let store = InMemoryRecordStore::new();
        assert_eq!(
            store.update(12_345_678, ada()).await,
            Err(RecordError::NotFound)
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = InMemoryRecordStore::new();
        store.create(ada()).await.expect("create");
        store.delete(12_345_678).await.expect("delete");

        assert_eq!(store.get(12_345_678).await, Err(RecordError::NotFound));
        assert_eq!(store.delete(12_345_678).await, Err(RecordError::NotFound));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_for_distinct_ids_all_land() {
        let store = Arc::new(InMemoryRecordStore::new());
        let count = 200_i64;

        let handles: Vec<_> = (0..count)
            .map(|offset| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let id = 20_000_000 + offset;
                    let name = format!("student-{offset}");
                    let record = StudentRecord::new(id, name, 18 + offset % 10, "s@x.com");
                    store.create(record).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.expect("join").expect("create");
        }

        let mut all = store.get_all().await;
        all.sort_by_key(|record| record.id);
        assert_eq!(all.len(), count as usize);
        for (offset, record) in all.iter().enumerate() {
            let offset = offset as i64;
            assert_eq!(record.id, 20_000_000 + offset);
            assert_eq!(record.name, format!("student-{offset}"));
            assert_eq!(record.age, 18 + offset % 10);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_duplicate_creates_admit_exactly_one() {
        let store = Arc::new(InMemoryRecordStore::new());

        let handles: Vec<_> = (0..32)
            .map(|attempt| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let name = format!("racer-{attempt}");
                    let record = StudentRecord::new(12_345_678, name, 20, "r@x.com");
                    store.create(record).await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.expect("join") {
                Ok(_) => successes += 1,
                Err(error) => assert_eq!(error, RecordError::AlreadyExists),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(store.len().await, 1);
    }
}
