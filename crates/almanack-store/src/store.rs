//! Writer storage backends.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use almanack_core::{Error, NewWriter, Result, Writer, WriterFilter, WriterUpdate};

/// Trait for writer storage backends.
#[async_trait]
pub trait WriterStore: Send + Sync {
    /// Returns all writers satisfying the filter, ordered by month, day,
    /// then name.
    async fn list(&self, filter: &WriterFilter) -> Result<Vec<Writer>>;

    /// Inserts a writer and returns the stored record with its assigned id.
    async fn create(&self, writer: NewWriter) -> Result<Writer>;

    /// Applies a sparse update to the writer with the given id and returns
    /// the updated record. `updated_at` is refreshed even when the update
    /// carries no fields.
    async fn update(&self, id: i32, update: WriterUpdate) -> Result<Writer>;

    /// Deletes the writer with the given id.
    async fn delete(&self, id: i32) -> Result<()>;
}

struct Records {
    writers: HashMap<i32, Writer>,
    next_id: i32,
}

/// In-memory writer store (for development/testing).
///
/// Mirrors the PostgreSQL backend's semantics: conjunctive filtering,
/// case-insensitive substring search, fixed ordering, sequential positive
/// ids and an `updated_at` refresh on every update.
pub struct InMemoryStore {
    records: parking_lot::RwLock<Records>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: parking_lot::RwLock::new(Records {
                writers: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WriterStore for InMemoryStore {
    async fn list(&self, filter: &WriterFilter) -> Result<Vec<Writer>> {
        let records = self.records.read();

        let mut writers: Vec<Writer> = records
            .writers
            .values()
            .filter(|w| filter.matches(w))
            .cloned()
            .collect();

        writers.sort_by(|a, b| {
            (a.month, a.day, &a.name).cmp(&(b.month, b.day, &b.name))
        });

        Ok(writers)
    }

    async fn create(&self, writer: NewWriter) -> Result<Writer> {
        let mut records = self.records.write();

        let id = records.next_id;
        records.next_id += 1;

        let now = Utc::now();
        let writer = Writer {
            id,
            name: writer.name,
            info: writer.info,
            image_url: writer.image_url,
            month: writer.month,
            day: writer.day,
            tags: writer.tags,
            created_at: now,
            updated_at: now,
        };
        records.writers.insert(id, writer.clone());

        Ok(writer)
    }

    async fn update(&self, id: i32, update: WriterUpdate) -> Result<Writer> {
        let mut records = self.records.write();
        let writer = records.writers.get_mut(&id).ok_or(Error::WriterNotFound)?;

        if let Some(name) = update.name {
            writer.name = name;
        }
        if let Some(info) = update.info {
            writer.info = info;
        }
        if let Some(image_url) = update.image_url {
            writer.image_url = image_url;
        }
        if let Some(month) = update.month {
            writer.month = month;
        }
        if let Some(day) = update.day {
            writer.day = day;
        }
        if let Some(tags) = update.tags {
            writer.tags = tags;
        }
        writer.updated_at = Utc::now();

        Ok(writer.clone())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut records = self.records.write();
        if records.writers.remove(&id).is_none() {
            return Err(Error::WriterNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_sequential_positive_ids() {
        let store = InMemoryStore::new();

        let first = store
            .create(NewWriter::new("Anna Akhmatova", 6, 23))
            .await
            .unwrap();
        let second = store
            .create(NewWriter::new("Boris Pasternak", 2, 10))
            .await
            .unwrap();

        assert!(first.id > 0);
        assert_ne!(first.id, second.id);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_list_orders_by_month_day_name() {
        let store = InMemoryStore::new();
        store.create(NewWriter::new("Zoshchenko", 8, 10)).await.unwrap();
        store.create(NewWriter::new("Bunin", 10, 22)).await.unwrap();
        store.create(NewWriter::new("Gorky", 3, 28)).await.unwrap();
        store.create(NewWriter::new("Babel", 3, 28)).await.unwrap();

        let writers = store.list(&WriterFilter::new()).await.unwrap();
        let names: Vec<&str> = writers.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["Babel", "Gorky", "Zoshchenko", "Bunin"]);
    }

    #[tokio::test]
    async fn test_list_applies_conjunctive_filter() {
        let store = InMemoryStore::new();
        store.create(NewWriter::new("A", 3, 1)).await.unwrap();
        store.create(NewWriter::new("B", 3, 2)).await.unwrap();

        let writers = store
            .list(&WriterFilter::new().with_month(3).with_day(2))
            .await
            .unwrap();
        assert_eq!(writers.len(), 1);
        assert_eq!(writers[0].name, "B");
    }

    #[tokio::test]
    async fn test_update_is_sparse_and_refreshes_updated_at() {
        let store = InMemoryStore::new();
        let created = store
            .create(
                NewWriter::new("Osip Mandelstam", 1, 15).with_info("Acmeist poet"),
            )
            .await
            .unwrap();

        let updated = store
            .update(created.id, WriterUpdate::default().with_day(14))
            .await
            .unwrap();

        assert_eq!(updated.name, "Osip Mandelstam");
        assert_eq!(updated.info, "Acmeist poet");
        assert_eq!(updated.day, 14);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_empty_update_still_refreshes_updated_at() {
        let store = InMemoryStore::new();
        let created = store.create(NewWriter::new("Blok", 11, 28)).await.unwrap();

        let updated = store
            .update(created.id, WriterUpdate::default())
            .await
            .unwrap();

        assert_eq!(updated.name, created.name);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = InMemoryStore::new();
        let err = store
            .update(42, WriterUpdate::default().with_name("X"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::WriterNotFound));
    }

    #[tokio::test]
    async fn test_delete_is_permanent() {
        let store = InMemoryStore::new();
        let created = store.create(NewWriter::new("Gogol", 4, 1)).await.unwrap();

        store.delete(created.id).await.unwrap();

        let err = store.delete(created.id).await.unwrap_err();
        assert!(matches!(err, Error::WriterNotFound));
        assert!(store.list(&WriterFilter::new()).await.unwrap().is_empty());
    }
}
