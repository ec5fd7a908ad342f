//! In-process record store.
//!
//! Implements the external store contract for tests and for shells that run
//! without the hosted backend: last-write-wins semantics, no transactions,
//! change notification through a per-collection watch channel. Child maps
//! keep insertion order, but nothing beyond the [`RecordStore`] contract's
//! "implementation-defined order" should be read into that.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::{watch, RwLock};
use tokio_stream::wrappers::WatchStream;

use super::{Collection, RecordStore, RecordStream, StoreError};

struct CollectionCell {
    records: IndexMap<String, Value>,
    tx: watch::Sender<Vec<Value>>,
}

impl CollectionCell {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            records: IndexMap::new(),
            tx,
        }
    }

    /// Child map -> id-tagged record list
    fn snapshot(&self) -> Vec<Value> {
        self.records
            .iter()
            .map(|(key, value)| tag_with_id(key, value))
            .collect()
    }

    fn publish(&self) {
        self.tx.send_replace(self.snapshot());
    }
}

fn tag_with_id(key: &str, value: &Value) -> Value {
    let mut record = value.clone();
    if let Some(object) = record.as_object_mut() {
        object.insert("id".to_string(), Value::String(key.to_string()));
    }
    record
}

/// In-memory implementation of [`RecordStore`]
pub struct MemoryStore {
    vehicles: RwLock<CollectionCell>,
    customers: RwLock<CollectionCell>,
    rentals: RwLock<CollectionCell>,
    billing: RwLock<CollectionCell>,
    users: RwLock<CollectionCell>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            vehicles: RwLock::new(CollectionCell::new()),
            customers: RwLock::new(CollectionCell::new()),
            rentals: RwLock::new(CollectionCell::new()),
            billing: RwLock::new(CollectionCell::new()),
            users: RwLock::new(CollectionCell::new()),
        }
    }

    fn cell(&self, collection: Collection) -> &RwLock<CollectionCell> {
        match collection {
            Collection::Vehicles => &self.vehicles,
            Collection::Customers => &self.customers,
            Collection::Rentals => &self.rentals,
            Collection::Billing => &self.billing,
            Collection::Users => &self.users,
        }
    }

    /// Number of live subscriptions on a collection
    pub async fn watchers(&self, collection: Collection) -> usize {
        self.cell(collection).read().await.tx.receiver_count()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn snapshot(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        Ok(self.cell(collection).read().await.snapshot())
    }

    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError> {
        let cell = self.cell(collection).read().await;
        Ok(cell.records.get(key).map(|value| tag_with_id(key, value)))
    }

    async fn write(
        &self,
        collection: Collection,
        key: &str,
        record: Value,
    ) -> Result<(), StoreError> {
        if !record.is_object() {
            return Err(StoreError::NotAnObject {
                collection,
                key: key.to_string(),
            });
        }
        let mut cell = self.cell(collection).write().await;
        let replaced = cell.records.insert(key.to_string(), record).is_some();
        cell.publish();
        tracing::debug!(%collection, key, replaced, "record written");
        Ok(())
    }

    async fn update(
        &self,
        collection: Collection,
        key: &str,
        patch: Value,
    ) -> Result<(), StoreError> {
        let fields = match patch {
            Value::Object(fields) => fields,
            _ => {
                return Err(StoreError::NotAnObject {
                    collection,
                    key: key.to_string(),
                })
            }
        };
        let mut cell = self.cell(collection).write().await;
        let record = cell
            .records
            .get_mut(key)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| StoreError::NoSuchRecord {
                collection,
                key: key.to_string(),
            })?;
        for (name, value) in fields {
            record.insert(name, value);
        }
        cell.publish();
        tracing::debug!(%collection, key, "record patched");
        Ok(())
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<(), StoreError> {
        let mut cell = self.cell(collection).write().await;
        if cell.records.shift_remove(key).is_some() {
            cell.publish();
            tracing::debug!(%collection, key, "record deleted");
        }
        Ok(())
    }

    async fn subscribe(&self, collection: Collection) -> Result<RecordStream, StoreError> {
        let cell = self.cell(collection).read().await;
        Ok(WatchStream::new(cell.tx.subscribe()))
    }
}
