//! Record store adapter.
//!
//! The system of record is a hierarchical key-value tree with push
//! notifications: five named collections, each a child map of key -> record
//! object. [`RecordStore`] is the seam the services hold; it converts the
//! child-map representation into an ordered list of records tagged with
//! their key as `id`. Iteration order is implementation-defined and
//! consumers must sort explicitly.

pub mod memory;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio_stream::wrappers::WatchStream;

pub use memory::MemoryStore;

/// Named collections of the data tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Vehicles,
    Customers,
    Rentals,
    Billing,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Vehicles,
        Collection::Customers,
        Collection::Rentals,
        Collection::Billing,
        Collection::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Vehicles => "vehicles",
            Collection::Customers => "customers",
            Collection::Rentals => "rentals",
            Collection::Billing => "billing",
            Collection::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the store contract.
/// Operations are never retried; callers report the failure and leave local
/// state to the next store push.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no record at {collection}/{key}")]
    NoSuchRecord { collection: Collection, key: String },

    #[error("value at {collection}/{key} is not a record object")]
    NotAnObject { collection: Collection, key: String },

    #[error("record serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Stream of collection snapshots. Yields the current snapshot immediately
/// on subscription, then again after every change. Dropping the stream
/// releases the subscription.
pub type RecordStream = WatchStream<Vec<Value>>;

/// Shared handle to a record store implementation
pub type SharedStore = Arc<dyn RecordStore>;

/// Contract consumed from the external record store.
///
/// Every record returned by `snapshot`/`get` is a JSON object carrying its
/// store key under `"id"`. Writes are whole-record; `update` is a
/// field-level merge so concurrent writers do not clobber fields they did
/// not touch.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Current contents of a collection as an id-tagged record list
    async fn snapshot(&self, collection: Collection) -> Result<Vec<Value>, StoreError>;

    /// Single record by key, id-tagged
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError>;

    /// Write a full record at `collection/key`, replacing any existing value
    async fn write(&self, collection: Collection, key: &str, record: Value)
        -> Result<(), StoreError>;

    /// Merge the fields of `patch` into the record at `collection/key`
    async fn update(&self, collection: Collection, key: &str, patch: Value)
        -> Result<(), StoreError>;

    /// Remove the record at `collection/key`; no-op if the key is absent
    async fn delete(&self, collection: Collection, key: &str) -> Result<(), StoreError>;

    /// Subscribe to a collection's snapshots
    async fn subscribe(&self, collection: Collection) -> Result<RecordStream, StoreError>;
}

/// Decode an id-tagged record into a typed model
pub fn decode_record<T: DeserializeOwned>(record: Value) -> Result<T, StoreError> {
    Ok(serde_json::from_value(record)?)
}

/// Decode a collection snapshot into typed models, preserving order
pub fn decode_records<T: DeserializeOwned>(records: Vec<Value>) -> Result<Vec<T>, StoreError> {
    records.into_iter().map(decode_record).collect()
}
