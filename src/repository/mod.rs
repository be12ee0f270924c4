pub mod database;
pub mod hafalan_repository;
pub mod mock;

use crate::domain::hafalan::{HafalanRecord, HafalanUpdate, NewHafalan, RangeQuery};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub use hafalan_repository::HafalanRepository;

/// Collection holding the memorization records.
pub const DEFAULT_COLLECTION: &str = "data_hafalan";

/// Client for a document collection - allows for mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Ordered page of records whose `nama` lies in the query range.
    async fn query(&self, collection: &str, query: &RangeQuery) -> Result<Vec<HafalanRecord>>;

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<HafalanRecord>>;

    /// Inserts a record, stamping `setoran_terakhir`, and returns its new id.
    async fn create(&self, collection: &str, record: &NewHafalan) -> Result<Uuid>;

    /// Returns false when no record with `id` exists.
    async fn update(&self, collection: &str, id: Uuid, update: &HafalanUpdate) -> Result<bool>;

    /// Returns false when no record with `id` exists.
    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool>;
}
