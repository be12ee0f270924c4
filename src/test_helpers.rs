// Test helpers for integration testing

use crate::domain::hafalan::NewHafalan;
use crate::repository::database::init_test_database;
use crate::repository::{DocumentStore, HafalanRepository, DEFAULT_COLLECTION};
use crate::services::HafalanService;
use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

pub struct TestContext {
    pub store: Arc<dyn DocumentStore>,
    pub service: HafalanService,
}

impl TestContext {
    /// Fresh in-memory SQLite store with migrations applied.
    pub async fn new_for_test() -> Result<Self> {
        let pool = init_test_database().await?;
        let store: Arc<dyn DocumentStore> = Arc::new(HafalanRepository::new(pool));
        let service = HafalanService::new(store.clone(), DEFAULT_COLLECTION);
        Ok(Self { store, service })
    }

    pub async fn seed(&self, names: &[&str]) -> Result<Vec<Uuid>> {
        let mut ids = Vec::with_capacity(names.len());
        for nama in names {
            ids.push(self.service.create(NewHafalan::new(nama, 1)).await?);
        }
        Ok(ids)
    }
}
