use super::error_handling::{ErrorContext, HafalanError};
use super::search_paginator::SearchPaginator;
use crate::domain::hafalan::{HafalanRecord, HafalanUpdate, NewHafalan};
use crate::repository::DocumentStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct HafalanService {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl HafalanService {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub async fn create(&self, record: NewHafalan) -> Result<Uuid> {
        let record = NewHafalan::new(&record.nama, record.ayat_dihafal);
        let id = ErrorContext::new("create_hafalan")
            .with_detail("nama", &record.nama)
            .wrap(self.store.create(&self.collection, &record).await)
            .map_err(|e| store_failure("create", e))?;

        info!(doc_id = %id, nama = %record.nama, "Hafalan created");
        Ok(id)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<HafalanRecord>> {
        ErrorContext::new("get_hafalan")
            .with_detail("doc_id", id)
            .wrap(self.store.get(&self.collection, id).await)
            .map_err(|e| store_failure("get", e))
    }

    /// Stores a new verse count; the store refreshes `setoran_terakhir`.
    pub async fn update_ayat(&self, id: Uuid, ayat_dihafal: u32) -> Result<()> {
        let updated = ErrorContext::new("update_hafalan")
            .with_detail("doc_id", id)
            .with_detail("ayat_dihafal", ayat_dihafal)
            .wrap(
                self.store
                    .update(&self.collection, id, &HafalanUpdate { ayat_dihafal })
                    .await,
            )
            .map_err(|e| store_failure("update", e))?;

        if !updated {
            return Err(HafalanError::NotFound { id }.into());
        }
        info!(doc_id = %id, ayat_dihafal, "Hafalan updated");
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let deleted = ErrorContext::new("delete_hafalan")
            .with_detail("doc_id", id)
            .wrap(self.store.delete(&self.collection, id).await)
            .map_err(|e| store_failure("delete", e))?;

        if !deleted {
            return Err(HafalanError::NotFound { id }.into());
        }
        info!(doc_id = %id, "Hafalan deleted");
        Ok(())
    }

    /// A fresh paginator over the same collection.
    pub fn paginator(&self, page_size: usize) -> SearchPaginator {
        SearchPaginator::new(self.store.clone(), self.collection.clone(), page_size)
    }
}

fn store_failure(operation: &str, source: anyhow::Error) -> anyhow::Error {
    HafalanError::Store {
        operation: operation.to_string(),
        source,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::database::init_test_database;
    use crate::repository::{HafalanRepository, DEFAULT_COLLECTION};

    async fn setup() -> HafalanService {
        let pool = init_test_database().await.unwrap();
        let store: Arc<dyn DocumentStore> = Arc::new(HafalanRepository::new(pool));
        HafalanService::new(store, DEFAULT_COLLECTION)
    }

    #[tokio::test]
    async fn test_create_lowercases_name() {
        let service = setup().await;
        let id = service
            .create(NewHafalan {
                nama: "AHMAD".to_string(),
                ayat_dihafal: 3,
            })
            .await
            .unwrap();

        let record = service.get(id).await.unwrap().unwrap();
        assert_eq!(record.nama, "ahmad");
        assert_eq!(record.ayat_dihafal, 3);
    }

    #[tokio::test]
    async fn test_update_ayat() {
        let service = setup().await;
        let id = service.create(NewHafalan::new("fatimah", 5)).await.unwrap();

        service.update_ayat(id, 7).await.unwrap();

        let record = service.get(id).await.unwrap().unwrap();
        assert_eq!(record.ayat_dihafal, 7);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = setup().await;
        let error = service.update_ayat(Uuid::new_v4(), 1).await.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<HafalanError>(),
            Some(HafalanError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_store_errors_are_wrapped() {
        let store = crate::repository::mock::MemoryDocumentStore::new();
        store.set_failing(true);
        let service = HafalanService::new(Arc::new(store), DEFAULT_COLLECTION);

        let error = service.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<HafalanError>(),
            Some(HafalanError::Store { operation, .. }) if operation == "get"
        ));
        assert!(format!("{:#}", error).contains("connection reset"));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = setup().await;
        let id = service.create(NewHafalan::new("umar", 2)).await.unwrap();

        service.delete(id).await.unwrap();
        assert!(service.get(id).await.unwrap().is_none());
        assert!(service.delete(id).await.is_err());
    }

    #[tokio::test]
    async fn test_paginator_searches_created_records() {
        let service = setup().await;
        service.create(NewHafalan::new("Ahmad", 3)).await.unwrap();
        service.create(NewHafalan::new("Bilal", 1)).await.unwrap();

        let paginator = service.paginator(5);
        paginator.start_search("ah").await;

        let items = paginator.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].nama, "ahmad");
    }
}
