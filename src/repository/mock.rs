use super::DocumentStore;
use crate::domain::hafalan::{HafalanRecord, HafalanUpdate, NewHafalan, RangeQuery};
use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use uuid::Uuid;

/// In-memory store for tests, with call history, injected failures and
/// per-prefix latency.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    records: Arc<Mutex<Vec<(String, HafalanRecord)>>>,
    call_history: Arc<Mutex<Vec<MockCall>>>,
    query_delays: Arc<Mutex<HashMap<String, u64>>>,
    failing: Arc<Mutex<bool>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Query { collection: String, query: RangeQuery },
    Get { collection: String, id: Uuid },
    Create { collection: String, nama: String },
    Update { collection: String, id: Uuid, ayat_dihafal: u32 },
    Delete { collection: String, id: Uuid },
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every query whose lower bound equals `prefix`.
    pub fn with_query_delay(self, prefix: &str, delay_ms: u64) -> Self {
        self.query_delays.lock().insert(prefix.to_string(), delay_ms);
        self
    }

    /// Makes every subsequent call fail until reset.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    pub fn insert(&self, collection: &str, record: HafalanRecord) {
        self.records.lock().push((collection.to_string(), record));
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.call_history.lock().clone()
    }

    pub fn query_count(&self) -> usize {
        self.call_history
            .lock()
            .iter()
            .filter(|c| matches!(c, MockCall::Query { .. }))
            .count()
    }

    pub fn delete_count(&self) -> usize {
        self.call_history
            .lock()
            .iter()
            .filter(|c| matches!(c, MockCall::Delete { .. }))
            .count()
    }

    fn record_call(&self, call: MockCall) -> Result<()> {
        self.call_history.lock().push(call);
        if *self.failing.lock() {
            bail!("connection reset by mock store");
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query(&self, collection: &str, query: &RangeQuery) -> Result<Vec<HafalanRecord>> {
        self.record_call(MockCall::Query {
            collection: collection.to_string(),
            query: query.clone(),
        })?;

        let delay = self.query_delays.lock().get(&query.lower).copied();
        if let Some(ms) = delay {
            sleep(Duration::from_millis(ms)).await;
        }

        let mut page: Vec<HafalanRecord> = self
            .records
            .lock()
            .iter()
            .filter(|(c, r)| c == collection && query.matches(&r.nama, r.id))
            .map(|(_, r)| r.clone())
            .collect();
        page.sort_by(|a, b| (&a.nama, a.id).cmp(&(&b.nama, b.id)));
        page.truncate(query.limit);

        Ok(page)
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<HafalanRecord>> {
        self.record_call(MockCall::Get {
            collection: collection.to_string(),
            id,
        })?;

        Ok(self
            .records
            .lock()
            .iter()
            .find(|(c, r)| c == collection && r.id == id)
            .map(|(_, r)| r.clone()))
    }

    async fn create(&self, collection: &str, record: &NewHafalan) -> Result<Uuid> {
        self.record_call(MockCall::Create {
            collection: collection.to_string(),
            nama: record.nama.clone(),
        })?;

        let id = Uuid::new_v4();
        self.insert(
            collection,
            HafalanRecord {
                id,
                nama: record.nama.clone(),
                ayat_dihafal: record.ayat_dihafal,
                setoran_terakhir: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn update(&self, collection: &str, id: Uuid, update: &HafalanUpdate) -> Result<bool> {
        self.record_call(MockCall::Update {
            collection: collection.to_string(),
            id,
            ayat_dihafal: update.ayat_dihafal,
        })?;

        let mut records = self.records.lock();
        match records.iter_mut().find(|(c, r)| c == collection && r.id == id) {
            Some((_, record)) => {
                record.ayat_dihafal = update.ayat_dihafal;
                record.setoran_terakhir = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool> {
        self.record_call(MockCall::Delete {
            collection: collection.to_string(),
            id,
        })?;

        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|(c, r)| !(c == collection && r.id == id));
        Ok(records.len() < before)
    }
}
