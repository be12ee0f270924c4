use crate::domain::hafalan::HafalanRecord;
use crate::services::error_handling::LogHelper;
use crate::services::HafalanService;
use crate::ui::notifier::{Alert, Notifier, TITLE_CONFIRM};
use chrono::{DateTime, Datelike, Local, TimeZone};
use std::fmt::Write;
use uuid::Uuid;

pub const NOT_FOUND_MESSAGE: &str = "Data tidak ditemukan";
pub const UPDATED_MESSAGE: &str = "Data berhasil diupdate";
pub const UPDATE_FAILED_MESSAGE: &str = "Gagal mengupdate data";
pub const DELETE_PROMPT: &str = "Apakah Anda yakin ingin menghapus data ini?";
pub const DELETED_MESSAGE: &str = "Data berhasil dihapus";
pub const DELETE_FAILED_MESSAGE: &str = "Gagal menghapus data";

const BULAN: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// One record with a local verse counter that is written back on update.
pub struct DetailView {
    service: HafalanService,
    doc_id: Uuid,
    data: Option<HafalanRecord>,
    loading: bool,
    ayat_count: u32,
}

impl DetailView {
    pub fn new(service: HafalanService, doc_id: Uuid) -> Self {
        Self {
            service,
            doc_id,
            data: None,
            loading: true,
            ayat_count: 0,
        }
    }

    /// A missing record and a failed read both end in the empty state.
    pub async fn load(&mut self) {
        match self.service.get(self.doc_id).await {
            Ok(Some(record)) => {
                self.ayat_count = record.ayat_dihafal;
                self.data = Some(record);
            }
            Ok(None) => {
                self.data = None;
            }
            Err(e) => {
                LogHelper::log_error_with_context("Error fetching document", &e);
                self.data = None;
            }
        }
        self.loading = false;
    }

    pub fn increment(&mut self) {
        self.ayat_count = self.ayat_count.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.ayat_count = self.ayat_count.saturating_sub(1);
    }

    /// Writes the local counter to the store.
    pub async fn handle_update(&mut self, notifier: &dyn Notifier) -> bool {
        if self.data.is_none() {
            return false;
        }

        match self.service.update_ayat(self.doc_id, self.ayat_count).await {
            Ok(()) => {
                notifier.alert(&Alert::success(UPDATED_MESSAGE));
                if let Some(data) = self.data.as_mut() {
                    data.ayat_dihafal = self.ayat_count;
                }
                true
            }
            Err(e) => {
                LogHelper::log_error_with_context("Error updating document", &e);
                notifier.alert(&Alert::error(UPDATE_FAILED_MESSAGE));
                false
            }
        }
    }

    /// Asks for confirmation, then deletes. Returns true when the screen
    /// should close.
    pub async fn handle_delete(&mut self, notifier: &dyn Notifier) -> bool {
        if !notifier.confirm(TITLE_CONFIRM, DELETE_PROMPT) {
            return false;
        }

        match self.service.delete(self.doc_id).await {
            Ok(()) => {
                notifier.alert(&Alert::success(DELETED_MESSAGE));
                true
            }
            Err(e) => {
                LogHelper::log_error_with_context("Error deleting document", &e);
                notifier.alert(&Alert::error(DELETE_FAILED_MESSAGE));
                false
            }
        }
    }

    pub fn doc_id(&self) -> Uuid {
        self.doc_id
    }

    pub fn data(&self) -> Option<&HafalanRecord> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn ayat_count(&self) -> u32 {
        self.ayat_count
    }

    pub fn formatted_setoran(&self) -> String {
        self.data
            .as_ref()
            .map(|data| format_tanggal(&data.setoran_terakhir.with_timezone(&Local)))
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn show(&self, out: &mut String) {
        if self.loading {
            let _ = writeln!(out, "Memuat...");
            return;
        }
        let Some(data) = &self.data else {
            let _ = writeln!(out, "{}", NOT_FOUND_MESSAGE);
            return;
        };

        let _ = writeln!(out, "Nama: {}", data.nama);
        let _ = writeln!(out, "Jumlah Ayat Dihafal: [-] {} [+]", self.ayat_count);
        let _ = writeln!(out, "Setoran Terakhir: {}", self.formatted_setoran());
    }
}

/// Long Indonesian date, e.g. "5 Januari 2025".
pub fn format_tanggal<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    let bulan = BULAN[date.month0() as usize];
    format!("{} {} {}", date.day(), bulan, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hafalan::NewHafalan;
    use crate::repository::mock::MemoryDocumentStore;
    use crate::repository::{DocumentStore, DEFAULT_COLLECTION};
    use crate::ui::notifier::mock::RecordingNotifier;
    use chrono::Utc;
    use std::sync::Arc;

    async fn setup(ayat: u32) -> (DetailView, MemoryDocumentStore) {
        let store = MemoryDocumentStore::new();
        let id = store
            .create(DEFAULT_COLLECTION, &NewHafalan::new("ahmad", ayat))
            .await
            .unwrap();
        let service = HafalanService::new(Arc::new(store.clone()), DEFAULT_COLLECTION);
        (DetailView::new(service, id), store)
    }

    #[test]
    fn test_format_tanggal() {
        let date = Utc.with_ymd_and_hms(2025, 1, 5, 10, 0, 0).unwrap();
        assert_eq!(format_tanggal(&date), "5 Januari 2025");

        let date = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(format_tanggal(&date), "31 Desember 2024");
    }

    #[tokio::test]
    async fn test_load_sets_counter() {
        let (mut view, _store) = setup(5).await;
        assert!(view.is_loading());

        view.load().await;

        assert!(!view.is_loading());
        assert_eq!(view.ayat_count(), 5);
        assert_eq!(view.data().unwrap().nama, "ahmad");
        assert_ne!(view.formatted_setoran(), "-");
    }

    #[tokio::test]
    async fn test_missing_record_renders_empty_state() {
        let store = MemoryDocumentStore::new();
        let service = HafalanService::new(Arc::new(store), DEFAULT_COLLECTION);
        let mut view = DetailView::new(service, Uuid::new_v4());

        view.load().await;

        assert!(!view.is_loading());
        assert!(view.data().is_none());
        assert_eq!(view.formatted_setoran(), "-");
        let mut out = String::new();
        view.show(&mut out);
        assert!(out.contains(NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn test_failed_load_renders_empty_state() {
        let (mut view, store) = setup(5).await;
        store.set_failing(true);

        view.load().await;

        assert!(!view.is_loading());
        assert!(view.data().is_none());
    }

    #[tokio::test]
    async fn test_counter_changes_are_local_until_update() {
        let (mut view, store) = setup(5).await;
        let notifier = RecordingNotifier::default();
        view.load().await;

        view.increment();
        view.increment();
        view.increment();
        view.decrement();
        assert_eq!(view.ayat_count(), 7);

        let stored = store.get(DEFAULT_COLLECTION, view.doc_id()).await.unwrap().unwrap();
        assert_eq!(stored.ayat_dihafal, 5);

        assert!(view.handle_update(&notifier).await);

        let stored = store.get(DEFAULT_COLLECTION, view.doc_id()).await.unwrap().unwrap();
        assert_eq!(stored.ayat_dihafal, 7);
        assert_eq!(view.data().unwrap().ayat_dihafal, 7);
        assert_eq!(notifier.last_alert(), Some(Alert::success(UPDATED_MESSAGE)));
    }

    #[tokio::test]
    async fn test_decrement_stops_at_zero() {
        let (mut view, _store) = setup(1).await;
        view.load().await;

        view.decrement();
        view.decrement();
        assert_eq!(view.ayat_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_update_alerts() {
        let (mut view, store) = setup(5).await;
        let notifier = RecordingNotifier::default();
        view.load().await;
        view.increment();

        store.set_failing(true);
        assert!(!view.handle_update(&notifier).await);

        assert_eq!(notifier.last_alert(), Some(Alert::error(UPDATE_FAILED_MESSAGE)));
        assert_eq!(view.data().unwrap().ayat_dihafal, 5);
    }

    #[tokio::test]
    async fn test_declined_delete_does_nothing() {
        let (mut view, store) = setup(5).await;
        let notifier = RecordingNotifier::answering(false);
        view.load().await;
        let before = view.data().cloned();

        assert!(!view.handle_delete(&notifier).await);

        assert_eq!(store.delete_count(), 0);
        assert_eq!(view.data().cloned(), before);
        assert!(notifier.alerts().is_empty());
        assert_eq!(notifier.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_record() {
        let (mut view, store) = setup(5).await;
        let notifier = RecordingNotifier::answering(true);
        view.load().await;

        assert!(view.handle_delete(&notifier).await);

        assert_eq!(store.delete_count(), 1);
        assert!(store.get(DEFAULT_COLLECTION, view.doc_id()).await.unwrap().is_none());
        assert_eq!(notifier.last_alert(), Some(Alert::success(DELETED_MESSAGE)));
    }

    #[tokio::test]
    async fn test_failed_delete_alerts() {
        let (mut view, store) = setup(5).await;
        let notifier = RecordingNotifier::answering(true);
        view.load().await;
        store.set_failing(true);

        assert!(!view.handle_delete(&notifier).await);
        assert_eq!(notifier.last_alert(), Some(Alert::error(DELETE_FAILED_MESSAGE)));
    }
}
