use crate::config::AppConfig;
use crate::domain::hafalan::HafalanRecord;
use crate::services::debounce::Debouncer;
use crate::services::search_paginator::SearchPaginator;
use crate::services::HafalanService;
use crate::ui::navigation::Route;
use std::fmt::Write;
use std::sync::Arc;
use tracing::debug;

pub const NO_RESULTS_MESSAGE: &str = "Tidak ada hasil";

/// Search-as-you-type list of records.
pub struct HomeView {
    paginator: Arc<SearchPaginator>,
    debouncer: Debouncer<String>,
    search_query: String,
    end_reached_threshold: f32,
}

impl HomeView {
    /// Must be created inside a tokio runtime; typed searches run as spawned
    /// tasks once the debounce period elapses.
    pub fn new(service: &HafalanService, config: &AppConfig) -> Self {
        let paginator = Arc::new(service.paginator(config.page_size));

        let target = paginator.clone();
        let debouncer = Debouncer::new(config.debounce(), move |text: String| {
            let paginator = target.clone();
            tokio::spawn(async move {
                paginator.start_search(&text).await;
            });
        });

        Self {
            paginator,
            debouncer,
            search_query: String::new(),
            end_reached_threshold: config.end_reached_threshold,
        }
    }

    pub fn handle_search(&mut self, text: &str) {
        self.search_query = text.to_string();
        self.debouncer.schedule(text.to_string());
    }

    /// Runs the current search again right away, e.g. after returning from a
    /// screen that changed the collection.
    pub async fn refresh(&self) {
        self.debouncer.cancel();
        self.paginator.start_search(&self.search_query).await;
    }

    pub async fn on_end_reached(&self) {
        self.paginator.load_more().await;
    }

    /// Requests the next page when the last visible row is within the
    /// configured threshold of the end. Returns whether it did.
    pub async fn on_scroll(&self, last_visible_index: usize, visible_count: usize) -> bool {
        let total = self.paginator.len();
        if !within_end_threshold(last_visible_index, visible_count, total, self.end_reached_threshold) {
            return false;
        }
        debug!(last_visible_index, visible_count, total, "end of list reached");
        self.on_end_reached().await;
        true
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn items(&self) -> Vec<HafalanRecord> {
        self.paginator.items()
    }

    pub fn is_loading(&self) -> bool {
        self.paginator.is_loading()
    }

    pub fn has_more(&self) -> bool {
        self.paginator.has_more()
    }

    pub fn show_footer_loader(&self) -> bool {
        let snapshot = self.paginator.snapshot();
        snapshot.loading && snapshot.has_more
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        if self.search_query.trim().is_empty() {
            return None;
        }
        let snapshot = self.paginator.snapshot();
        (snapshot.items.is_empty() && !snapshot.loading).then_some(NO_RESULTS_MESSAGE)
    }

    pub fn select(&self, index: usize) -> Option<Route> {
        self.paginator
            .items()
            .get(index)
            .map(|record| Route::Detail { doc_id: record.id })
    }

    pub fn open_create(&self) -> Route {
        Route::Create
    }

    /// Drops any pending search and ignores fetches still in flight.
    pub fn unmount(&self) {
        self.debouncer.cancel();
        self.paginator.close();
    }

    pub fn show(&self, out: &mut String) {
        let _ = writeln!(out, "Welcome lur...");
        let _ = writeln!(out, "Cari nama: {}", self.search_query);

        let items = self.items();
        for (index, record) in items.iter().enumerate() {
            let _ = writeln!(out, "  {:>3}. {}", index + 1, record.nama);
        }
        if let Some(message) = self.empty_message() {
            let _ = writeln!(out, "  {}", message);
        }
        if self.show_footer_loader() {
            let _ = writeln!(out, "  (memuat...)");
        }
    }
}

/// Distance from the last visible row to the end of the list, measured in
/// visible lengths, is at most `threshold`.
pub fn within_end_threshold(
    last_visible_index: usize,
    visible_count: usize,
    total: usize,
    threshold: f32,
) -> bool {
    if total == 0 || visible_count == 0 {
        return false;
    }
    let remaining = total.saturating_sub(last_visible_index + 1);
    (remaining as f32 / visible_count as f32) <= threshold
}
