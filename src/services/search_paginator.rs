use crate::domain::hafalan::{HafalanRecord, PageCursor, RangeQuery};
use crate::repository::DocumentStore;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Incremental prefix search over a collection, fetched in fixed-size pages.
///
/// A new fragment restarts the scan; `load_more` continues it from the last
/// record seen. Each restart bumps a generation counter and a fetch only lands
/// if its generation is still current, so a slow response for an old fragment
/// can never overwrite newer results.
pub struct SearchPaginator {
    store: Arc<dyn DocumentStore>,
    collection: String,
    page_size: usize,
    state: Mutex<PaginatorState>,
}

#[derive(Debug)]
struct PaginatorState {
    fragment: String,
    accumulated: Vec<HafalanRecord>,
    seen: HashSet<Uuid>,
    cursor: Option<PageCursor>,
    has_more: bool,
    loading: bool,
    generation: u64,
    closed: bool,
}

impl Default for PaginatorState {
    fn default() -> Self {
        Self {
            fragment: String::new(),
            accumulated: Vec::new(),
            seen: HashSet::new(),
            cursor: None,
            has_more: true,
            loading: false,
            generation: 0,
            closed: false,
        }
    }
}

impl PaginatorState {
    fn reset(&mut self, fragment: String) {
        self.generation += 1;
        self.fragment = fragment;
        self.accumulated.clear();
        self.seen.clear();
        self.cursor = None;
        self.has_more = true;
        self.loading = false;
    }
}

/// Point-in-time copy of what the list should render.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatorSnapshot {
    pub fragment: String,
    pub items: Vec<HafalanRecord>,
    pub has_more: bool,
    pub loading: bool,
}

struct PageRequest {
    generation: u64,
    fragment: String,
    start_after: Option<PageCursor>,
    append: bool,
}

impl SearchPaginator {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>, page_size: usize) -> Self {
        Self {
            store,
            collection: collection.into(),
            page_size: page_size.max(1),
            state: Mutex::new(PaginatorState::default()),
        }
    }

    /// Restarts the search for `fragment`. A blank fragment clears the results
    /// without touching the store.
    pub async fn start_search(&self, fragment: &str) {
        let fragment = fragment.to_lowercase();

        let request = {
            let mut state = self.state.lock();
            if state.closed {
                return;
            }
            state.reset(fragment.clone());
            if fragment.trim().is_empty() {
                debug!("blank fragment, results cleared");
                return;
            }
            state.loading = true;
            PageRequest {
                generation: state.generation,
                fragment,
                start_after: None,
                append: false,
            }
        };

        self.fetch_page(request).await;
    }

    /// Fetches the next page for the current fragment. Does nothing while a
    /// fetch is outstanding or once the last page has been seen.
    pub async fn load_more(&self) {
        let request = {
            let mut state = self.state.lock();
            if state.closed
                || state.loading
                || !state.has_more
                || state.fragment.trim().is_empty()
            {
                return;
            }
            state.loading = true;
            PageRequest {
                generation: state.generation,
                fragment: state.fragment.clone(),
                start_after: state.cursor.clone(),
                append: true,
            }
        };

        self.fetch_page(request).await;
    }

    /// Issues exactly one store read and folds the page into the state if the
    /// request is still current. Failures are logged and leave results as
    /// they were.
    async fn fetch_page(&self, request: PageRequest) {
        let query = RangeQuery::prefix(&request.fragment, self.page_size).start_after(if request.append {
            request.start_after
        } else {
            None
        });

        let result = self.store.query(&self.collection, &query).await;

        let mut state = self.state.lock();
        if state.closed || state.generation != request.generation {
            debug!(
                fragment = %request.fragment,
                generation = request.generation,
                "discarding stale search page"
            );
            return;
        }
        state.loading = false;

        match result {
            Ok(page) => {
                let full_page = page.len() == self.page_size;
                if let Some(last) = page.last() {
                    state.cursor = Some(last.cursor());
                }
                if !request.append {
                    state.accumulated.clear();
                    state.seen.clear();
                }
                for record in page {
                    if state.seen.insert(record.id) {
                        state.accumulated.push(record);
                    }
                }
                state.has_more = full_page;

                debug!(
                    fragment = %request.fragment,
                    total = state.accumulated.len(),
                    has_more = state.has_more,
                    "search page loaded"
                );
            }
            Err(e) => {
                error!(
                    fragment = %request.fragment,
                    append = request.append,
                    error = %e,
                    "Error searching documents"
                );
            }
        }
    }

    /// Stops accepting results. Completions arriving afterwards are dropped.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.generation += 1;
        state.loading = false;
    }

    pub fn snapshot(&self) -> PaginatorSnapshot {
        let state = self.state.lock();
        PaginatorSnapshot {
            fragment: state.fragment.clone(),
            items: state.accumulated.clone(),
            has_more: state.has_more,
            loading: state.loading,
        }
    }

    pub fn items(&self) -> Vec<HafalanRecord> {
        self.state.lock().accumulated.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().accumulated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_more(&self) -> bool {
        self.state.lock().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}
