use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound appended to a prefix so that a range scan covers every string
/// starting with that prefix.
pub const PREFIX_SENTINEL: char = char::MAX;

/// A memorization record as stored in the collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HafalanRecord {
    pub id: Uuid,
    pub nama: String,
    pub ayat_dihafal: u32,
    pub setoran_terakhir: DateTime<Utc>, // assigned by the store on every write
}

impl HafalanRecord {
    /// Resume point for a scan that should continue after this record.
    pub fn cursor(&self) -> PageCursor {
        PageCursor {
            nama: self.nama.clone(),
            id: self.id,
        }
    }
}

/// Fields supplied by the user when a record is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewHafalan {
    pub nama: String,
    pub ayat_dihafal: u32,
}

impl NewHafalan {
    pub fn new(nama: impl AsRef<str>, ayat_dihafal: u32) -> Self {
        Self {
            nama: nama.as_ref().to_lowercase(),
            ayat_dihafal,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HafalanUpdate {
    pub ayat_dihafal: u32,
}

/// Opaque position of the last record of a fetched page.
///
/// Ordering is `(nama, id)`, so records sharing a name are never skipped or
/// repeated across pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub(crate) nama: String,
    pub(crate) id: Uuid,
}

/// Range query over the `nama` index: `lower <= nama < upper`, ordered by
/// `nama` ascending, at most `limit` records, resumed after `start_after`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    pub lower: String,
    pub upper: String,
    pub limit: usize,
    pub start_after: Option<PageCursor>,
}

impl RangeQuery {
    /// Query matching every `nama` that starts with `prefix`.
    pub fn prefix(prefix: &str, limit: usize) -> Self {
        let mut upper = String::with_capacity(prefix.len() + PREFIX_SENTINEL.len_utf8());
        upper.push_str(prefix);
        upper.push(PREFIX_SENTINEL);

        Self {
            lower: prefix.to_string(),
            upper,
            limit,
            start_after: None,
        }
    }

    pub fn start_after(mut self, cursor: Option<PageCursor>) -> Self {
        self.start_after = cursor;
        self
    }

    /// Whether `nama` falls inside the range. Also checks the cursor.
    pub fn matches(&self, nama: &str, id: Uuid) -> bool {
        if nama < self.lower.as_str() || nama >= self.upper.as_str() {
            return false;
        }
        match &self.start_after {
            Some(cursor) => (nama, id) > (cursor.nama.as_str(), cursor.id),
            None => true,
        }
    }
}
