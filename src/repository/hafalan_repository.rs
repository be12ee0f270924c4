use super::DocumentStore;
use crate::domain::hafalan::{HafalanRecord, HafalanUpdate, NewHafalan, RangeQuery};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

/// SQLite-backed document store.
#[derive(Clone)]
pub struct HafalanRepository {
    pool: Arc<SqlitePool>,
}

impl HafalanRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    fn record_from_row(row: &SqliteRow) -> Result<HafalanRecord> {
        let id: String = row.get("id");
        let ayat: i64 = row.get("ayat_dihafal");
        let setoran: String = row.get("setoran_terakhir");

        Ok(HafalanRecord {
            id: Uuid::parse_str(&id)?,
            nama: row.get("nama"),
            ayat_dihafal: u32::try_from(ayat)
                .with_context(|| format!("ayat_dihafal out of range: {}", ayat))?,
            setoran_terakhir: DateTime::parse_from_rfc3339(&setoran)?.with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl DocumentStore for HafalanRepository {
    async fn query(&self, collection: &str, query: &RangeQuery) -> Result<Vec<HafalanRecord>> {
        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);

        let rows = match &query.start_after {
            Some(cursor) => {
                sqlx::query(
                    r#"
                    SELECT id, nama, ayat_dihafal, setoran_terakhir
                    FROM documents
                    WHERE collection = ? AND nama >= ? AND nama < ?
                      AND (nama > ? OR (nama = ? AND id > ?))
                    ORDER BY nama ASC, id ASC
                    LIMIT ?
                    "#,
                )
                .bind(collection)
                .bind(&query.lower)
                .bind(&query.upper)
                .bind(&cursor.nama)
                .bind(&cursor.nama)
                .bind(cursor.id.to_string())
                .bind(limit)
                .fetch_all(self.pool.as_ref())
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, nama, ayat_dihafal, setoran_terakhir
                    FROM documents
                    WHERE collection = ? AND nama >= ? AND nama < ?
                    ORDER BY nama ASC, id ASC
                    LIMIT ?
                    "#,
                )
                .bind(collection)
                .bind(&query.lower)
                .bind(&query.upper)
                .bind(limit)
                .fetch_all(self.pool.as_ref())
                .await?
            }
        };

        rows.iter().map(Self::record_from_row).collect()
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<HafalanRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, nama, ayat_dihafal, setoran_terakhir
            FROM documents
            WHERE collection = ? AND id = ?
            "#,
        )
        .bind(collection)
        .bind(id.to_string())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn create(&self, collection: &str, record: &NewHafalan) -> Result<Uuid> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, nama, ayat_dihafal, setoran_terakhir)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(collection)
        .bind(id.to_string())
        .bind(&record.nama)
        .bind(i64::from(record.ayat_dihafal))
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool.as_ref())
        .await?;

        Ok(id)
    }

    async fn update(&self, collection: &str, id: Uuid, update: &HafalanUpdate) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE documents SET ayat_dihafal = ?, setoran_terakhir = ?
            WHERE collection = ? AND id = ?
            "#,
        )
        .bind(i64::from(update.ayat_dihafal))
        .bind(Utc::now().to_rfc3339())
        .bind(collection)
        .bind(id.to_string())
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id.to_string())
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
