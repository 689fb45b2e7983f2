//! PostgreSQL storage backend.
//!
//! Expects a `writers` table:
//!
//! ```sql
//! CREATE TABLE writers (
//!     id          SERIAL PRIMARY KEY,
//!     name        TEXT NOT NULL,
//!     info        TEXT NOT NULL DEFAULT '',
//!     image_url   TEXT NOT NULL DEFAULT '',
//!     month       INTEGER NOT NULL,
//!     day         INTEGER NOT NULL,
//!     tags        TEXT[] NOT NULL DEFAULT '{}',
//!     created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! Schema provisioning is handled outside this service.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

use almanack_core::{Error, NewWriter, Result, Writer, WriterFilter, WriterUpdate};

use crate::store::WriterStore;

/// Columns selected for every writer row.
const WRITER_COLUMNS: &str = "id, name, info, image_url, month, day, tags, created_at, updated_at";

/// PostgreSQL-backed writer store.
///
/// Holds a connection pool created once at startup; every operation
/// acquires from the pool, so connections are released on all exit paths.
pub struct PgWriterStore {
    pool: PgPool,
}

impl PgWriterStore {
    /// Connects to the database at `database_url`.
    ///
    /// # Errors
    ///
    /// Returns a database error if the connection cannot be established.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(db_err)?;

        tracing::info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(err: sqlx::Error) -> Error {
    Error::database(err.to_string())
}

/// Builds the list statement: conjunctive `AND` clauses for the set
/// filter fields, values always bound, fixed ordering.
fn list_query(filter: &WriterFilter) -> QueryBuilder<'static, Postgres> {
    let mut query =
        QueryBuilder::new(format!("SELECT {WRITER_COLUMNS} FROM writers WHERE 1=1"));

    if let Some(search) = &filter.search {
        query.push(" AND name ILIKE ");
        query.push_bind(format!("%{search}%"));
    }
    if let Some(month) = filter.month {
        query.push(" AND month = ");
        query.push_bind(month);
    }
    if let Some(day) = filter.day {
        query.push(" AND day = ");
        query.push_bind(day);
    }
    if let Some(tag) = &filter.tag {
        query.push(" AND ");
        query.push_bind(tag.clone());
        query.push(" = ANY(tags)");
    }

    query.push(" ORDER BY month, day, name");
    query
}

/// Builds the sparse update statement. Fields are visited in a fixed
/// order; only column names are interpolated, every value is bound, and
/// `updated_at = NOW()` is always part of the SET clause.
fn update_query(id: i32, update: WriterUpdate) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("UPDATE writers SET ");

    {
        let mut fields = query.separated(", ");
        if let Some(name) = update.name {
            fields.push("name = ").push_bind_unseparated(name);
        }
        if let Some(info) = update.info {
            fields.push("info = ").push_bind_unseparated(info);
        }
        if let Some(image_url) = update.image_url {
            fields.push("image_url = ").push_bind_unseparated(image_url);
        }
        if let Some(month) = update.month {
            fields.push("month = ").push_bind_unseparated(month);
        }
        if let Some(day) = update.day {
            fields.push("day = ").push_bind_unseparated(day);
        }
        if let Some(tags) = update.tags {
            fields.push("tags = ").push_bind_unseparated(tags);
        }
        fields.push("updated_at = NOW()");
    }

    query.push(" WHERE id = ");
    query.push_bind(id);
    query.push(format!(" RETURNING {WRITER_COLUMNS}"));
    query
}

#[async_trait]
impl WriterStore for PgWriterStore {
    async fn list(&self, filter: &WriterFilter) -> Result<Vec<Writer>> {
        let mut query = list_query(filter);
        let writers = query
            .build_query_as::<Writer>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(writers)
    }

    async fn create(&self, writer: NewWriter) -> Result<Writer> {
        let created = sqlx::query_as::<_, Writer>(
            "INSERT INTO writers (name, info, image_url, month, day, tags) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, name, info, image_url, month, day, tags, created_at, updated_at",
        )
        .bind(writer.name)
        .bind(writer.info)
        .bind(writer.image_url)
        .bind(writer.month)
        .bind(writer.day)
        .bind(writer.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(created)
    }

    async fn update(&self, id: i32, update: WriterUpdate) -> Result<Writer> {
        let mut query = update_query(id, update);
        let updated = query
            .build_query_as::<Writer>()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        updated.ok_or(Error::WriterNotFound)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM writers WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        if deleted.is_none() {
            return Err(Error::WriterNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_without_filters() {
        let sql = list_query(&WriterFilter::new()).into_sql();
        assert_eq!(
            sql,
            "SELECT id, name, info, image_url, month, day, tags, created_at, updated_at \
             FROM writers WHERE 1=1 ORDER BY month, day, name"
        );
    }

    #[test]
    fn test_list_query_binds_every_set_filter() {
        let filter = WriterFilter::new()
            .with_search("dostoev")
            .with_month(11)
            .with_day(11)
            .with_tag("novelist");
        let sql = list_query(&filter).into_sql();
        assert_eq!(
            sql,
            "SELECT id, name, info, image_url, month, day, tags, created_at, updated_at \
             FROM writers WHERE 1=1 AND name ILIKE $1 AND month = $2 AND day = $3 \
             AND $4 = ANY(tags) ORDER BY month, day, name"
        );
    }

    #[test]
    fn test_update_query_visits_fields_in_fixed_order() {
        let update = WriterUpdate::default().with_day(14).with_name("Mandelstam");
        let sql = update_query(7, update).into_sql();
        assert_eq!(
            sql,
            "UPDATE writers SET name = $1, day = $2, updated_at = NOW() WHERE id = $3 \
             RETURNING id, name, info, image_url, month, day, tags, created_at, updated_at"
        );
    }

    #[test]
    fn test_empty_update_still_touches_updated_at() {
        let sql = update_query(7, WriterUpdate::default()).into_sql();
        assert_eq!(
            sql,
            "UPDATE writers SET updated_at = NOW() WHERE id = $1 \
             RETURNING id, name, info, image_url, month, day, tags, created_at, updated_at"
        );
    }
}
