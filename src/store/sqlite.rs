use anyhow::{Context, Result};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, ToSql};
use std::path::Path;

use super::schema::{CountryType, Field, CREATE_TABLE};

/// Single persistence handle for a pipeline run, opened once and passed
/// explicitly to each phase.
pub struct CountryStore {
    conn: Connection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The id already exists. Reported by the caller; never aborts the
    /// remaining rows.
    Duplicate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub country_id: String,
    pub country_name: String,
    pub country_type: Option<CountryType>,
    pub country_population: Option<i64>,
    pub country_area: Option<f64>,
}

impl CountryStore {
    /// Create a fresh database, removing any existing file first.
    pub fn create(db_path: &Path) -> Result<Self> {
        if db_path.exists() {
            std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        }
        Self::open(db_path)
    }

    /// Open an existing (or new) database file.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path).context("Failed to open database")?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Ok(Self { conn })
    }

    /// Idempotently ensure the `country` table exists.
    pub fn create_schema(&self) -> Result<()> {
        self.conn
            .execute(CREATE_TABLE, [])
            .context("Failed to create country table")?;
        Ok(())
    }

    /// Insert a base (id, name) row. A primary key collision is reported
    /// as `Duplicate` rather than an error.
    pub fn insert_base(&self, id: &str, name: &str) -> Result<InsertOutcome> {
        let result = self.conn.execute(
            "INSERT INTO country (country_id, country_name) VALUES (?1, ?2)",
            params![id, name],
        );
        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                Ok(InsertOutcome::Duplicate)
            }
            Err(err) => Err(err).with_context(|| format!("Failed to insert {}", id)),
        }
    }

    /// Update one field on every row matching the name. Returns the number
    /// of rows touched; zero means the name reconciled to nothing and the
    /// caller should surface it.
    pub fn update_by_name<V: ToSql>(&self, name: &str, field: Field, value: V) -> Result<usize> {
        let sql = format!(
            "UPDATE country SET {} = ?1 WHERE country_name = ?2",
            field.column()
        );
        self.conn
            .execute(&sql, params![value, name])
            .with_context(|| format!("Failed to update {} for {:?}", field.column(), name))
    }

    /// Update one field by primary key; touches at most one row.
    pub fn update_by_id<V: ToSql>(&self, id: &str, field: Field, value: V) -> Result<usize> {
        let sql = format!(
            "UPDATE country SET {} = ?1 WHERE country_id = ?2",
            field.column()
        );
        self.conn
            .execute(&sql, params![value, id])
            .with_context(|| format!("Failed to update {} for {}", field.column(), id))
    }

    pub fn fetch_by_id(&self, id: &str) -> Result<Option<CountryRow>> {
        self.conn
            .query_row(
                "SELECT country_id, country_name, country_type,
                        country_population, country_area
                 FROM country WHERE country_id = ?1",
                params![id],
                |row| {
                    let type_tag: Option<String> = row.get(2)?;
                    Ok(CountryRow {
                        country_id: row.get(0)?,
                        country_name: row.get(1)?,
                        country_type: type_tag.as_deref().and_then(CountryType::from_tag),
                        country_population: row.get(3)?,
                        country_area: row.get(4)?,
                    })
                },
            )
            .optional()
            .with_context(|| format!("Failed to read row {}", id))
    }

    pub fn row_count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM country", [], |row| row.get(0))
            .context("Failed to count rows")?;
        Ok(count)
    }
}
