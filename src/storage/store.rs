//! Pooled read-write access to the products table.
//!
//! Uses r2d2 with r2d2_sqlite. The store owns identity and timestamp
//! assignment: inserts stamp both timestamps, updates refresh `updated_at`
//! and preserve `created_at`.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

use super::schema::{apply_pragmas, initialize_schema};
use crate::model::{Price, Product, ProductDraft};
use crate::now_millis;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create connection pool: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Map a rusqlite error, surfacing constraint failures separately.
fn classify(err: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(code, ref message) = err {
        if code.code == rusqlite::ErrorCode::ConstraintViolation {
            let detail = message.clone().unwrap_or_else(|| code.to_string());
            return StoreError::Constraint(detail);
        }
    }
    StoreError::Database(err)
}

/// Pooled store for the products table.
#[derive(Clone)]
pub struct ProductStore {
    pool: Pool<SqliteConnectionManager>,
}

impl ProductStore {
    /// Open (creating if needed) the products database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created or the schema cannot
    /// be initialized.
    pub fn open<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(db_path);

        let pool = Pool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ProductConnectionCustomizer))
            .build(manager)?;

        let conn = pool.get()?;
        initialize_schema(&conn)?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.pool.get()?)
    }

    /// All products in insertion (id) order.
    pub fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, price_cents, updated_at, created_at
             FROM products ORDER BY id ASC",
        )?;
        let products = stmt
            .query_map([], row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    /// Look up a product by id.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let conn = self.conn()?;
        Ok(fetch_by_id(&conn, id)?)
    }

    /// Insert a new product, assigning id and both timestamps.
    pub fn insert(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        let now = now_millis();
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO products (title, description, price_cents, updated_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![draft.title, draft.description, draft.price.cents(), now],
        )
        .map_err(classify)?;

        let id = conn.last_insert_rowid();
        fetch_by_id(&conn, id)?.ok_or(StoreError::Database(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Persist the editable fields of an existing product, refreshing
    /// `updated_at` and preserving `created_at`.
    pub fn update(&self, product: &Product) -> Result<Product, StoreError> {
        let now = now_millis();
        let conn = self.conn()?;
        conn.execute(
            "UPDATE products SET title = ?1, description = ?2, price_cents = ?3, updated_at = ?4
             WHERE id = ?5",
            params![
                product.title,
                product.description,
                product.price.cents(),
                now,
                product.id
            ],
        )
        .map_err(classify)?;

        fetch_by_id(&conn, product.id)?
            .ok_or(StoreError::Database(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Remove a product by id.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;
        Ok(())
    }
}

fn fetch_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Product>> {
    conn.query_row(
        "SELECT id, title, description, price_cents, updated_at, created_at
         FROM products WHERE id = ?1",
        params![id],
        row_to_product,
    )
    .optional()
}

fn row_to_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    let cents: i64 = row.get(3)?;
    let price = Price::from_cents(cents).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Integer,
            Box::new(e),
        )
    })?;
    Ok(Product {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price,
        updated_at: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Connection customizer that applies the standard pragmas.
#[derive(Debug)]
struct ProductConnectionCustomizer;

impl r2d2::CustomizeConnection<rusqlite::Connection, rusqlite::Error>
    for ProductConnectionCustomizer
{
    fn on_acquire(&self, conn: &mut rusqlite::Connection) -> Result<(), rusqlite::Error> {
        apply_pragmas(conn)
    }
}
