//! Postgres-backed receipt store.
//!
//! Receipts live in a single `receipts` table; embedded line items are a
//! JSONB column (they have no identity of their own, so a child table
//! would buy nothing). The `receipt_no` unique constraint is the real
//! uniqueness enforcement point: the service-level pre-check is advisory,
//! and a concurrent create that slips past it fails here with
//! [`StoreError::Duplicate`].
//!
//! ## Error mapping
//!
//! | SQLx error | Postgres code | StoreError |
//! |------------|---------------|------------|
//! | Database (unique violation) | `23505` | `Duplicate` |
//! | Database (other) | any | `Storage` |
//! | PoolTimedOut / PoolClosed / anything else | n/a | `Storage` |

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::instrument;

use billbook_core::ReceiptId;
use billbook_receipts::{LineItem, Receipt, ReceiptDraft};

use super::r#trait::{DateRange, ReceiptStore, StoreError};

/// How long to wait for a connection before failing the request. A store
/// outage should fail fast rather than hang the caller.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Postgres-backed receipt store.
///
/// Holds the process-wide connection pool. The pool re-establishes broken
/// connections on the next acquire, so a transient outage does not poison
/// later requests.
#[derive(Debug, Clone)]
pub struct PostgresReceiptStore {
    pool: PgPool,
}

impl PostgresReceiptStore {
    /// Connect to the given database with a bounded acquire timeout.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests, shared wiring).
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `receipts` table and its indexes if absent.
    #[instrument(skip(self), err)]
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS receipts (
                id UUID PRIMARY KEY,
                receipt_no TEXT NOT NULL UNIQUE,
                customer_name TEXT NOT NULL,
                date DATE NOT NULL,
                address TEXT,
                items JSONB NOT NULL,
                total_amount DOUBLE PRECISION NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("init_schema", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS receipts_date_idx ON receipts (date)")
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("init_schema", e))?;

        Ok(())
    }

    #[instrument(skip(self, draft), fields(receipt_no = %draft.receipt_no), err)]
    async fn insert_receipt(&self, draft: ReceiptDraft) -> Result<Receipt, StoreError> {
        let receipt = draft.into_receipt(ReceiptId::new(), Utc::now());

        let items = serde_json::to_value(&receipt.items)
            .map_err(|e| StoreError::Storage(format!("items serialization failed: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO receipts (
                id, receipt_no, customer_name, date, address,
                items, total_amount, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(receipt.id.as_uuid())
        .bind(&receipt.receipt_no)
        .bind(&receipt.customer_name)
        .bind(receipt.date)
        .bind(&receipt.address)
        .bind(&items)
        .bind(receipt.total_amount)
        .bind(receipt.created_at)
        .bind(receipt.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Duplicate(receipt.receipt_no.clone())
            } else {
                map_sqlx_error("insert_receipt", e)
            }
        })?;

        Ok(receipt)
    }
}

#[async_trait]
impl ReceiptStore for PostgresReceiptStore {
    async fn create(&self, draft: ReceiptDraft) -> Result<Receipt, StoreError> {
        self.insert_receipt(draft).await
    }

    async fn find_by_id(&self, id: ReceiptId) -> Result<Option<Receipt>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, receipt_no, customer_name, date, address,
                   items, total_amount, created_at, updated_at
            FROM receipts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(receipt_from_row).transpose()
    }

    async fn find_by_receipt_no(
        &self,
        receipt_no: &str,
    ) -> Result<Option<Receipt>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, receipt_no, customer_name, date, address,
                   items, total_amount, created_at, updated_at
            FROM receipts
            WHERE receipt_no = $1
            "#,
        )
        .bind(receipt_no)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_receipt_no", e))?;

        row.as_ref().map(receipt_from_row).transpose()
    }

    async fn latest_by_receipt_no(&self) -> Result<Option<Receipt>, StoreError> {
        // Numeric ordering over the subset that fits an unsigned 64-bit
        // integer, matching the in-memory store; non-numeric or oversized
        // receipt numbers are not candidates for increment.
        let row = sqlx::query(
            r#"
            SELECT id, receipt_no, customer_name, date, address,
                   items, total_amount, created_at, updated_at
            FROM receipts
            WHERE receipt_no ~ '^[0-9]+$'
              AND receipt_no::numeric <= 18446744073709551615
            ORDER BY receipt_no::numeric DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("latest_by_receipt_no", e))?;

        row.as_ref().map(receipt_from_row).transpose()
    }

    async fn list(&self, filter: Option<DateRange>) -> Result<Vec<Receipt>, StoreError> {
        let (from, to) = match filter {
            Some(range) => (Some(range.from), Some(range.to)),
            None => (None, None),
        };

        // Ties on created_at fall back to id: UUIDv7 is time-ordered, so
        // later inserts still sort first.
        let rows = sqlx::query(
            r#"
            SELECT id, receipt_no, customer_name, date, address,
                   items, total_amount, created_at, updated_at
            FROM receipts
            WHERE ($1::date IS NULL OR date >= $1)
              AND ($2::date IS NULL OR date <= $2)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(receipt_from_row).collect()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn receipt_from_row(row: &sqlx::postgres::PgRow) -> Result<Receipt, StoreError> {
    let decode = |e: sqlx::Error| StoreError::Storage(format!("failed to decode receipt row: {e}"));

    let id: uuid::Uuid = row.try_get("id").map_err(decode)?;
    let items_json: serde_json::Value = row.try_get("items").map_err(decode)?;
    let items: Vec<LineItem> = serde_json::from_value(items_json)
        .map_err(|e| StoreError::Storage(format!("failed to decode receipt items: {e}")))?;

    let date: NaiveDate = row.try_get("date").map_err(decode)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(decode)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(decode)?;

    Ok(Receipt {
        id: ReceiptId::from_uuid(id),
        receipt_no: row.try_get("receipt_no").map_err(decode)?,
        customer_name: row.try_get("customer_name").map_err(decode)?,
        date,
        address: row.try_get("address").map_err(decode)?,
        items,
        total_amount: row.try_get("total_amount").map_err(decode)?,
        created_at,
        updated_at,
    })
}

/// Map SQLx errors to [`StoreError`].
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::Storage(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolTimedOut => StoreError::Storage(format!(
            "timed out acquiring a connection in {operation}"
        )),
        sqlx::Error::PoolClosed => {
            StoreError::Storage(format!("connection pool closed in {operation}"))
        }
        _ => StoreError::Storage(format!("sqlx error in {operation}: {err}")),
    }
}

/// Check if an error is a unique constraint violation (Postgres 23505).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if let Some(code) = db_err.code() {
            return code.as_ref() == "23505";
        }
    }
    false
}
