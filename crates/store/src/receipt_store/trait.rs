use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use billbook_core::{DomainError, ReceiptId};
use billbook_receipts::{Receipt, ReceiptDraft};

/// Inclusive date range filter, applied against a receipt's transaction
/// `date` (not `created_at`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Receipt store operation error.
///
/// Infrastructure failures only; structural validation failures surface as
/// [`DomainError::Validation`] before a store is ever touched.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The uniqueness constraint on `receipt_no` was violated.
    #[error("receipt number already exists: {0}")]
    Duplicate(String),

    /// Connectivity or unexpected backend failure.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(no) => DomainError::duplicate(no),
            StoreError::Storage(msg) => DomainError::storage(msg),
        }
    }
}

/// Durable storage and retrieval of receipts.
///
/// ## Semantics
///
/// - `create` assigns `id` (UUIDv7) and the audit timestamps, and enforces
///   the uniqueness constraint on `receipt_no`. A violation is a rejected
///   write (`StoreError::Duplicate`), never a silent overwrite. This is the
///   real enforcement point: the service-level pre-check is advisory and
///   two concurrent creates can both pass it, but at most one reaches the
///   store successfully.
/// - `list` returns the full matching set ordered by `created_at`
///   descending (most recently created first), independent of `date` and
///   `receipt_no`. No pagination.
/// - `latest_by_receipt_no` orders receipt numbers **numerically** over the
///   subset that parses as an unsigned 64-bit base-10 integer; non-numeric
///   or oversized numbers are skipped, identically in every
///   implementation. Returns `None` when nothing qualifies.
/// - Reads never mutate state: repeated `find_by_id` calls return identical
///   records.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Persist a new receipt, assigning `id`, `created_at`, `updated_at`.
    async fn create(&self, draft: ReceiptDraft) -> Result<Receipt, StoreError>;

    /// Fetch the full entity, including embedded items.
    async fn find_by_id(&self, id: ReceiptId) -> Result<Option<Receipt>, StoreError>;

    /// Exact lookup by operator-facing receipt number.
    async fn find_by_receipt_no(&self, receipt_no: &str)
        -> Result<Option<Receipt>, StoreError>;

    /// The receipt holding the numerically greatest numeric receipt number.
    async fn latest_by_receipt_no(&self) -> Result<Option<Receipt>, StoreError>;

    /// All receipts matching the optional inclusive date range, most
    /// recently created first.
    async fn list(&self, filter: Option<DateRange>) -> Result<Vec<Receipt>, StoreError>;

    /// Release backend resources. Default is a no-op (nothing to release).
    async fn close(&self) {}
}
