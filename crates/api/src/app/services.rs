use std::sync::Arc;

use chrono::NaiveDate;

use billbook_core::{DomainError, ReceiptId};
use billbook_receipts::{Receipt, ReceiptDraft};
use billbook_store::{next_receipt_no, DateRange, ReceiptStore};

/// The receipt record service: request-facing orchestration combining
/// validation, the uniqueness pre-check, date-range filtering, and the
/// numbering advisory.
pub struct ReceiptService {
    store: Arc<dyn ReceiptStore>,
}

impl ReceiptService {
    pub fn new(store: Arc<dyn ReceiptStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new receipt.
    ///
    /// The pre-check read keeps the common duplicate case from reaching a
    /// write at all; the store's unique constraint still backstops the
    /// read-then-write window, so a concurrent create racing past the
    /// pre-check fails there instead of overwriting.
    pub async fn create_receipt(&self, draft: ReceiptDraft) -> Result<Receipt, DomainError> {
        draft.validate()?;

        if self
            .store
            .find_by_receipt_no(&draft.receipt_no)
            .await
            .map_err(DomainError::from)?
            .is_some()
        {
            return Err(DomainError::duplicate(draft.receipt_no));
        }

        let receipt = self.store.create(draft).await?;
        tracing::info!(receipt_no = %receipt.receipt_no, id = %receipt.id, "receipt created");
        Ok(receipt)
    }

    pub async fn get_receipt(&self, id: ReceiptId) -> Result<Receipt, DomainError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(DomainError::from)?
            .ok_or(DomainError::NotFound)
    }

    /// List receipts, filtered to the inclusive date range when both
    /// bounds are supplied; unfiltered when either is absent. Always
    /// ordered most recently created first.
    pub async fn list_receipts(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Receipt>, DomainError> {
        let filter = match (start_date, end_date) {
            (Some(from), Some(to)) => Some(DateRange { from, to }),
            _ => None,
        };
        Ok(self.store.list(filter).await?)
    }

    /// Advisory suggestion for the next receipt number (worst case `"1"`).
    pub async fn next_receipt_no(&self) -> Result<String, DomainError> {
        Ok(next_receipt_no(self.store.as_ref()).await?)
    }
}
