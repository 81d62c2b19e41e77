use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use billbook_core::ReceiptId;
use billbook_receipts::{Receipt, ReceiptDraft};

use super::r#trait::{DateRange, ReceiptStore, StoreError};

/// In-memory receipt store.
///
/// Intended for tests and store-less dev runs. Records live in insertion
/// order; the uniqueness check and the insert happen under one write-lock
/// acquisition, so the duplicate race the Postgres store resolves via its
/// unique constraint cannot occur here at all.
#[derive(Debug, Default)]
pub struct InMemoryReceiptStore {
    receipts: RwLock<Vec<Receipt>>,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReceiptStore for InMemoryReceiptStore {
    async fn create(&self, draft: ReceiptDraft) -> Result<Receipt, StoreError> {
        let mut receipts = self
            .receipts
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;

        if receipts.iter().any(|r| r.receipt_no == draft.receipt_no) {
            return Err(StoreError::Duplicate(draft.receipt_no));
        }

        let receipt = draft.into_receipt(ReceiptId::new(), Utc::now());
        receipts.push(receipt.clone());
        Ok(receipt)
    }

    async fn find_by_id(&self, id: ReceiptId) -> Result<Option<Receipt>, StoreError> {
        let receipts = self
            .receipts
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;
        Ok(receipts.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_receipt_no(
        &self,
        receipt_no: &str,
    ) -> Result<Option<Receipt>, StoreError> {
        let receipts = self
            .receipts
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;
        Ok(receipts.iter().find(|r| r.receipt_no == receipt_no).cloned())
    }

    async fn latest_by_receipt_no(&self) -> Result<Option<Receipt>, StoreError> {
        let receipts = self
            .receipts
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;
        // Numeric ordering over the subset that fits a u64; non-numeric or
        // oversized receipt numbers are not candidates for increment.
        Ok(receipts
            .iter()
            .filter_map(|r| r.receipt_no.parse::<u64>().ok().map(|n| (n, r)))
            .max_by_key(|(n, _)| *n)
            .map(|(_, r)| r.clone()))
    }

    async fn list(&self, filter: Option<DateRange>) -> Result<Vec<Receipt>, StoreError> {
        let receipts = self
            .receipts
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;

        // Newest insertion first; the stable sort keeps that order for
        // records sharing a created_at timestamp.
        let mut matching: Vec<Receipt> = receipts
            .iter()
            .rev()
            .filter(|r| filter.map_or(true, |range| range.contains(r.date)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}
