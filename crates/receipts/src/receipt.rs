use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use billbook_core::{DomainError, DomainResult, ReceiptId};

/// One billable row within a receipt.
///
/// Embedded in its parent [`Receipt`]; no independent identity or
/// lifecycle. `amount` is the caller's computed `quantity * rate` and is
/// stored verbatim — the store does not recompute or verify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    /// Delivery-challan reference number (free text).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chal_no: Option<String>,
    pub rate: f64,
    pub amount: f64,
}

/// A persisted job-work receipt.
///
/// Created exactly once, read many times, never updated or deleted.
/// `total_amount` is caller-trusted (expected to equal the sum of item
/// amounts, not enforced).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: ReceiptId,
    /// Operator-facing unique number. Opaque token: usually numeric, but
    /// never required to be.
    pub receipt_no: String,
    pub customer_name: String,
    /// Calendar date of the transaction, distinct from `created_at`.
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation input: a [`Receipt`] minus the store-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDraft {
    pub receipt_no: String,
    pub customer_name: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
}

impl ReceiptDraft {
    /// Structural validation of required fields.
    ///
    /// The shape permits an empty `items` list (the only exposed creation
    /// path never sends one in practice), and derived amounts are
    /// caller-trusted, so neither is checked here.
    pub fn validate(&self) -> DomainResult<()> {
        if self.receipt_no.trim().is_empty() {
            return Err(DomainError::validation("receiptNo is required"));
        }
        if self.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customerName is required"));
        }
        for (idx, item) in self.items.iter().enumerate() {
            if item.description.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "items[{idx}].description is required"
                )));
            }
        }
        Ok(())
    }

    /// Promote the draft to a full entity with store-assigned fields.
    ///
    /// `created_at` and `updated_at` start equal; no update path exists.
    pub fn into_receipt(self, id: ReceiptId, now: DateTime<Utc>) -> Receipt {
        Receipt {
            id,
            receipt_no: self.receipt_no,
            customer_name: self.customer_name,
            date: self.date,
            address: self.address,
            items: self.items,
            total_amount: self.total_amount,
            created_at: now,
            updated_at: now,
        }
    }
}
