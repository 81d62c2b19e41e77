//! Advisory receipt numbering.
//!
//! Suggests the number for the next, unsaved receipt by inspecting the
//! store. Purely advisory: the operator may override the suggestion, and
//! the store's unique constraint on `receipt_no` is the actual enforcement
//! point. Stateless between calls, so two concurrent callers can receive
//! the same suggestion; exactly one of their writes will be accepted.

use billbook_receipts::Receipt;

use crate::receipt_store::{ReceiptStore, StoreError};

/// Suggest the next receipt number.
///
/// Fetches the receipt holding the numerically greatest numeric receipt
/// number and suggests its value plus one. With no receipts, none whose
/// number parses as a base-10 integer, or a number already at the 64-bit
/// ceiling, the suggestion is `"1"`. Never writes.
pub async fn next_receipt_no(store: &dyn ReceiptStore) -> Result<String, StoreError> {
    let latest = store.latest_by_receipt_no().await?;
    Ok(increment(latest.as_ref()).to_string())
}

fn increment(latest: Option<&Receipt>) -> u64 {
    latest
        .and_then(|r| r.receipt_no.parse::<u64>().ok())
        .and_then(|n| n.checked_add(1))
        .unwrap_or(1)
}
