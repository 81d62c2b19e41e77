//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Internal identifier of a persisted receipt.
///
/// Distinct from the operator-facing receipt number: this is the
/// store-assigned primary key, opaque to the operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(Uuid);

impl ReceiptId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered), so freshly assigned ids sort in
    /// creation order. Prefer passing ids explicitly in tests for
    /// determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReceiptId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for ReceiptId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<ReceiptId> for Uuid {
    fn from(value: ReceiptId) -> Self {
        value.0
    }
}

impl FromStr for ReceiptId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| DomainError::validation(format!("invalid receipt id: {e}")))?;
        Ok(Self(uuid))
    }
}
