//! `billbook-receipts` — the receipt entity.
//!
//! This crate contains the persisted record shape and its structural
//! validation. It knows nothing about storage or HTTP.

pub mod receipt;

pub use receipt::{LineItem, Receipt, ReceiptDraft};
