//! `billbook-store` — the receipt persistence boundary.
//!
//! Exposes the [`ReceiptStore`] trait with two implementations (in-memory
//! for tests/dev, Postgres for production) and the advisory numbering
//! policy that consumes it.

pub mod numbering;
pub mod receipt_store;

pub use numbering::next_receipt_no;
pub use receipt_store::{
    DateRange, InMemoryReceiptStore, PostgresReceiptStore, ReceiptStore, StoreError,
};
