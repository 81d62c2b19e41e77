//! `billbook-core` — shared domain primitives.
//!
//! Strongly-typed identifiers and the error model used by every other crate
//! in the workspace. No I/O lives here.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::ReceiptId;
