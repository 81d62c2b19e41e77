mod in_memory;
mod postgres;
mod r#trait;

pub use in_memory::InMemoryReceiptStore;
pub use postgres::PostgresReceiptStore;
pub use r#trait::{DateRange, ReceiptStore, StoreError};
