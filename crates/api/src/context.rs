use std::sync::Arc;

use billbook_store::{InMemoryReceiptStore, PostgresReceiptStore, ReceiptStore, StoreError};

/// Process-wide application context.
///
/// Built once in `main` and injected into every handler; the store handle
/// is shared and reused for the life of the process. Replaces the kind of
/// lazily initialized global connection cache with an explicit lifecycle:
/// construct, use, [`close`](AppContext::close).
#[derive(Clone)]
pub struct AppContext {
    store: Arc<dyn ReceiptStore>,
}

impl AppContext {
    /// Context backed by a connected Postgres store with the schema
    /// ensured. Connection establishment is bounded (fails fast on an
    /// unreachable store).
    pub async fn postgres(url: &str) -> Result<Self, StoreError> {
        let store = PostgresReceiptStore::connect(url).await?;
        store.init_schema().await?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// Context backed by a non-durable in-memory store (tests, dev runs).
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemoryReceiptStore::new()),
        }
    }

    pub fn store(&self) -> Arc<dyn ReceiptStore> {
        Arc::clone(&self.store)
    }

    /// Release backend resources (drains the Postgres pool; a no-op for
    /// the in-memory store).
    pub async fn close(&self) {
        self.store.close().await;
    }
}
