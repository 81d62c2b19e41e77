use billbook_api::context::AppContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    billbook_observability::init();

    let ctx = match std::env::var("DATABASE_URL") {
        Ok(url) => AppContext::postgres(&url).await.map_err(|e| {
            tracing::error!(error = %e, "failed to connect to the receipt store");
            anyhow::anyhow!(e)
        })?,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory store (data is not durable)");
            AppContext::in_memory()
        }
    };

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let app = billbook_api::app::build_app(&ctx);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    ctx.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    }
}
