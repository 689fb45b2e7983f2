//! CLI command implementations.

use std::sync::Arc;

use color_eyre::eyre::{eyre, Result};

use almanack_server::{Server, ServerConfig};
use almanack_store::{InMemoryStore, PgWriterStore, WriterStore};

/// Start the HTTP server.
pub async fn serve(
    host: String,
    port: u16,
    database_url: Option<String>,
    in_memory: bool,
) -> Result<()> {
    let addr = format!("{}:{}", host, port).parse()?;
    let config = ServerConfig::builder().addr(addr).build();

    let store: Arc<dyn WriterStore> = if in_memory {
        tracing::warn!("Serving from a transient in-memory store; records are lost on exit");
        Arc::new(InMemoryStore::new())
    } else {
        let database_url = database_url.ok_or_else(|| {
            eyre!("Database URL is required. Set DATABASE_URL or pass --database-url")
        })?;
        Arc::new(PgWriterStore::connect(&database_url).await?)
    };

    let server = Server::new(config, store);
    server.run().await?;

    Ok(())
}

/// Print version info.
pub fn version() {
    println!("almanack {}", env!("CARGO_PKG_VERSION"));
}
