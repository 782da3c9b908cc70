//! Database access layer - connector, identifier codec, and repositories.

/// Identifier codec, query flattener, and slug derivation.
pub mod codec;
/// Entry repository.
pub mod entries;
/// User repository.
pub mod users;

use crate::errors::{Error, Result};
use mongodb::{Client, Database};
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Database the client falls back to when the connection URI names none.
const DEFAULT_DATABASE: &str = "repldex";

/// Lazily-initialized shared MongoDB handle.
///
/// The connection is established at most once for the process lifetime; every
/// caller after the first gets the memoized handle. Request handlers clone the
/// `Database` (a cheap reference-counted handle) and never mutate connector
/// state, so no locking is needed beyond the one-shot initialization.
pub struct Connector {
    uri: String,
    database: OnceCell<Database>,
}

impl Connector {
    /// Creates a connector for the given connection URI without connecting.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: OnceCell::new(),
        }
    }

    /// Returns the shared database handle, connecting on first use.
    pub async fn database(&self) -> Result<&Database> {
        self.database
            .get_or_try_init(|| async {
                debug!("Establishing MongoDB connection");
                let client = Client::with_uri_str(&self.uri).await?;
                let database = client
                    .default_database()
                    .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
                info!(database = %database.name(), "MongoDB connection established");
                Ok::<_, Error>(database)
            })
            .await
    }
}
