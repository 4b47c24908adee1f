//! Connection lifecycle management.
//!
//! The connector shares one driver client across all pipeline stages. The
//! original design kept that handle in unsynchronized global state; here the
//! handle lives in an explicitly owned [`ConnectionManager`] whose creation
//! path is guarded, so at most one underlying client is ever constructed no
//! matter how many tasks race on first use.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bson::{Document, doc};
use mongodb::{Client, Collection, Database};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::MongoConfig;
use crate::error::{MongoError, MongoResult};

/// Owner of the shared MongoDB client handle.
///
/// State machine: Disconnected -> Connected on the first successful
/// [`get_client`](Self::get_client); Connected -> Disconnected on
/// [`close`](Self::close). No automatic reconnection is performed; transport
/// failures surface to the caller.
#[derive(Default)]
pub struct ConnectionManager {
    client: Mutex<Option<Client>>,
    connects: AtomicU64,
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connected", &self.is_connected())
            .field("connects", &self.connect_count())
            .finish()
    }
}

impl ConnectionManager {
    /// Create a manager in the Disconnected state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the shared client, building it on first use.
    ///
    /// The configuration is applied only when the client is first built;
    /// while a handle exists, later calls return it unchanged and the
    /// supplied configuration is ignored. Callers that need a different
    /// cluster must [`close`](Self::close) first.
    ///
    /// Fails with a connection error when the host list resolves to zero
    /// endpoints or the driver rejects the options.
    pub fn get_client(&self, config: &MongoConfig) -> MongoResult<Client> {
        let mut guard = self.client.lock();

        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        let options = config.to_client_options()?;
        let client = Client::with_options(options)
            .map_err(|e| MongoError::connection(format!("failed to create client: {}", e)))?;

        self.connects.fetch_add(1, Ordering::Relaxed);
        info!(
            host_ports = %config.host_ports,
            database = %config.database,
            "MongoDB client created"
        );

        *guard = Some(client.clone());
        Ok(client)
    }

    /// Get a database handle.
    ///
    /// No existence check is performed; MongoDB creates databases implicitly
    /// on first write.
    pub fn get_database(&self, config: &MongoConfig, database: &str) -> MongoResult<Database> {
        Ok(self.get_client(config)?.database(database))
    }

    /// Get a collection handle, verifying that the collection exists.
    ///
    /// The existence check is a fail-fast guard against typos in the pipeline
    /// configuration: the collection is never created implicitly, and a
    /// missing one fails before any read or write is attempted.
    pub async fn get_collection(
        &self,
        config: &MongoConfig,
        database: &str,
        collection: &str,
    ) -> MongoResult<Collection<Document>> {
        let db = self.get_database(config, database)?;

        let names = db.list_collection_names(None).await?;
        if !collection_exists(&names, collection) {
            return Err(MongoError::collection_not_found(database, collection));
        }

        debug!(database = %database, collection = %collection, "collection resolved");
        Ok(db.collection(collection))
    }

    /// Check connectivity by pinging the target database.
    pub async fn ping(&self, config: &MongoConfig) -> MongoResult<()> {
        let db = self.get_database(config, &config.database)?;
        db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    /// Release the shared client and return to the Disconnected state.
    ///
    /// Idempotent: a no-op when no client exists. Callers are responsible for
    /// not closing while other tasks still use the handle.
    pub async fn close(&self) {
        let client = { self.client.lock().take() };
        if let Some(client) = client {
            client.shutdown().await;
            info!("MongoDB client shut down");
        }
    }

    /// Whether a client handle currently exists.
    pub fn is_connected(&self) -> bool {
        self.client.lock().is_some()
    }

    /// Number of client builds performed over this manager's lifetime.
    pub fn connect_count(&self) -> u64 {
        self.connects.load(Ordering::Relaxed)
    }
}

/// Membership test behind the collection existence guard.
fn collection_exists(names: &[String], collection: &str) -> bool {
    names.iter().any(|name| name == collection)
}
