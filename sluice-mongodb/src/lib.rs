//! # sluice-mongodb
//!
//! MongoDB connector for the Sluice data-sync pipeline.
//!
//! This crate provides:
//! - Cluster address resolution from `host[:port]` lists
//! - Shared connection lifecycle management with the official MongoDB driver
//! - Eager collection existence checks
//! - Bidirectional mapping between BSON documents and flat pipeline records,
//!   including dotted-path field projection and partial-update column subsets
//!
//! ## Example
//!
//! ```rust,ignore
//! use sluice_mongodb::{ConnectionManager, MongoConfig, document_to_record};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MongoConfig::builder()
//!         .host_ports("10.0.0.1:27017,10.0.0.2")
//!         .database("analytics")
//!         .build()?;
//!
//!     let manager = ConnectionManager::new();
//!     let events = manager.get_collection(&config, "analytics", "events").await?;
//!
//!     // Read path: flatten documents into records for the pipeline.
//!     let columns = vec!["user.id".to_string(), "kind".to_string()];
//!     // for each fetched document:
//!     //     let record = document_to_record(&doc, &columns);
//!
//!     manager.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Write durability
//!
//! The connector configures unacknowledged writes (`w: 0`), trading
//! confirmation for throughput. See [`config`] for the full fixed option
//! profile.

pub mod address;
pub mod client;
pub mod config;
pub mod error;
pub mod mapper;
pub mod types;

pub use bson::{Bson, Document, doc};
pub use address::{AddressParseError, DEFAULT_PORT, Endpoint, parse_host_ports};
pub use client::ConnectionManager;
pub use config::{MongoConfig, MongoConfigBuilder, keys};
pub use error::{MongoError, MongoResult};
pub use mapper::{FieldPath, PATH_SEPARATOR, document_to_record, record_to_document};
pub use types::{bson_to_value, value_to_bson};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::address::{Endpoint, parse_host_ports};
    pub use crate::client::ConnectionManager;
    pub use crate::config::{MongoConfig, MongoConfigBuilder};
    pub use crate::error::{MongoError, MongoResult};
    pub use crate::mapper::{FieldPath, document_to_record, record_to_document};
    pub use crate::types::{bson_to_value, value_to_bson};
    pub use bson::{Bson, Document, doc};
    pub use sluice_record::{Record, Value};
}
