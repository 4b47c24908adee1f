//! MongoDB connector configuration.

use std::collections::HashMap;
use std::time::Duration;

use mongodb::options::{
    Acknowledgment, AuthMechanism, ClientOptions, Credential, ServerAddress, WriteConcern,
};

use crate::address::parse_host_ports;
use crate::error::{MongoError, MongoResult};

/// Recognized keys of the flat string map supplied by the pipeline's
/// configuration loader.
pub mod keys {
    /// Comma-separated `host[:port]` list.
    pub const HOST_PORTS: &str = "host_ports";
    /// Optional username; absence means an unauthenticated connection.
    pub const USERNAME: &str = "username";
    /// Password, required when a username is present.
    pub const PASSWORD: &str = "password";
    /// Target database name.
    pub const DATABASE: &str = "database";
}

/// Maximum number of pooled connections per host.
pub const MAX_POOL_SIZE: u32 = 100;

/// Timeout for establishing a single connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum time to wait for a usable server.
///
/// The driver exposes no pool-checkout wait timeout, so the connector's 5s
/// max-wait budget is applied to server selection instead.
pub const MAX_WAIT_TIME: Duration = Duration::from_secs(5);

/// MongoDB connector configuration.
///
/// Writes run unacknowledged (`w: 0`): the connector trades write
/// confirmation for throughput, and callers that need delivery guarantees
/// must verify downstream.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Comma-separated `host[:port]` cluster member list.
    pub host_ports: String,
    /// Target database name.
    pub database: String,
    /// Optional username; `None` means unauthenticated.
    pub username: Option<String>,
    /// Password paired with `username`.
    pub password: Option<String>,
    /// Authentication source database; defaults to the target database.
    pub auth_source: Option<String>,
}

impl MongoConfig {
    /// Create a configuration from a host list and database name.
    pub fn new(host_ports: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            host_ports: host_ports.into(),
            database: database.into(),
            username: None,
            password: None,
            auth_source: None,
        }
    }

    /// Create a builder for configuration.
    pub fn builder() -> MongoConfigBuilder {
        MongoConfigBuilder::new()
    }

    /// Create a configuration from the pipeline's flat string map.
    ///
    /// Requires [`keys::HOST_PORTS`] and [`keys::DATABASE`]; the credential
    /// keys are optional.
    pub fn from_map(map: &HashMap<String, String>) -> MongoResult<Self> {
        let host_ports = map
            .get(keys::HOST_PORTS)
            .cloned()
            .ok_or_else(|| MongoError::config(format!("missing required key '{}'", keys::HOST_PORTS)))?;
        let database = map
            .get(keys::DATABASE)
            .cloned()
            .ok_or_else(|| MongoError::config(format!("missing required key '{}'", keys::DATABASE)))?;

        Ok(Self {
            host_ports,
            database,
            username: map.get(keys::USERNAME).cloned(),
            password: map.get(keys::PASSWORD).cloned(),
            auth_source: None,
        })
    }

    /// Build driver client options from this configuration.
    ///
    /// Fails with a connection error when the host list yields no usable
    /// endpoints, and with a configuration error when a username is present
    /// without a password.
    pub fn to_client_options(&self) -> MongoResult<ClientOptions> {
        let endpoints = parse_host_ports(&self.host_ports);
        if endpoints.is_empty() {
            return Err(MongoError::connection(format!(
                "no usable endpoints in host list '{}'",
                self.host_ports
            )));
        }

        let hosts: Vec<ServerAddress> = endpoints
            .into_iter()
            .map(|endpoint| ServerAddress::Tcp {
                host: endpoint.host,
                port: Some(endpoint.port),
            })
            .collect();

        let mut options = ClientOptions::builder().hosts(hosts).build();
        options.max_pool_size = Some(MAX_POOL_SIZE);
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(MAX_WAIT_TIME);
        // Unacknowledged writes: throughput over confirmation.
        options.write_concern = Some(WriteConcern::builder().w(Acknowledgment::Nodes(0)).build());

        if let Some(username) = &self.username {
            let password = self.password.clone().ok_or_else(|| {
                MongoError::config(format!("'{}' requires '{}'", keys::USERNAME, keys::PASSWORD))
            })?;
            let source = self
                .auth_source
                .clone()
                .unwrap_or_else(|| self.database.clone());

            options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password)
                    .source(source)
                    .mechanism(AuthMechanism::ScramSha1)
                    .build(),
            );
        }

        Ok(options)
    }
}

/// Builder for MongoDB connector configuration.
#[derive(Debug, Default)]
pub struct MongoConfigBuilder {
    host_ports: Option<String>,
    database: Option<String>,
    username: Option<String>,
    password: Option<String>,
    auth_source: Option<String>,
}

impl MongoConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `host[:port]` list.
    pub fn host_ports(mut self, host_ports: impl Into<String>) -> Self {
        self.host_ports = Some(host_ports.into());
        self
    }

    /// Set the target database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Override the authentication source database.
    pub fn auth_source(mut self, auth_source: impl Into<String>) -> Self {
        self.auth_source = Some(auth_source.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> MongoResult<MongoConfig> {
        let host_ports = self
            .host_ports
            .ok_or_else(|| MongoError::config("host list is required"))?;
        let database = self
            .database
            .ok_or_else(|| MongoError::config("database name is required"))?;

        Ok(MongoConfig {
            host_ports,
            database,
            username: self.username,
            password: self.password,
            auth_source: self.auth_source,
        })
    }
}
