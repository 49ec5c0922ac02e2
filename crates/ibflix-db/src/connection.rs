//! SurrealDB connection management.

use std::fmt;

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

use crate::error::DbError;

const WS_SCHEME: &str = "ws://";

/// Configuration for connecting to SurrealDB.
#[derive(Clone)]
pub struct DbConfig {
    /// WebSocket address, either `host:port` or `ws://host:port`.
    pub url: String,
    pub namespace: String,
    pub database: String,
    /// Root username for authentication.
    pub username: String,
    /// Root password for authentication.
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "ibflix".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url)
            .field("namespace", &self.namespace)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl DbConfig {
    /// The `host:port` the WebSocket engine dials.
    ///
    /// A `ws://` prefix and trailing slashes are stripped. Any other scheme
    /// is rejected, as is an empty namespace or database name.
    pub fn address(&self) -> Result<&str, DbError> {
        let url = self.url.trim();
        let address = match url.split_once("://") {
            None => url,
            Some(_) if url.starts_with(WS_SCHEME) => &url[WS_SCHEME.len()..],
            Some((scheme, _)) => {
                return Err(self.invalid(format!("unsupported scheme `{scheme}`")));
            }
        }
        .trim_end_matches('/');

        if address.is_empty() {
            return Err(self.invalid("missing host".into()));
        }
        if self.namespace.trim().is_empty() || self.database.trim().is_empty() {
            return Err(self.invalid("namespace and database must be set".into()));
        }
        Ok(address)
    }

    fn invalid(&self, reason: String) -> DbError {
        DbError::Connection {
            url: self.url.clone(),
            reason,
        }
    }
}

/// Owns the process-wide connection to SurrealDB.
///
/// Created once by the bootstrap; repositories receive clones of the
/// client handle.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Connect, sign in as root and select the configured namespace and
    /// database.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        let address = config.address()?;
        info!(
            address,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to SurrealDB"
        );

        let db = Surreal::new::<Ws>(address)
            .await
            .map_err(|e| config.invalid(e.to_string()))?;

        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("Connected to SurrealDB");

        Ok(Self { db })
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}
