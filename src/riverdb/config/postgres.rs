use serde::Deserialize;

use crate::riverdb::config::enums::TlsMode;
use crate::riverdb::common::{Error, Result};

/// One Postgres endpoint a backend connection can be opened against: the main database
/// that owns writes, or one of the secondaries kept in sync by multi-node DDL.
#[derive(Deserialize, Clone, Debug)]
pub struct Postgres {
    /// host to connect to
    pub host: String,
    /// Port to connect to, defaults to 5432
    #[serde(default = "default_port")]
    pub port: u16,
    /// database to connect to
    #[serde(default)]
    pub database: String,
    /// user to connect with
    #[serde(default)]
    pub user: String,
    /// password if using password authentication
    #[serde(default)]
    pub password: String,
    /// backend_tls TLS preference between the proxy and this Postgres server
    #[serde(default)]
    pub backend_tls: TlsMode,
}

const fn default_port() -> u16 {
    5432
}

impl Postgres {
    pub(crate) fn load(&mut self, defaults: &Postgres) -> Result<()> {
        if self.database.is_empty() {
            self.database = defaults.database.clone();
        }
        if self.user.is_empty() {
            self.user = defaults.user.clone();
        }
        if let TlsMode::Invalid = self.backend_tls {
            self.backend_tls = defaults.backend_tls;
            if let TlsMode::Invalid = self.backend_tls {
                return Err(Error::new("backend_tls mode not set"));
            }
        }
        Ok(())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The routing cluster: one main (routes single-node traffic, and is the write target
/// for multi-node DDL) plus zero or more secondaries kept schema-synchronized with it.
/// The four SQL templates are opaque to the router: they're sent verbatim as simple
/// Query messages at the points the routing session FSM calls for them.
#[derive(Deserialize)]
pub struct XRouterConfig {
    pub main: Postgres,
    #[serde(default)]
    pub secondaries: Vec<Postgres>,
    /// default values used to fill in any field left empty on `main`/`secondaries`
    pub default: Postgres,
    /// sent to main to advance a multi-node statement there first
    pub main_sql: String,
    /// sent to each secondary, substituting the statement captured from main
    pub secondary_sql: String,
    /// sent to main before executing a multi-node statement, to serialize DDL across sessions
    pub lock_sql: String,
    /// sent to main after secondaries finish, releasing the lock taken by lock_sql
    pub unlock_sql: String,
    /// time allowed to establish + authenticate a new backend connection
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

const fn default_connect_timeout_ms() -> u64 {
    5000
}

impl XRouterConfig {
    pub(crate) fn load(&mut self) -> Result<()> {
        self.main.load(&self.default)?;
        for secondary in &mut self.secondaries {
            secondary.load(&self.default)?;
        }
        Ok(())
    }
}
