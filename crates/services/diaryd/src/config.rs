//! Service configuration.

use std::{fmt::Display, net::SocketAddr};

use diary_models::db::config::DbConfig;

use crate::{cli::Cli, prelude::*};

/// Matches the port the web client expects by default.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// HS256 signing secret.
    pub jwt_secret: String,
    /// PostgreSQL settings; `None` selects the in-memory store.
    pub db: Option<DbConfig>,
}

impl ServerConfig {
    /// Reads `JWT_SECRET`, `DATABASE_URL` and `DIARY_ADDR`, with command-line
    /// arguments taking precedence.
    pub fn from_env(cli: &Cli) -> Result<Self> {
        let lookup = |var: &str| std::env::var(var).ok();
        Self::from_lookup(cli, lookup)
    }

    fn from_lookup(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingEnv("JWT_SECRET"))?;
        let addr = cli
            .addr
            .clone()
            .or_else(|| lookup("DIARY_ADDR"))
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse::<SocketAddr>()?;
        let db = if cli.in_memory {
            None
        } else {
            lookup("DATABASE_URL")
                .filter(|url| !url.trim().is_empty())
                .map(|database_url| DbConfig { database_url })
        };

        Ok(Self {
            addr,
            jwt_secret,
            db,
        })
    }
}

impl Display for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = if self.db.is_some() {
            "postgres"
        } else {
            "memory"
        };
        write!(f, "addr={} store={} jwt_secret=REDACTED", self.addr, store)
    }
}
