//! PostgreSQL storage for the user directory.
//!
//! The [`Directory`] storage client is the entry point: it owns the pool and
//! wraps every read (and address creation) in the lazy schema-initialization
//! retry from [`lazy`]. Repositories hold the raw SQL.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

pub mod directory;
pub mod error;
pub mod lazy;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod seed;

pub use directory::Directory;
pub use error::{ConstraintKind, DbError};

pub type DbPool = sqlx::PgPool;

/// Default pool size. The directory issues short queries, so a handful of
/// connections is plenty.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// ---------------------------------------------------------------------------
// TLS preference
// ---------------------------------------------------------------------------

/// How the pool negotiates TLS with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslPreference {
    /// Use TLS when the server offers it.
    Prefer,
    /// Fail the connection unless TLS is established.
    Require,
    /// Plain TCP; intended for local development.
    Disable,
}

impl SslPreference {
    /// Pick a default for a connection string: `Disable` for a local server,
    /// `Prefer` otherwise.
    pub fn default_for_url(database_url: &str) -> Self {
        match PgConnectOptions::from_str(database_url) {
            Ok(options) if is_local_host(options.get_host()) => SslPreference::Disable,
            _ => SslPreference::Prefer,
        }
    }
}

fn is_local_host(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1") || host.starts_with('/')
}

impl FromStr for SslPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefer" => Ok(SslPreference::Prefer),
            "require" => Ok(SslPreference::Require),
            "disable" | "disabled" | "false" => Ok(SslPreference::Disable),
            other => Err(format!(
                "unknown SSL mode '{other}' (expected prefer, require, or disable)"
            )),
        }
    }
}

impl From<SslPreference> for PgSslMode {
    fn from(pref: SslPreference) -> Self {
        match pref {
            SslPreference::Prefer => PgSslMode::Prefer,
            SslPreference::Require => PgSslMode::Require,
            SslPreference::Disable => PgSslMode::Disable,
        }
    }
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

/// Create a fixed-size connection pool from a database URL.
pub async fn create_pool(
    database_url: &str,
    ssl: SslPreference,
    max_connections: u32,
) -> Result<DbPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url)?.ssl_mode(ssl.into());
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
