/*
 *  Copyright 2025 Colliery Software
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! Database connection management for the SQLite order store.
//!
//! This module provides an async connection pool implementation using
//! `deadpool-diesel` for managing database connections efficiently. It handles
//! connection pooling, connection lifecycle, and provides a thread-safe way to
//! access database connections.
//!
//! # Features
//!
//! - Connection pooling with configurable pool size
//! - Thread-safe connection management
//! - Embedded schema migrations
//! - File path, `sqlite://` URL, or `:memory:` configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk::database::Database;
//!
//! let db = Database::new("path/to/orders.db", 1);
//! db.run_migrations().await?;
//! ```

use deadpool_diesel::sqlite::{Manager, Object, Pool, Runtime};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use crate::error::StoreError;

pub mod schema;

/// Embedded SQLite migrations, compiled into the library.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Represents a pool of database connections.
///
/// This struct provides a thread-safe wrapper around a connection pool,
/// allowing multiple parts of the application to share database connections
/// efficiently.
///
/// # Thread Safety
///
/// The `Database` struct is `Clone` and can be safely shared between threads.
/// Each clone references the same underlying connection pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Database(...)")
    }
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - A file path, `sqlite://` URL, or `:memory:`
    /// * `max_size` - Maximum number of connections in the pool
    ///
    /// SQLite has limited concurrent write support even with WAL mode, so a
    /// pool size of 1 is the safe choice; larger pools need busy_timeout
    /// tuning on each connection.
    ///
    /// # Panics
    ///
    /// Panics if the connection pool cannot be created.
    pub fn new(connection_string: &str, max_size: usize) -> Self {
        let connection_url = Self::build_sqlite_url(connection_string);
        let manager = Manager::new(connection_url, Runtime::Tokio1);
        let pool = Pool::builder(manager)
            .max_size(max_size)
            .build()
            .expect("Failed to create SQLite connection pool");

        info!("SQLite connection pool initialized (size: {})", max_size);

        Self { pool }
    }

    /// Returns a clone of the connection pool.
    pub fn pool(&self) -> Pool {
        self.pool.clone()
    }

    /// Checks out a connection from the pool.
    ///
    /// The connection is returned to the pool when the object is dropped,
    /// on every exit path including errors.
    pub async fn get_connection(&self) -> Result<Object, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::ConnectionPool(e.to_string()))
    }

    /// Builds a SQLite connection URL.
    fn build_sqlite_url(connection_string: &str) -> String {
        // Strip sqlite:// prefix if present
        if let Some(path) = connection_string.strip_prefix("sqlite://") {
            path.to_string()
        } else {
            connection_string.to_string()
        }
    }

    /// Runs pending database migrations.
    ///
    /// Sets WAL mode and a busy timeout before migrating so concurrent
    /// readers do not fail with "database is locked" errors.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        let conn = self.get_connection().await?;
        conn.interact(|conn| {
            use diesel::prelude::*;

            // WAL mode allows concurrent reads during writes
            diesel::sql_query("PRAGMA journal_mode=WAL;")
                .execute(conn)
                .map_err(|e| e.to_string())?;
            // busy_timeout makes SQLite wait instead of immediately failing on locks
            diesel::sql_query("PRAGMA busy_timeout=30000;")
                .execute(conn)
                .map_err(|e| e.to_string())?;

            conn.run_pending_migrations(MIGRATIONS)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| StoreError::ConnectionPool(e.to_string()))?
        .map_err(StoreError::Migration)?;

        info!("Database migrations applied");
        Ok(())
    }
}
