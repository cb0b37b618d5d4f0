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

//! Data Access Layer for the order store.
//!
//! Each operation checks a connection out of the pool, runs the blocking
//! diesel query on the pool's interact executor, and releases the connection
//! on every exit path. The DAL is the sole mutator of persisted order state;
//! the codecs read snapshots through it and write back through its
//! merge-by-id path.
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk::dal::DAL;
//! use orderdesk::database::Database;
//!
//! let db = Database::new("orders.db", 1);
//! let dal = DAL::new(db);
//!
//! let all = dal.orders().list().await?;
//! ```

use crate::database::Database;

pub mod order;

pub use order::OrderDAL;

/// The Data Access Layer struct.
///
/// Provides access to all database operations through a single interface.
///
/// # Thread Safety
///
/// The `DAL` struct is `Clone` and can be safely shared between threads.
/// Each clone references the same underlying database connection pool.
#[derive(Clone, Debug)]
pub struct DAL {
    /// The database instance with connection pool
    pub database: Database,
}

impl DAL {
    /// Creates a new DAL instance.
    pub fn new(database: Database) -> Self {
        DAL { database }
    }

    /// Returns a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Returns an order DAL for order operations.
    pub fn orders(&self) -> OrderDAL {
        OrderDAL::new(self)
    }
}
