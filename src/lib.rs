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

//! # Orderdesk
//!
//! A library for managing order records in a relational store, with bulk
//! operations and full-set interchange in three on-disk formats.
//!
//! The crate is the persistence and serialization core of an order
//! management service: the surrounding HTTP layer deserializes requests and
//! calls into [`OrderService`], which owns record lifecycle through the
//! [`dal`] and the export/import [`codec`]s.
//!
//! ## Features
//!
//! - CRUD over a single `orders` table (SQLite via an async connection pool)
//! - Bulk status updates with per-id partial-success reporting
//! - Status statistics
//! - Styled XLSX report export
//! - Column-per-field snapshot export/import
//! - XML export/import
//!
//! Imports merge by id: a record whose id already exists overwrites the
//! current row, one that does not is inserted, and rows absent from the
//! file are left alone.
//!
//! ## Example
//!
//! ```rust,ignore
//! use orderdesk::{Database, OrderInput, OrderService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new("orders.db", 1);
//!     db.run_migrations().await?;
//!
//!     let service = OrderService::new(db);
//!     let order = service
//!         .add_order(OrderInput {
//!             name: "Widgets".into(),
//!             description: None,
//!             creation_date: None,
//!             status: "New".into(),
//!         })
//!         .await?;
//!
//!     let report = service.export_report().await?;
//!     println!("order {} reported at {}", order.id, report.display());
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod dal;
pub mod database;
pub mod error;
pub mod models;
pub mod service;

pub use codec::{ColumnarCodec, ReportCodec, XmlCodec};
pub use dal::DAL;
pub use database::Database;
pub use error::{CodecError, StoreError};
pub use models::order::{BulkStatusUpdate, Order, OrderInput};
pub use service::OrderService;
