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

//! Order service facade.
//!
//! [`OrderService`] is the narrow contract the surrounding HTTP/CLI layer
//! calls into: CRUD and bulk operations on orders, status statistics, and
//! the export/import codecs. It owns the DAL and the reports directory; the
//! external layer is expected to have validated request *shapes* already,
//! while the entity contract (lengths, required fields) is enforced here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::codec::{ColumnarCodec, ReportCodec, XmlCodec, DEFAULT_REPORTS_DIR};
use crate::dal::DAL;
use crate::database::Database;
use crate::error::{CodecError, StoreError};
use crate::models::order::{BulkStatusUpdate, Order, OrderInput};

/// Facade over the order repository, statistics and codecs.
///
/// # Thread Safety
///
/// `OrderService` is `Clone`; each clone shares the same connection pool.
/// Each operation is request-scoped and synchronous internally: it runs to
/// completion with no background tasks, and the store supplies the only
/// concurrency control.
#[derive(Clone, Debug)]
pub struct OrderService {
    dal: DAL,
    reports_dir: PathBuf,
}

impl OrderService {
    /// Creates a service writing exports to the default `reports` directory.
    pub fn new(database: Database) -> Self {
        Self::with_reports_dir(database, DEFAULT_REPORTS_DIR)
    }

    /// Creates a service with an explicit reports directory.
    pub fn with_reports_dir(database: Database, reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            dal: DAL::new(database),
            reports_dir: reports_dir.into(),
        }
    }

    /// Returns the underlying DAL.
    pub fn dal(&self) -> &DAL {
        &self.dal
    }

    /// Returns the reports directory exports are written to.
    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Validates and persists a new order, returning it with its assigned id.
    pub async fn add_order(&self, input: OrderInput) -> Result<Order, StoreError> {
        input.validate()?;
        self.dal.orders().create(input).await
    }

    /// Returns all orders.
    pub async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.dal.orders().list().await
    }

    /// Returns the order with the given id.
    pub async fn get_order(&self, id: i32) -> Result<Order, StoreError> {
        self.dal.orders().get_by_id(id).await
    }

    /// Validates the input and overwrites the order's data fields.
    pub async fn edit_order(&self, id: i32, input: OrderInput) -> Result<Order, StoreError> {
        input.validate()?;
        self.dal.orders().update(id, input).await
    }

    /// Deletes the order, returning it as it was before removal.
    pub async fn delete_order(&self, id: i32) -> Result<Order, StoreError> {
        self.dal.orders().delete(id).await
    }

    /// Sets the status on each listed order; misses are reported per id,
    /// not raised. Each update commits on its own.
    pub async fn bulk_update_status(
        &self,
        ids: &[i32],
        new_status: &str,
    ) -> Result<BulkStatusUpdate, StoreError> {
        self.dal.orders().update_status_bulk(ids, new_status).await
    }

    /// Returns the number of orders per status value.
    pub async fn order_statistics(&self) -> Result<HashMap<String, i64>, StoreError> {
        self.dal.orders().status_counts().await
    }

    /// Generates the styled XLSX report; fails with
    /// [`CodecError::EmptyDataset`] on an empty store.
    pub async fn export_report(&self) -> Result<PathBuf, CodecError> {
        ReportCodec::new(&self.dal, &self.reports_dir).export().await
    }

    /// Exports all orders to the columnar snapshot file.
    pub async fn export_hdf5(&self) -> Result<PathBuf, CodecError> {
        ColumnarCodec::new(&self.dal, &self.reports_dir).export().await
    }

    /// Imports a columnar snapshot, merging records by id.
    pub async fn import_hdf5(&self, path: &Path) -> Result<(), CodecError> {
        ColumnarCodec::new(&self.dal, &self.reports_dir)
            .import(path)
            .await
    }

    /// Exports all orders to the XML file.
    pub async fn export_xml(&self) -> Result<PathBuf, CodecError> {
        XmlCodec::new(&self.dal, &self.reports_dir).export().await
    }

    /// Imports an XML export, merging records by id.
    pub async fn import_xml(&self, path: &Path) -> Result<(), CodecError> {
        XmlCodec::new(&self.dal, &self.reports_dir).import(path).await
    }
}
