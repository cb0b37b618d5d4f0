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

//! Order DAL
//!
//! CRUD, bulk status update, merge-by-id upsert, and status aggregation for
//! `Order` records. Single-record misses surface as
//! [`StoreError::NotFound`]; the bulk path records misses per id and keeps
//! going.

use std::collections::HashMap;

use chrono::Utc;
use diesel::dsl::count_star;
use diesel::prelude::*;
use tracing::debug;

use super::DAL;
use crate::database::schema::orders;
use crate::error::StoreError;
use crate::models::order::{BulkStatusUpdate, NewOrder, Order, OrderInput, UpdateOrder};

/// Data access layer for order operations.
#[derive(Clone)]
pub struct OrderDAL<'a> {
    dal: &'a DAL,
}

impl<'a> OrderDAL<'a> {
    /// Creates a new OrderDAL instance.
    pub fn new(dal: &'a DAL) -> Self {
        Self { dal }
    }

    /// Creates a new order record in the database.
    ///
    /// The creation date defaults to the current UTC time when the input
    /// leaves it unset. Returns the persisted record with its assigned id.
    pub async fn create(&self, input: OrderInput) -> Result<Order, StoreError> {
        let conn = self.dal.database.get_connection().await?;

        let record = NewOrder {
            name: input.name,
            description: input.description,
            creation_date: input
                .creation_date
                .unwrap_or_else(|| Utc::now().naive_utc()),
            status: input.status,
        };

        let order: Order = conn
            .interact(move |conn| {
                diesel::insert_into(orders::table)
                    .values(&record)
                    .get_result(conn)
            })
            .await
            .map_err(|e| StoreError::ConnectionPool(e.to_string()))??;

        debug!(id = order.id, "Created order");
        Ok(order)
    }

    /// Retrieves a single order by its id.
    pub async fn get_by_id(&self, id: i32) -> Result<Order, StoreError> {
        let conn = self.dal.database.get_connection().await?;

        let result = conn
            .interact(move |conn| orders::table.find(id).first::<Order>(conn))
            .await
            .map_err(|e| StoreError::ConnectionPool(e.to_string()))?;

        result.map_err(|e| match e {
            diesel::result::Error::NotFound => StoreError::NotFound(id),
            other => other.into(),
        })
    }

    /// Retrieves all orders in primary-key order.
    pub async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let conn = self.dal.database.get_connection().await?;

        let results: Vec<Order> = conn
            .interact(|conn| orders::table.order(orders::id.asc()).load(conn))
            .await
            .map_err(|e| StoreError::ConnectionPool(e.to_string()))??;

        Ok(results)
    }

    /// Overwrites the name, description and status of an existing order.
    ///
    /// The id and creation date are never altered by an edit.
    pub async fn update(&self, id: i32, input: OrderInput) -> Result<Order, StoreError> {
        let conn = self.dal.database.get_connection().await?;

        let changes = UpdateOrder::from(input);
        let result = conn
            .interact(move |conn| {
                diesel::update(orders::table.find(id))
                    .set(&changes)
                    .get_result::<Order>(conn)
            })
            .await
            .map_err(|e| StoreError::ConnectionPool(e.to_string()))?;

        result.map_err(|e| match e {
            diesel::result::Error::NotFound => StoreError::NotFound(id),
            other => other.into(),
        })
    }

    /// Deletes an order, returning the record as it was before removal.
    pub async fn delete(&self, id: i32) -> Result<Order, StoreError> {
        let conn = self.dal.database.get_connection().await?;

        let result = conn
            .interact(move |conn| {
                diesel::delete(orders::table.find(id)).get_result::<Order>(conn)
            })
            .await
            .map_err(|e| StoreError::ConnectionPool(e.to_string()))?;

        match result {
            Ok(order) => {
                debug!(id, "Deleted order");
                Ok(order)
            }
            Err(diesel::result::Error::NotFound) => Err(StoreError::NotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Sets the status of each listed order, reporting misses per id.
    ///
    /// Each update commits individually (autocommit, no wrapping
    /// transaction): a failure partway through leaves earlier updates
    /// intact. A missing id appends `"Order ID {id} not found"` to the
    /// result and processing continues with the remaining ids.
    pub async fn update_status_bulk(
        &self,
        ids: &[i32],
        new_status: &str,
    ) -> Result<BulkStatusUpdate, StoreError> {
        let conn = self.dal.database.get_connection().await?;

        let mut updated = Vec::new();
        let mut not_found = Vec::new();

        for &id in ids {
            let status = new_status.to_string();
            let result = conn
                .interact(move |conn| {
                    diesel::update(orders::table.find(id))
                        .set(orders::status.eq(status))
                        .get_result::<Order>(conn)
                })
                .await
                .map_err(|e| StoreError::ConnectionPool(e.to_string()))?;

            match result {
                Ok(order) => updated.push(order),
                Err(diesel::result::Error::NotFound) => {
                    not_found.push(format!("Order ID {} not found", id));
                }
                Err(other) => return Err(other.into()),
            }
        }

        debug!(
            updated = updated.len(),
            missed = not_found.len(),
            "Bulk status update finished"
        );
        Ok(BulkStatusUpdate { updated, not_found })
    }

    /// Inserts the record, or overwrites the existing row with the same id.
    ///
    /// This is the merge path used by the import codecs: imported records
    /// keep their original ids, and a pre-existing id overwrites the current
    /// row rather than failing.
    pub async fn upsert(&self, order: Order) -> Result<Order, StoreError> {
        let conn = self.dal.database.get_connection().await?;

        let merged: Order = conn
            .interact(move |conn| {
                diesel::insert_into(orders::table)
                    .values(&order)
                    .on_conflict(orders::id)
                    .do_update()
                    .set(&order)
                    .get_result(conn)
            })
            .await
            .map_err(|e| StoreError::ConnectionPool(e.to_string()))??;

        Ok(merged)
    }

    /// Counts orders per status value, case-sensitively.
    ///
    /// An empty table yields an empty map.
    pub async fn status_counts(&self) -> Result<HashMap<String, i64>, StoreError> {
        let conn = self.dal.database.get_connection().await?;

        let rows: Vec<(String, i64)> = conn
            .interact(|conn| {
                orders::table
                    .group_by(orders::status)
                    .select((orders::status, count_star()))
                    .load(conn)
            })
            .await
            .map_err(|e| StoreError::ConnectionPool(e.to_string()))??;

        Ok(rows.into_iter().collect())
    }
}
