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

//! Order Model
//!
//! This module defines the `Order` entity stored in the `orders` table, the
//! `OrderInput` structure callers supply when creating or editing orders, and
//! the result shape of bulk status updates.
//!
//! Timestamps are `chrono::NaiveDateTime` values holding UTC wall-clock time.
//! The store column is `TIMESTAMP`; the default creation date is assigned by
//! the repository at insert time when the input leaves it unset.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::database::schema::orders;
use crate::error::StoreError;

/// Maximum length of an order name.
pub const MAX_NAME_LEN: usize = 50;
/// Maximum length of an order description.
pub const MAX_DESCRIPTION_LEN: usize = 200;
/// Maximum length of an order status.
pub const MAX_STATUS_LEN: usize = 20;

/// A persisted order record.
///
/// `id` is assigned by the store on creation and immutable thereafter.
/// `creation_date` is set once at creation (or carried verbatim on import)
/// and never altered by edits.
///
/// The struct doubles as the insert/changeset shape for the merge-by-id
/// import path: inserting it carries the explicit `id`, while the changeset
/// derive skips the primary key so an upsert overwrites only the data fields.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Queryable,
    Selectable,
    Identifiable,
    Insertable,
    AsChangeset,
    Serialize,
    Deserialize,
)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct Order {
    /// Auto-incrementing primary key.
    pub id: i32,
    /// Required display name, at most 50 characters.
    pub name: String,
    /// Optional free-form description, at most 200 characters.
    pub description: Option<String>,
    /// When the order was created (UTC).
    pub creation_date: NaiveDateTime,
    /// Current status, at most 20 characters. Free-form, but the report
    /// codec recognizes "New", "In Progress" and "Completed" for styling.
    pub status: String,
}

/// Caller-supplied fields for creating or editing an order.
///
/// `creation_date` is only honored on creation; edits never touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInput {
    pub name: String,
    pub description: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
    pub status: String,
}

impl OrderInput {
    /// Checks the entity contract: non-empty name, field length caps.
    ///
    /// SQLite does not enforce VARCHAR widths, so the caps live here.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidOrder("name must not be empty".into()));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(StoreError::InvalidOrder(format!(
                "name exceeds {} characters",
                MAX_NAME_LEN
            )));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(StoreError::InvalidOrder(format!(
                    "description exceeds {} characters",
                    MAX_DESCRIPTION_LEN
                )));
            }
        }
        if self.status.trim().is_empty() {
            return Err(StoreError::InvalidOrder("status must not be empty".into()));
        }
        if self.status.chars().count() > MAX_STATUS_LEN {
            return Err(StoreError::InvalidOrder(format!(
                "status exceeds {} characters",
                MAX_STATUS_LEN
            )));
        }
        Ok(())
    }
}

/// Insert shape for new orders; the store assigns the id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub name: String,
    pub description: Option<String>,
    pub creation_date: NaiveDateTime,
    pub status: String,
}

/// Changeset applied by edits: data fields only, id and creation_date
/// are never altered.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = orders)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateOrder {
    pub name: String,
    pub description: Option<String>,
    pub status: String,
}

impl From<OrderInput> for UpdateOrder {
    fn from(input: OrderInput) -> Self {
        UpdateOrder {
            name: input.name,
            description: input.description,
            status: input.status,
        }
    }
}

/// Outcome of a bulk status update.
///
/// Partial success is the designed outcome: orders that were found carry the
/// new status in `updated`, ids that were missing are reported in
/// `not_found`, one descriptive entry per miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkStatusUpdate {
    /// Records that were updated, in the order their ids were supplied.
    pub updated: Vec<Order>,
    /// One `"Order ID {id} not found"` entry per missing id.
    pub not_found: Vec<String>,
}
