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

//! Error types for the order store and the interchange codecs.
//!
//! Two error enums cover the two halves of the crate:
//!
//! - [`StoreError`] for everything the repository surface can fail with
//!   (missing records, rejected input, pool/database failures).
//! - [`CodecError`] for the export/import codecs, which layer file and
//!   parse failures on top of store failures.

use thiserror::Error;

/// Errors from the order repository and its database plumbing.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No order exists with the requested id.
    ///
    /// Raised by single-record operations (get/edit/delete). Bulk status
    /// updates record misses per id instead of raising this.
    #[error("Order {0} not found")]
    NotFound(i32),

    /// The input violates the entity contract (empty name, oversized field).
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Failed to obtain or use a pooled connection.
    #[error("Connection pool error: {0}")]
    ConnectionPool(String),

    /// A database operation failed (constraint violation, connectivity, ...).
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    /// Running embedded migrations failed.
    #[error("Migration error: {0}")]
    Migration(String),
}

/// Errors from the export/import codecs.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Report export was requested on an empty order set. No file is written.
    #[error("No orders found to generate report")]
    EmptyDataset,

    /// The file being imported cannot be parsed into the expected shape.
    ///
    /// A malformed file aborts the entire import before any record is merged.
    #[error("Malformed {format} file: {reason}")]
    Malformed {
        /// The codec format name ("columnar" or "xml").
        format: &'static str,
        /// What exactly failed to parse.
        reason: String,
    },

    /// Serializing an export payload failed.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// A repository operation performed by the codec failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Reading or writing the export file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Building the spreadsheet report failed.
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl CodecError {
    /// Shorthand for a [`CodecError::Malformed`] with the given format tag.
    pub(crate) fn malformed(format: &'static str, reason: impl Into<String>) -> Self {
        CodecError::Malformed {
            format,
            reason: reason.into(),
        }
    }
}
