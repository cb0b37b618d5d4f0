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

//! Columnar snapshot codec.
//!
//! HDF5-style layout: one dataset per order field. The id column is native
//! i32; name, description, creation date and status are fixed-width byte
//! columns, each value's UTF-8 bytes padded with NUL to the column width.
//! Creation dates are stored as their text form, not a native timestamp.
//!
//! On import every column must carry the same number of rows, otherwise the
//! file is malformed. A creation date that fails to parse does not abort the
//! import: the row falls back to the Unix epoch placeholder and a warning is
//! logged. The whole file is decoded before the first record is merged, so a
//! malformed file imports nothing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{export_path, format_timestamp, parse_timestamp};
use crate::dal::DAL;
use crate::error::CodecError;
use crate::models::order::Order;

/// File name of the columnar snapshot inside the reports directory.
pub const COLUMNAR_FILE_NAME: &str = "orders.hdf5";

const FORMAT: &str = "columnar";
const MAGIC: [u8; 8] = *b"ORDCOL\x00\x01";

/// A fixed-width byte column: `rows` values of `width` bytes each,
/// NUL-padded on the right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ByteColumn {
    width: u32,
    rows: u32,
    data: Vec<u8>,
}

impl ByteColumn {
    /// Packs string values into a fixed-width column. The width is the
    /// longest value's byte length; shorter values are NUL-padded.
    fn pack<'v>(values: impl Iterator<Item = &'v str>) -> Self {
        let values: Vec<&str> = values.collect();
        let width = values.iter().map(|v| v.len()).max().unwrap_or(0);
        let mut data = Vec::with_capacity(width * values.len());
        for value in &values {
            data.extend_from_slice(value.as_bytes());
            data.resize(data.len() + (width - value.len()), 0);
        }
        ByteColumn {
            width: width as u32,
            rows: values.len() as u32,
            data,
        }
    }

    /// Unpacks the column back into strings, trimming the NUL padding.
    fn unpack(&self) -> Result<Vec<String>, CodecError> {
        let width = self.width as usize;
        let rows = self.rows as usize;
        if self.data.len() != width * rows {
            return Err(CodecError::malformed(
                FORMAT,
                format!(
                    "column data length {} does not match {} rows of width {}",
                    self.data.len(),
                    rows,
                    width
                ),
            ));
        }

        if width == 0 {
            return Ok(vec![String::new(); rows]);
        }

        self.data
            .chunks_exact(width)
            .map(|chunk| {
                let trimmed = match chunk.iter().position(|&b| b == 0) {
                    Some(end) => &chunk[..end],
                    None => chunk,
                };
                String::from_utf8(trimmed.to_vec())
                    .map_err(|e| CodecError::malformed(FORMAT, format!("invalid UTF-8: {}", e)))
            })
            .collect()
    }
}

/// The on-disk container: a magic header plus one column per order field.
#[derive(Debug, Serialize, Deserialize)]
struct ColumnarSnapshot {
    magic: [u8; 8],
    ids: Vec<i32>,
    names: ByteColumn,
    descriptions: ByteColumn,
    creation_dates: ByteColumn,
    statuses: ByteColumn,
}

/// Serializes the full order set into the columnar container.
fn encode_snapshot(orders: &[Order]) -> Result<Vec<u8>, CodecError> {
    let dates: Vec<String> = orders
        .iter()
        .map(|o| format_timestamp(&o.creation_date))
        .collect();

    let snapshot = ColumnarSnapshot {
        magic: MAGIC,
        ids: orders.iter().map(|o| o.id).collect(),
        names: ByteColumn::pack(orders.iter().map(|o| o.name.as_str())),
        descriptions: ByteColumn::pack(
            orders.iter().map(|o| o.description.as_deref().unwrap_or("")),
        ),
        creation_dates: ByteColumn::pack(dates.iter().map(|d| d.as_str())),
        statuses: ByteColumn::pack(orders.iter().map(|o| o.status.as_str())),
    };

    bincode::serialize(&snapshot).map_err(|e| CodecError::Serialize(e.to_string()))
}

/// Decodes a columnar container back into order records.
///
/// Column row counts must all match the id column. Unparseable creation
/// dates fall back to the Unix epoch with a warning instead of failing the
/// decode.
fn decode_snapshot(bytes: &[u8]) -> Result<Vec<Order>, CodecError> {
    let snapshot: ColumnarSnapshot = bincode::deserialize(bytes)
        .map_err(|e| CodecError::malformed(FORMAT, format!("unreadable container: {}", e)))?;

    if snapshot.magic != MAGIC {
        return Err(CodecError::malformed(FORMAT, "unrecognized file header"));
    }

    let rows = snapshot.ids.len();
    for (field, column_rows) in [
        ("name", snapshot.names.rows as usize),
        ("description", snapshot.descriptions.rows as usize),
        ("creation_date", snapshot.creation_dates.rows as usize),
        ("status", snapshot.statuses.rows as usize),
    ] {
        if column_rows != rows {
            return Err(CodecError::malformed(
                FORMAT,
                format!(
                    "column {} has {} rows, expected {}",
                    field, column_rows, rows
                ),
            ));
        }
    }

    let names = snapshot.names.unpack()?;
    let descriptions = snapshot.descriptions.unpack()?;
    let dates = snapshot.creation_dates.unpack()?;
    let statuses = snapshot.statuses.unpack()?;

    let mut orders = Vec::with_capacity(rows);
    for i in 0..rows {
        let creation_date = match parse_timestamp(&dates[i]) {
            Ok(ts) => ts,
            Err(e) => {
                warn!(
                    id = snapshot.ids[i],
                    value = %dates[i],
                    "Unparseable creation date in columnar import, \
                     falling back to epoch placeholder: {}",
                    e
                );
                chrono::DateTime::UNIX_EPOCH.naive_utc()
            }
        };
        orders.push(Order {
            id: snapshot.ids[i],
            name: names[i].clone(),
            description: if descriptions[i].is_empty() {
                None
            } else {
                Some(descriptions[i].clone())
            },
            creation_date,
            status: statuses[i].clone(),
        });
    }
    Ok(orders)
}

/// Columnar snapshot codec.
pub struct ColumnarCodec<'a> {
    dal: &'a DAL,
    reports_dir: &'a Path,
}

impl<'a> ColumnarCodec<'a> {
    /// Creates a new columnar codec writing into the given reports directory.
    pub fn new(dal: &'a DAL, reports_dir: &'a Path) -> Self {
        Self { dal, reports_dir }
    }

    /// Exports all orders to the columnar snapshot file and returns its path.
    ///
    /// An empty order set produces a valid zero-row snapshot.
    pub async fn export(&self) -> Result<PathBuf, CodecError> {
        let orders = self.dal.orders().list().await?;
        let bytes = encode_snapshot(&orders)?;

        let path = export_path(self.reports_dir, COLUMNAR_FILE_NAME)?;
        std::fs::write(&path, bytes)?;

        info!(rows = orders.len(), path = %path.display(), "Wrote columnar snapshot");
        Ok(path)
    }

    /// Imports orders from a columnar snapshot file, merging by id.
    ///
    /// Records absent from the file are left untouched in the store.
    pub async fn import(&self, path: &Path) -> Result<(), CodecError> {
        let bytes = std::fs::read(path)?;
        let orders = decode_snapshot(&bytes)?;

        let count = orders.len();
        for order in orders {
            self.dal.orders().upsert(order).await?;
        }

        info!(rows = count, path = %path.display(), "Imported columnar snapshot");
        Ok(())
    }
}
