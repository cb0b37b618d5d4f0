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

//! Styled spreadsheet report codec.
//!
//! Export only: the spreadsheet is a terminal artifact, not an interchange
//! format, so there is no matching import. The sheet carries one header row
//! of field names followed by one row per order, with each data row filled
//! by a background color keyed on the order's status.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use super::{export_path, format_timestamp, FIELD_NAMES};
use crate::dal::DAL;
use crate::error::CodecError;
use crate::models::order::Order;

/// File name of the generated report inside the reports directory.
pub const REPORT_FILE_NAME: &str = "orders_report.xlsx";

/// Row fill for orders with status "New".
const NEW_FILL: Color = Color::RGB(0x0000FF);
/// Row fill for orders with status "In Progress".
const IN_PROGRESS_FILL: Color = Color::RGB(0xFFFF00);
/// Row fill for orders with status "Completed".
const COMPLETED_FILL: Color = Color::RGB(0x00FF00);

/// Maps a status to its row fill color. Exact case-sensitive match; any
/// other value gets the default (no) fill rather than an error.
fn status_fill(status: &str) -> Option<Color> {
    match status {
        "New" => Some(NEW_FILL),
        "In Progress" => Some(IN_PROGRESS_FILL),
        "Completed" => Some(COMPLETED_FILL),
        _ => None,
    }
}

/// XLSX report codec.
pub struct ReportCodec<'a> {
    dal: &'a DAL,
    reports_dir: &'a Path,
}

impl<'a> ReportCodec<'a> {
    /// Creates a new report codec writing into the given reports directory.
    pub fn new(dal: &'a DAL, reports_dir: &'a Path) -> Self {
        Self { dal, reports_dir }
    }

    /// Generates the XLSX report for all orders and returns its path.
    ///
    /// Fails with [`CodecError::EmptyDataset`] when the store holds no
    /// orders; no header-only file is produced in that case.
    pub async fn export(&self) -> Result<PathBuf, CodecError> {
        let orders = self.dal.orders().list().await?;
        if orders.is_empty() {
            return Err(CodecError::EmptyDataset);
        }

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Orders")?;

        for (col, field) in FIELD_NAMES.iter().enumerate() {
            sheet.write_string(0, col as u16, *field)?;
        }

        let default_format = Format::new();
        for (index, order) in orders.iter().enumerate() {
            let row = (index + 1) as u32;
            let format = match status_fill(&order.status) {
                Some(color) => Format::new().set_background_color(color),
                None => default_format.clone(),
            };
            write_order_row(sheet, row, order, &format)?;
        }

        let path = export_path(self.reports_dir, REPORT_FILE_NAME)?;
        workbook.save(&path)?;

        info!(rows = orders.len(), path = %path.display(), "Wrote order report");
        Ok(path)
    }
}

fn write_order_row(
    sheet: &mut Worksheet,
    row: u32,
    order: &Order,
    format: &Format,
) -> Result<(), XlsxError> {
    sheet.write_number_with_format(row, 0, order.id, format)?;
    sheet.write_string_with_format(row, 1, &order.name, format)?;
    sheet.write_string_with_format(row, 2, order.description.as_deref().unwrap_or(""), format)?;
    sheet.write_string_with_format(row, 3, format_timestamp(&order.creation_date), format)?;
    sheet.write_string_with_format(row, 4, &order.status, format)?;
    Ok(())
}
