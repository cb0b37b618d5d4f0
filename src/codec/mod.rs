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

//! Export/import codecs for the full order set.
//!
//! Three independent codecs share one contract: export reads every order
//! through the DAL, writes a file at a fixed name inside the reports
//! directory, and returns the path; import parses the whole file first and
//! then merges each record into the store by id (insert if absent, overwrite
//! if present), never deleting rows absent from the file. A parse failure
//! aborts the import before the first merge.
//!
//! Exports write to fixed, shared paths: concurrent exports of the same
//! format race on the file and the last writer wins. Callers that need
//! isolation must namespace the reports directory themselves.
//!
//! - [`report`] - styled XLSX report, export only
//! - [`columnar`] - column-per-field snapshot, fixed-width byte columns
//! - [`xml`] - XML interchange with strict parsing

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

pub mod columnar;
pub mod report;
pub mod xml;

pub use columnar::ColumnarCodec;
pub use report::ReportCodec;
pub use xml::XmlCodec;

/// Order fields in declaration order, used as the report header row.
pub(crate) const FIELD_NAMES: [&str; 5] = ["id", "name", "description", "creation_date", "status"];

/// Default directory export files are written to.
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Text form of a creation date in the columnar and XML formats:
/// `YYYY-MM-DD HH:MM:SS.ffffff`.
pub(crate) fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

/// Parses the text form back into a timestamp.
///
/// The fractional part is optional, and a `T` date/time separator is
/// accepted alongside the space form.
pub(crate) fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
}

/// Creates the reports directory if missing and returns the path of the
/// named export file inside it.
pub(crate) fn export_path(reports_dir: &Path, file_name: &str) -> io::Result<PathBuf> {
    std::fs::create_dir_all(reports_dir)?;
    Ok(reports_dir.join(file_name))
}
