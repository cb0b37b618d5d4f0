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

//! Integration tests for the XLSX report codec.

use crate::fixtures::{order_input, test_service};
use orderdesk::error::CodecError;

#[tokio::test]
async fn test_export_on_empty_store_is_empty_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;

    let err = service.export_report().await.unwrap_err();
    assert!(matches!(err, CodecError::EmptyDataset));

    // No header-only file may be produced.
    assert!(!dir.path().join("orders_report.xlsx").exists());
}

#[tokio::test]
async fn test_export_writes_report_at_returned_path() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;

    service.add_order(order_input("A", "New")).await.unwrap();
    service.add_order(order_input("B", "In Progress")).await.unwrap();
    service.add_order(order_input("C", "Cancelled")).await.unwrap();

    let path = service.export_report().await.unwrap();
    assert_eq!(path, dir.path().join("orders_report.xlsx"));
    assert!(path.exists());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[tokio::test]
async fn test_report_has_header_plus_one_row_per_order() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;

    service.add_order(order_input("A", "New")).await.unwrap();
    service.add_order(order_input("B", "In Progress")).await.unwrap();
    service.add_order(order_input("C", "Completed")).await.unwrap();

    let path = service.export_report().await.unwrap();
    assert_eq!(sheet_row_count(&path), 4);
}

/// Counts the `<row>` elements of the first worksheet by unzipping the
/// workbook.
fn sheet_row_count(path: &std::path::Path) -> usize {
    use std::io::Read;

    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut sheet = String::new();
    archive
        .by_name("xl/worksheets/sheet1.xml")
        .unwrap()
        .read_to_string(&mut sheet)
        .unwrap();
    sheet.matches("<row ").count()
}

#[tokio::test]
async fn test_export_overwrites_previous_report() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;

    service.add_order(order_input("A", "New")).await.unwrap();
    let first = service.export_report().await.unwrap();

    service.add_order(order_input("B", "Completed")).await.unwrap();
    let second = service.export_report().await.unwrap();

    // Fixed well-known path: the second export wins the file.
    assert_eq!(first, second);
    assert!(second.exists());
}
