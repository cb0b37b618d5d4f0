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

//! Integration tests for the columnar snapshot codec.

use crate::fixtures::{order_input, test_service};
use orderdesk::error::CodecError;

#[tokio::test]
async fn test_round_trip_into_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let source = test_service(dir.path()).await;

    let mut no_description = order_input("Bare", "In Progress");
    no_description.description = None;

    source.add_order(order_input("First", "New")).await.unwrap();
    source.add_order(no_description).await.unwrap();
    source.add_order(order_input("Third", "Completed")).await.unwrap();

    let path = source.export_hdf5().await.unwrap();
    assert_eq!(path, dir.path().join("orders.hdf5"));

    let target = test_service(dir.path()).await;
    target.import_hdf5(&path).await.unwrap();

    assert_eq!(
        target.list_orders().await.unwrap(),
        source.list_orders().await.unwrap()
    );
}

#[tokio::test]
async fn test_import_merges_by_id_without_deleting() {
    let dir = tempfile::tempdir().unwrap();
    let source = test_service(dir.path()).await;
    source.add_order(order_input("Exported", "New")).await.unwrap();
    let path = source.export_hdf5().await.unwrap();

    // The target already has the same id plus an extra record.
    let target = test_service(dir.path()).await;
    let colliding = target.add_order(order_input("Old name", "Completed")).await.unwrap();
    let untouched = target.add_order(order_input("Keep me", "New")).await.unwrap();

    target.import_hdf5(&path).await.unwrap();

    let merged = target.get_order(colliding.id).await.unwrap();
    assert_eq!(merged.name, "Exported");
    assert_eq!(merged.status, "New");
    // Records absent from the file survive the import.
    assert_eq!(target.get_order(untouched.id).await.unwrap(), untouched);
    assert_eq!(target.list_orders().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_export_of_empty_store_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;

    let path = service.export_hdf5().await.unwrap();
    service.import_hdf5(&path).await.unwrap();
    assert!(service.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_file_aborts_import_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;
    let existing = service.add_order(order_input("Existing", "New")).await.unwrap();

    let bogus = dir.path().join("orders.hdf5");
    std::fs::write(&bogus, b"this is not a snapshot").unwrap();

    let err = service.import_hdf5(&bogus).await.unwrap_err();
    assert!(matches!(err, CodecError::Malformed { .. }));

    let all = service.list_orders().await.unwrap();
    assert_eq!(all, vec![existing]);
}

#[tokio::test]
async fn test_import_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;

    let err = service
        .import_hdf5(&dir.path().join("nope.hdf5"))
        .await
        .unwrap_err();
    assert!(matches!(err, CodecError::Io(_)));
}
