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

//! Integration tests for the XML interchange codec.

use crate::fixtures::{order_input, test_service};
use orderdesk::error::CodecError;

#[tokio::test]
async fn test_round_trip_into_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let source = test_service(dir.path()).await;

    let mut no_description = order_input("Bare", "In Progress");
    no_description.description = None;

    source.add_order(order_input("First", "New")).await.unwrap();
    source.add_order(no_description).await.unwrap();

    let path = source.export_xml().await.unwrap();
    assert_eq!(path, dir.path().join("orders.xml"));

    let target = test_service(dir.path()).await;
    target.import_xml(&path).await.unwrap();

    assert_eq!(
        target.list_orders().await.unwrap(),
        source.list_orders().await.unwrap()
    );
}

#[tokio::test]
async fn test_import_overwrites_existing_ids_and_keeps_others() {
    let dir = tempfile::tempdir().unwrap();
    let source = test_service(dir.path()).await;
    source.add_order(order_input("Exported", "Completed")).await.unwrap();
    let path = source.export_xml().await.unwrap();

    let target = test_service(dir.path()).await;
    let colliding = target.add_order(order_input("Stale", "New")).await.unwrap();
    let untouched = target.add_order(order_input("Keep me", "New")).await.unwrap();

    target.import_xml(&path).await.unwrap();

    assert_eq!(target.get_order(colliding.id).await.unwrap().name, "Exported");
    assert_eq!(target.get_order(untouched.id).await.unwrap(), untouched);
}

#[tokio::test]
async fn test_malformed_record_aborts_whole_import() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;
    let existing = service.add_order(order_input("Existing", "New")).await.unwrap();

    // The first record is fine; the second has a non-integer id. Nothing
    // may be merged.
    let doc = "<orders>\
               <order><id>50</id><name>good</name><description/>\
               <creation_date>2024-06-01 08:15:30</creation_date>\
               <status>New</status></order>\
               <order><id>oops</id><name>bad</name><description/>\
               <creation_date>2024-06-01 08:15:30</creation_date>\
               <status>New</status></order>\
               </orders>";
    let path = dir.path().join("orders.xml");
    std::fs::write(&path, doc).unwrap();

    let err = service.import_xml(&path).await.unwrap_err();
    assert!(matches!(err, CodecError::Malformed { .. }));

    let all = service.list_orders().await.unwrap();
    assert_eq!(all, vec![existing]);
}

#[tokio::test]
async fn test_broken_xml_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;

    let path = dir.path().join("orders.xml");
    std::fs::write(&path, "<orders><order><id>1</id>").unwrap();

    let err = service.import_xml(&path).await.unwrap_err();
    assert!(matches!(err, CodecError::Malformed { .. }));
}
