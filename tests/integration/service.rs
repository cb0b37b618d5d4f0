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

//! Integration tests for the service facade: entity validation and the
//! statistics surface.

use crate::fixtures::{order_input, test_database, test_service};
use orderdesk::error::StoreError;
use orderdesk::service::OrderService;

#[tokio::test]
async fn test_add_order_rejects_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;

    let err = service.add_order(order_input("", "New")).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidOrder(_)));

    let err = service
        .add_order(order_input(&"x".repeat(51), "New"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidOrder(_)));

    assert!(service.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_order_rejects_invalid_input_before_touching_store() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;
    let created = service.add_order(order_input("Fine", "New")).await.unwrap();

    let err = service
        .edit_order(created.id, order_input("Fine", &"s".repeat(21)))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidOrder(_)));

    assert_eq!(service.get_order(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_order_statistics_counts_per_status() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;

    service.add_order(order_input("A", "New")).await.unwrap();
    service.add_order(order_input("B", "New")).await.unwrap();
    service.add_order(order_input("C", "Completed")).await.unwrap();

    let stats = service.order_statistics().await.unwrap();
    assert_eq!(stats.get("New"), Some(&2));
    assert_eq!(stats.get("Completed"), Some(&1));
    assert_eq!(stats.len(), 2);
}

#[tokio::test]
async fn test_bulk_update_through_facade() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(dir.path()).await;
    let a = service.add_order(order_input("A", "New")).await.unwrap();

    let result = service
        .bulk_update_status(&[a.id, 404], "Completed")
        .await
        .unwrap();
    assert_eq!(result.updated.len(), 1);
    assert_eq!(result.not_found, vec!["Order ID 404 not found".to_string()]);
}

#[tokio::test]
async fn test_default_reports_dir_is_reports() {
    let service = OrderService::new(test_database().await);
    assert_eq!(service.reports_dir(), std::path::Path::new("reports"));
}
