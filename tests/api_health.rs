//! # Integration Tests: Health Endpoint
//!
//! ## What is tested
//! - GET /health returns 200 OK without an API key
//! - Response contains status, version, last_action fields
//! - last_action is null initially, populated after other requests

#![cfg(feature = "native")]

use std::sync::{Arc, RwLock};
use warp::test::request;
use zpool_agent::models::LastAction;
use zpool_agent::routes::routes;
use zpool_agent::zfs_management::ZfsManager;

const KEY: &str = "test-key";

fn tracker() -> Arc<RwLock<Option<LastAction>>> {
    Arc::new(RwLock::new(None))
}

#[tokio::test]
async fn test_health_returns_200_without_key() {
    let api = routes(ZfsManager::new(), KEY.to_string(), tracker());
    let resp = request().method("GET").path("/health").reply(&api).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["last_action"].is_null());
}

#[tokio::test]
async fn test_health_reports_last_action() {
    let last_action = tracker();
    let api = routes(ZfsManager::new(), KEY.to_string(), last_action.clone());

    // unknown property is rejected before libzfs is touched
    let resp = request()
        .method("GET")
        .path("/pools/tank/properties/bogus")
        .header("X-API-Key", KEY)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), 400);

    let resp = request().method("GET").path("/health").reply(&api).await;
    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body["last_action"]["function"], "get_pool_property");
}
