//! # Integration Tests: Authentication
//!
//! ## What is tested
//! - Pool routes reject requests without X-API-Key (401)
//! - Pool routes reject a wrong key (401)
//! - Unknown paths are 404, not 401

#![cfg(feature = "native")]

use std::sync::{Arc, RwLock};
use warp::test::request;
use zpool_agent::routes::routes;
use zpool_agent::zfs_management::ZfsManager;

const KEY: &str = "test-key";

fn api() -> impl warp::Filter<Extract = (impl warp::Reply,), Error = std::convert::Infallible> + Clone
{
    routes(ZfsManager::new(), KEY.to_string(), Arc::new(RwLock::new(None)))
}

#[tokio::test]
async fn test_missing_key_is_rejected() {
    let resp = request().method("GET").path("/pools/tank").reply(&api()).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_wrong_key_is_rejected() {
    let resp = request()
        .method("POST")
        .path("/pools/tank/export")
        .header("X-API-Key", "nope")
        .json(&serde_json::json!({"force": true}))
        .reply(&api())
        .await;
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let resp = request()
        .method("GET")
        .path("/datasets/tank")
        .header("X-API-Key", KEY)
        .reply(&api())
        .await;
    assert_eq!(resp.status(), 404);
}
