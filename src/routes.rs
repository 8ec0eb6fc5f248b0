//-----------------------------------------------------
// ROUTES
//-----------------------------------------------------

use crate::auth::{check_api_key, ApiKeyError};
use crate::handlers::*;
use crate::models::{LastAction, PropertyQuery};
use crate::utils::{error_response, with_action_tracking};
use crate::zfs_management::ZfsManager;
use std::convert::Infallible;
use std::sync::{Arc, RwLock};
use warp::filters::body::BodyDeserializeError;
use warp::reject::InvalidQuery;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

/// Full route table. Everything except /health requires the API key.
pub fn routes(
    zfs: ZfsManager,
    api_key: String,
    last_action: Arc<RwLock<Option<LastAction>>>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let zfs = warp::any().map(move || zfs.clone());

    // API key check filter - reusable middleware for authentication
    let api_key_check = warp::header::headers_cloned()
        .and(warp::any().map(move || api_key.clone()))
        .and_then(check_api_key)
        .untuple_one();

    // GET /health - Health check endpoint
    let health = {
        let last_action = last_action.clone();
        warp::get()
            .and(warp::path("health"))
            .and(warp::path::end())
            .and(warp::any().map(move || last_action.clone()))
            .and_then(health_check_handler)
    };

    // GET /pools/{name} - Status and space usage
    let report = warp::get()
        .and(warp::path!("pools" / String))
        .and(api_key_check.clone())
        .and(with_action_tracking("get_pool", last_action.clone()))
        .and(zfs.clone())
        .and_then(get_pool_handler);

    // GET /pools/{name}/properties/{property}?literal=true
    let property = warp::get()
        .and(warp::path!("pools" / String / "properties" / String))
        .and(api_key_check.clone())
        .and(warp::query::<PropertyQuery>())
        .and(with_action_tracking("get_pool_property", last_action.clone()))
        .and(zfs.clone())
        .and_then(get_pool_property_handler);

    // POST /pools/{name}/export - {"force": bool, "hard_force": bool}
    let export = warp::post()
        .and(warp::path!("pools" / String / "export"))
        .and(api_key_check)
        .and(warp::body::json())
        .and(with_action_tracking("export_pool", last_action))
        .and(zfs)
        .and_then(export_pool_handler);

    health
        .or(report)
        .or(property)
        .or(export)
        .recover(handle_rejection)
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let reply = if err.find::<ApiKeyError>().is_some() {
        error_response(StatusCode::UNAUTHORIZED, "Invalid or missing API key")
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        error_response(StatusCode::BAD_REQUEST, &e.to_string())
    } else if let Some(e) = err.find::<InvalidQuery>() {
        error_response(StatusCode::BAD_REQUEST, &e.to_string())
    } else if err.is_not_found() {
        error_response(StatusCode::NOT_FOUND, "Not found")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Unhandled rejection")
    };
    Ok(reply)
}
