//-----------------------------------------------------
// HELPER FUNCTIONS
//-----------------------------------------------------

use crate::error::ZfsError;
use crate::models::{ActionResponse, LastAction};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::{Arc, RwLock};
use tracing::warn;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};
use warp::Filter;

pub fn success_response<T: Serialize>(body: T) -> WithStatus<Json> {
    warp::reply::with_status(warp::reply::json(&body), StatusCode::OK)
}

pub fn error_response(status: StatusCode, message: &str) -> WithStatus<Json> {
    warp::reply::with_status(
        warp::reply::json(&ActionResponse {
            status: "error".to_string(),
            message: message.to_string(),
        }),
        status,
    )
}

/// Error reply for a failed pool operation: 400 for caller mistakes, 500
/// when libzfs or the handle failed.
pub fn zfs_error_response(context: &str, err: &ZfsError) -> WithStatus<Json> {
    let status = if err.is_caller_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    warn!(error = %err, "{}", context);
    error_response(status, &format!("{}: {}", context, err))
}

// Create a middleware filter that tracks actions
pub fn with_action_tracking(
    action_name: &'static str,
    action_tracker: Arc<RwLock<Option<LastAction>>>,
) -> impl Filter<Extract = (), Error = Infallible> + Clone {
    warp::any()
        .map(move || {
            if let Ok(mut last_action) = action_tracker.write() {
                *last_action = Some(LastAction::new(action_name.to_string()));
            }
        })
        .untuple_one()
}

