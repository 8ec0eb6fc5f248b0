// handlers/pools.rs
// Pool handlers: report, property, export

use crate::models::{
    ActionResponse, ExportPoolRequest, PoolPropertyResponse, PoolReportResponse, PropertyQuery,
};
use crate::utils::{success_response, zfs_error_response};
use crate::zfs_management::{PoolProperty, ZfsManager, ZPOOL_PROPERTIES};
use warp::{Rejection, Reply};

/// GET /pools/{name}
pub async fn get_pool_handler(name: String, zfs: ZfsManager) -> Result<impl Reply, Rejection> {
    match zfs.pool_report(&name).await {
        Ok(report) => Ok(success_response(PoolReportResponse::from(report))),
        Err(e) => Ok(zfs_error_response(
            &format!("Failed to read pool '{}'", name),
            &e,
        )),
    }
}

/// GET /pools/{name}/properties/{property}
pub async fn get_pool_property_handler(
    name: String,
    property: String,
    query: PropertyQuery,
    zfs: ZfsManager,
) -> Result<impl Reply, Rejection> {
    let prop: PoolProperty = match property.parse() {
        Ok(prop) => prop,
        Err(e) => return Ok(zfs_error_response("Invalid property", &e)),
    };

    match zfs.pool_property(&name, prop, query.literal).await {
        Ok(value) => Ok(success_response(PoolPropertyResponse {
            status: "success".to_string(),
            pool: name,
            property: prop.name().to_string(),
            value,
            code: ZPOOL_PROPERTIES.code(prop).unwrap_or(-1),
        })),
        Err(e) => Ok(zfs_error_response(
            &format!("Failed to read property '{}' of pool '{}'", prop, name),
            &e,
        )),
    }
}

/// POST /pools/{name}/export
pub async fn export_pool_handler(
    name: String,
    body: ExportPoolRequest,
    zfs: ZfsManager,
) -> Result<impl Reply, Rejection> {
    match zfs.export_pool(&name, body.into()).await {
        Ok(()) => Ok(success_response(ActionResponse {
            status: "success".to_string(),
            message: format!("Pool '{}' exported successfully", name),
        })),
        Err(e) => Ok(zfs_error_response("Failed to export pool", &e)),
    }
}
