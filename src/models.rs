use crate::zfs_management::{ExportOptions, PoolReport, ZpoolStatus};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastAction {
    pub function: String,
    pub timestamp: u64,
}

impl LastAction {
    pub fn new(function: String) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self { function, timestamp }
    }
}

// Response structures
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub last_action: Option<LastAction>,
}

#[derive(Debug, Serialize)]
pub struct PoolReportResponse {
    pub status: String,
    pub name: String,
    pub health: ZpoolStatus,
    pub healthy: bool,
    pub size: u64,
    pub free: u64,
    pub allocated: u64,
}

impl From<PoolReport> for PoolReportResponse {
    fn from(report: PoolReport) -> Self {
        PoolReportResponse {
            status: "success".to_string(),
            name: report.name,
            health: report.status,
            healthy: report.status.is_healthy(),
            size: report.size,
            free: report.free,
            allocated: report.allocated,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PoolPropertyResponse {
    pub status: String,
    pub pool: String,
    pub property: String,
    pub value: String,
    pub code: i32,
}

// Request structures
#[derive(Debug, Default, Deserialize)]
pub struct ExportPoolRequest {
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub hard_force: bool,
}

impl From<ExportPoolRequest> for ExportOptions {
    fn from(req: ExportPoolRequest) -> Self {
        ExportOptions {
            force: req.force,
            hard_force: req.hard_force,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PropertyQuery {
    #[serde(default)]
    pub literal: bool,
}
