// zfs_management/types.rs
// Public types for pool operations

use super::native::ZpoolNative;
use super::pools::ZfsPool;
use super::status::ZpoolStatus;
use crate::error::ZfsResult;

/// Snapshot of a pool's condition and space usage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReport {
    pub name: String,
    pub status: ZpoolStatus,
    /// Sizes in bytes, decoded from libzfs's formatted values
    pub size: u64,
    pub free: u64,
    pub allocated: u64,
}

impl PoolReport {
    pub fn collect<N: ZpoolNative + ?Sized>(pool: &ZfsPool<'_, N>) -> ZfsResult<Self> {
        Ok(PoolReport {
            name: pool.name().to_string(),
            status: pool.status()?,
            size: pool.size()?,
            free: pool.available_size()?,
            allocated: pool.used_size()?,
        })
    }
}

/// Export behaviour requested by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Passed to the dataset-disable step and to a plain export
    pub force: bool,
    /// Use `zpool_export_force` instead of `zpool_export`
    pub hard_force: bool,
}
