// zfs_management/manager.rs
// ZfsManager: async entry points over the blocking libzfs calls

use super::ffi::Libzfs;
use super::pools::ZfsPool;
use super::properties::PoolProperty;
use super::types::{ExportOptions, PoolReport};
use crate::error::ZfsResult;
use tokio::task;

/// Main pool management interface.
///
/// Every call opens its own libzfs instance on the blocking thread pool.
/// libzfs keeps error state per instance, so instances are never shared
/// between requests.
#[derive(Clone, Default)]
pub struct ZfsManager;

impl ZfsManager {
    pub fn new() -> Self {
        ZfsManager
    }

    /// Status and space usage of one pool
    pub async fn pool_report(&self, name: &str) -> ZfsResult<PoolReport> {
        let name = name.to_string();
        Self::with_pool(name, |pool| PoolReport::collect(pool)).await
    }

    /// Read one pool property, formatted or literal
    pub async fn pool_property(
        &self,
        name: &str,
        prop: PoolProperty,
        literal: bool,
    ) -> ZfsResult<String> {
        Self::with_pool(name.to_string(), move |pool| {
            if literal {
                pool.literal_property(prop)
            } else {
                pool.property(prop)
            }
        })
        .await
    }

    /// Export a pool from the system
    pub async fn export_pool(&self, name: &str, options: ExportOptions) -> ZfsResult<()> {
        Self::with_pool(name.to_string(), move |pool| {
            pool.export(options.force, options.hard_force)
        })
        .await
    }

    /// Open `name` on a blocking thread, run `op`, close the pool again.
    async fn with_pool<T, F>(name: String, op: F) -> ZfsResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&ZfsPool<'_, Libzfs>) -> ZfsResult<T> + Send + 'static,
    {
        task::spawn_blocking(move || {
            let libzfs = Libzfs::init()?;
            let pool = ZfsPool::open(&libzfs, &name)?;
            let result = op(&pool);
            pool.dispose();
            result
        })
        .await?
    }
}
