// zfs_management/pools.rs
// An open pool: properties, sizes, status, export

use super::handle::ManagedHandle;
use super::native::ZpoolNative;
use super::properties::{PoolProperty, ZPOOL_PROPERTIES};
use super::size::decode_size;
use super::status::ZpoolStatus;
use crate::error::{ZfsError, ZfsResult};
use libc::c_int;
use std::ffi::CString;
use tracing::{debug, info};

/// A pool opened through libzfs.
///
/// The pool handle is released by [`ZfsPool::dispose`] or, failing that,
/// when the value is dropped.
pub struct ZfsPool<'n, N: ZpoolNative + ?Sized> {
    native: &'n N,
    handle: ManagedHandle<'n, N>,
    name: String,
}

impl<'n, N: ZpoolNative + ?Sized> ZfsPool<'n, N> {
    /// Open the pool called `name`.
    pub fn open(native: &'n N, name: &str) -> ZfsResult<Self> {
        let c_name = CString::new(name).map_err(|_| ZfsError::InvalidName {
            name: name.to_string(),
        })?;

        let handle = ManagedHandle::open(native, format!("pool '{}'", name), |n| {
            n.open_pool(&c_name).ok_or_else(|| {
                let err = ZfsError::native(format!("open pool '{}'", name), n.last_error());
                debug!(pool = name, error = %err, "zpool_open_canfail failed");
                err
            })
        })?;

        let name = handle.with_handle(|zhp| native.pool_name(zhp))?;
        Ok(ZfsPool {
            native,
            handle,
            name,
        })
    }

    /// Name as libzfs reports it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A property as libzfs formats it for display ("1.2G", "ONLINE").
    pub fn property(&self, prop: PoolProperty) -> ZfsResult<String> {
        self.read_property(prop, false)
    }

    /// A property with exact numeric values ("1288490188").
    pub fn literal_property(&self, prop: PoolProperty) -> ZfsResult<String> {
        self.read_property(prop, true)
    }

    /// Total size of the pool in bytes.
    ///
    /// libzfs reports sizes as strings like "1.2G", so the precision of
    /// this value is limited.
    pub fn size(&self) -> ZfsResult<u64> {
        decode_size(&self.property(PoolProperty::Size)?)
    }

    /// Remaining free space in bytes, with the same precision limits as
    /// [`ZfsPool::size`].
    pub fn available_size(&self) -> ZfsResult<u64> {
        decode_size(&self.property(PoolProperty::Free)?)
    }

    /// Allocated space in bytes, with the same precision limits as
    /// [`ZfsPool::size`].
    pub fn used_size(&self) -> ZfsResult<u64> {
        decode_size(&self.property(PoolProperty::Allocated)?)
    }

    pub fn status(&self) -> ZfsResult<ZpoolStatus> {
        let code = self
            .handle
            .with_handle(|zhp| self.native.pool_status(zhp))?;
        Ok(ZpoolStatus::from_code(code))
    }

    /// Unmount and unshare every dataset in the pool.
    ///
    /// `force` goes to libzfs unchanged.
    pub fn disable_datasets(&self, force: bool) -> ZfsResult<()> {
        self.call("disable datasets", |n, zhp| n.disable_datasets(zhp, force))
    }

    /// `zpool export`: disable datasets, then export. With `hard_force`
    /// the export is forced regardless of `force`.
    pub fn export(&self, force: bool, hard_force: bool) -> ZfsResult<()> {
        self.disable_datasets(force)?;
        if hard_force {
            self.call("force export", |n, zhp| n.export_force(zhp))?;
        } else {
            self.call("export", |n, zhp| n.export(zhp, force))?;
        }
        info!(pool = %self.name, force, hard_force, "pool exported");
        Ok(())
    }

    /// Close the pool handle. Calling it again does nothing.
    pub fn dispose(&self) {
        self.handle.dispose();
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_open()
    }

    fn read_property(&self, prop: PoolProperty, literal: bool) -> ZfsResult<String> {
        let code = ZPOOL_PROPERTIES
            .code(prop)
            .ok_or(ZfsError::UnsupportedProperty {
                property: prop.name(),
                abi: ZPOOL_PROPERTIES.abi(),
            })?;

        self.handle.with_handle(|zhp| {
            self.native.pool_prop(zhp, code, literal).ok_or_else(|| {
                ZfsError::native(
                    format!("get property '{}' of pool '{}'", prop, self.name),
                    self.native.last_error(),
                )
            })
        })?
    }

    /// Run a native call that returns 0 on success, capturing the library's
    /// error state before the handle is unlocked.
    fn call<F>(&self, operation: &str, f: F) -> ZfsResult<()>
    where
        F: FnOnce(&N, N::Raw) -> c_int,
    {
        self.handle.with_handle(|zhp| {
            if f(self.native, zhp) == 0 {
                Ok(())
            } else {
                let err = ZfsError::native(
                    format!("{} of pool '{}'", operation, self.name),
                    self.native.last_error(),
                );
                debug!(pool = %self.name, error = %err, "native call failed");
                Err(err)
            }
        })?
    }
}
