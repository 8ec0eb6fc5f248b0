// zfs_management/native.rs
// The native calls pool code depends on, as traits so they can be mocked

use crate::error::ErrorContext;
use libc::c_int;
use std::ffi::CStr;

/// A native layer that can take back a reference it handed out.
pub trait ReleaseNative {
    /// Opaque reference, meaningful only to this layer.
    type Raw: Copy;

    fn release(&self, raw: Self::Raw);
}

/// The libzfs pool calls used by [`super::ZfsPool`].
///
/// Methods mirror the C functions one to one and keep their failure
/// sentinels: `None` for a null return, non-zero `c_int` for a failed call.
/// Turning sentinels into errors is left to the caller, which must read
/// [`ZpoolNative::last_error`] before issuing any other call.
pub trait ZpoolNative: ReleaseNative {
    /// `zpool_open_canfail`
    fn open_pool(&self, name: &CStr) -> Option<Self::Raw>;

    /// `zpool_get_name`
    fn pool_name(&self, pool: Self::Raw) -> String;

    /// `zpool_get_prop`; `literal` asks for exact numbers instead of "1.2G".
    fn pool_prop(&self, pool: Self::Raw, code: c_int, literal: bool) -> Option<String>;

    /// `zpool_get_status`, returning the raw `zpool_status_t`.
    fn pool_status(&self, pool: Self::Raw) -> c_int;

    /// `zpool_disable_datasets`
    fn disable_datasets(&self, pool: Self::Raw, force: bool) -> c_int;

    /// `zpool_export`
    fn export(&self, pool: Self::Raw, force: bool) -> c_int;

    /// `zpool_export_force`
    fn export_force(&self, pool: Self::Raw) -> c_int;

    /// Current diagnostic state of the library instance.
    fn last_error(&self) -> ErrorContext;
}
