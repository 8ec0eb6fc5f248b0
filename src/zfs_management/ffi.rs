// zfs_management/ffi.rs
// FFI declarations and the libzfs library handle

use super::native::{ReleaseNative, ZpoolNative};
use crate::error::{ErrorContext, ZfsError, ZfsResult};
use libc::{c_char, c_int, size_t};
use libzfs_sys::{libzfs_error_description, libzfs_fini, libzfs_handle_t, libzfs_init};
use std::ffi::CStr;
use std::ptr::{self, NonNull};
use tracing::debug;

// ============================================================================
// FFI Declarations
// ============================================================================
// libzfs_init/fini and libzfs_error_description come from libzfs-sys. The
// pool functions are declared here so the handle type and signatures match
// OpenZFS 2.x exactly.

/// Opaque handle to a ZFS pool (libzfs)
#[allow(non_camel_case_types)]
#[repr(C)]
pub struct zpool_handle_t {
    _private: [u8; 0],
}

/// `ZPOOL_MAXPROPLEN` (MAXPATHLEN)
pub const ZPOOL_MAXPROPLEN: usize = 4096;

const B_FALSE: c_int = 0;
const B_TRUE: c_int = 1;

fn boolean_t(value: bool) -> c_int {
    if value {
        B_TRUE
    } else {
        B_FALSE
    }
}

#[link(name = "zfs")]
extern "C" {
    /// ```c
    /// int libzfs_errno(libzfs_handle_t *);
    /// ```
    fn libzfs_errno(hdl: *mut libzfs_handle_t) -> c_int;

    /// ```c
    /// const char *libzfs_error_action(libzfs_handle_t *);
    /// ```
    fn libzfs_error_action(hdl: *mut libzfs_handle_t) -> *const c_char;

    /// Open a pool by name, returning NULL on failure (no error printed)
    /// ```c
    /// zpool_handle_t *zpool_open_canfail(libzfs_handle_t *, const char *);
    /// ```
    fn zpool_open_canfail(hdl: *mut libzfs_handle_t, name: *const c_char)
        -> *mut zpool_handle_t;

    /// ```c
    /// void zpool_close(zpool_handle_t *);
    /// ```
    fn zpool_close(zhp: *mut zpool_handle_t);

    /// ```c
    /// const char *zpool_get_name(zpool_handle_t *);
    /// ```
    fn zpool_get_name(zhp: *mut zpool_handle_t) -> *const c_char;

    /// ```c
    /// int zpool_get_prop(zpool_handle_t *zhp, zpool_prop_t prop, char *buf,
    ///     size_t len, zprop_source_t *srctype, boolean_t literal);
    /// ```
    fn zpool_get_prop(
        zhp: *mut zpool_handle_t,
        prop: c_int,
        buf: *mut c_char,
        len: size_t,
        srctype: *mut c_int,
        literal: c_int,
    ) -> c_int;

    /// ```c
    /// zpool_status_t zpool_get_status(zpool_handle_t *, const char **msgid,
    ///     zpool_errata_t *);
    /// ```
    fn zpool_get_status(
        zhp: *mut zpool_handle_t,
        msgid: *mut *const c_char,
        errata: *mut c_int,
    ) -> c_int;

    /// Unmount and unshare every dataset in the pool
    /// ```c
    /// int zpool_disable_datasets(zpool_handle_t *, boolean_t);
    /// ```
    fn zpool_disable_datasets(zhp: *mut zpool_handle_t, force: c_int) -> c_int;

    /// ```c
    /// int zpool_export(zpool_handle_t *, boolean_t, const char *);
    /// ```
    fn zpool_export(zhp: *mut zpool_handle_t, force: c_int, log_str: *const c_char) -> c_int;

    /// ```c
    /// int zpool_export_force(zpool_handle_t *, const char *);
    /// ```
    fn zpool_export_force(zhp: *mut zpool_handle_t, log_str: *const c_char) -> c_int;
}

/// Copy a C string owned by libzfs, treating NULL as empty.
///
/// # Safety
/// `ptr` must be NULL or point to a NUL-terminated string.
unsafe fn owned_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

// ============================================================================
// Library handle
// ============================================================================

/// One libzfs instance - calls libzfs_fini() on drop
///
/// The instance carries its own last-error state, so it is kept on one
/// thread (the raw pointer makes it `!Send`).
pub struct Libzfs {
    hdl: NonNull<libzfs_handle_t>,
}

impl Libzfs {
    pub fn init() -> ZfsResult<Self> {
        let hdl = unsafe { libzfs_init() };
        match NonNull::new(hdl) {
            Some(hdl) => Ok(Libzfs { hdl }),
            None => {
                let os = std::io::Error::last_os_error();
                Err(ZfsError::native(
                    "libzfs_init",
                    ErrorContext::new(
                        os.raw_os_error().unwrap_or(0),
                        os.to_string(),
                        "check that the zfs kernel module is loaded",
                    ),
                ))
            }
        }
    }

    fn raw(&self) -> *mut libzfs_handle_t {
        self.hdl.as_ptr()
    }
}

impl Drop for Libzfs {
    fn drop(&mut self) {
        unsafe { libzfs_fini(self.raw()) }
    }
}

impl ReleaseNative for Libzfs {
    type Raw = *mut zpool_handle_t;

    fn release(&self, raw: Self::Raw) {
        debug!("zpool_close");
        unsafe { zpool_close(raw) }
    }
}

impl ZpoolNative for Libzfs {
    fn open_pool(&self, name: &CStr) -> Option<Self::Raw> {
        let zhp = unsafe { zpool_open_canfail(self.raw(), name.as_ptr()) };
        (!zhp.is_null()).then_some(zhp)
    }

    fn pool_name(&self, pool: Self::Raw) -> String {
        unsafe { owned_string(zpool_get_name(pool)) }
    }

    fn pool_prop(&self, pool: Self::Raw, code: c_int, literal: bool) -> Option<String> {
        let mut buf: Vec<c_char> = vec![0; ZPOOL_MAXPROPLEN];
        let ret = unsafe {
            zpool_get_prop(
                pool,
                code,
                buf.as_mut_ptr(),
                buf.len(),
                ptr::null_mut(),
                boolean_t(literal),
            )
        };
        if ret != 0 {
            return None;
        }
        Some(unsafe { owned_string(buf.as_ptr()) })
    }

    fn pool_status(&self, pool: Self::Raw) -> c_int {
        let mut msgid: *const c_char = ptr::null();
        let mut errata: c_int = 0;
        unsafe { zpool_get_status(pool, &mut msgid, &mut errata) }
    }

    fn disable_datasets(&self, pool: Self::Raw, force: bool) -> c_int {
        unsafe { zpool_disable_datasets(pool, boolean_t(force)) }
    }

    fn export(&self, pool: Self::Raw, force: bool) -> c_int {
        unsafe { zpool_export(pool, boolean_t(force), ptr::null()) }
    }

    fn export_force(&self, pool: Self::Raw) -> c_int {
        unsafe { zpool_export_force(pool, ptr::null()) }
    }

    fn last_error(&self) -> ErrorContext {
        unsafe {
            ErrorContext::new(
                libzfs_errno(self.raw()),
                owned_string(libzfs_error_description(self.raw())),
                owned_string(libzfs_error_action(self.raw())),
            )
        }
    }
}
