// zfs_management/handle.rs
// Ownership of a single native reference with idempotent release

use super::native::ReleaseNative;
use crate::error::{ZfsError, ZfsResult};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Owns one reference handed out by a native layer.
///
/// The handle is `Open` until [`ManagedHandle::dispose`] releases the
/// reference, after which every [`ManagedHandle::with_handle`] fails with
/// [`ZfsError::HandleClosed`]. Disposing twice, or from several threads at
/// once, releases exactly once.
///
/// Dropping an open handle releases it as well. That is a safety net for
/// owners that forget to dispose, not the intended way to close.
pub struct ManagedHandle<'n, N: ReleaseNative + ?Sized> {
    native: &'n N,
    what: String,
    raw: Mutex<Option<N::Raw>>,
}

impl<'n, N: ReleaseNative + ?Sized> ManagedHandle<'n, N> {
    /// Run `factory` against `native` and take ownership of what it returns.
    ///
    /// `what` names the resource in errors and logs, e.g. `pool 'tank'`.
    pub fn open<F>(native: &'n N, what: impl Into<String>, factory: F) -> ZfsResult<Self>
    where
        F: FnOnce(&N) -> ZfsResult<N::Raw>,
    {
        let raw = factory(native)?;
        let what = what.into();
        debug!(handle = %what, "opened native handle");
        Ok(ManagedHandle {
            native,
            what,
            raw: Mutex::new(Some(raw)),
        })
    }

    /// Call `op` with the live reference.
    ///
    /// The handle stays locked while `op` runs, so a concurrent `dispose`
    /// waits for it instead of freeing the reference underneath it. `op`
    /// must not call back into this handle; the lock is not reentrant.
    pub fn with_handle<R>(&self, op: impl FnOnce(N::Raw) -> R) -> ZfsResult<R> {
        let guard = self.lock();
        match *guard {
            Some(raw) => Ok(op(raw)),
            None => Err(ZfsError::HandleClosed {
                what: self.what.clone(),
            }),
        }
    }

    /// Release the reference if still open. No-op otherwise.
    pub fn dispose(&self) {
        let mut guard = self.lock();
        if let Some(raw) = guard.take() {
            self.native.release(raw);
            debug!(handle = %self.what, "released native handle");
        }
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    pub fn what(&self) -> &str {
        &self.what
    }

    // A panic inside `op` must not leave the handle unreleasable.
    fn lock(&self) -> MutexGuard<'_, Option<N::Raw>> {
        self.raw.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<N: ReleaseNative + ?Sized> Drop for ManagedHandle<'_, N> {
    fn drop(&mut self) {
        let slot = self.raw.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(raw) = slot.take() {
            debug!(handle = %self.what, "handle dropped while open, releasing");
            self.native.release(raw);
        }
    }
}
