// zfs_management/mod.rs
// Pool handles, size decoding and the libzfs binding

#[cfg(feature = "native")]
mod ffi;
mod handle;
#[cfg(feature = "native")]
mod manager;
mod native;
mod pools;
mod properties;
mod size;
mod status;
mod types;


#[cfg(feature = "native")]
pub use ffi::{zpool_handle_t, Libzfs};
pub use handle::ManagedHandle;
#[cfg(feature = "native")]
pub use manager::ZfsManager;
pub use native::{ReleaseNative, ZpoolNative};
pub use pools::ZfsPool;
pub use properties::{
    DatasetProperty, PoolProperty, PropertyEntry, PropertyTable, ZFS_PROPERTIES,
    ZPOOL_PROPERTIES,
};
pub use size::decode_size;
pub use status::ZpoolStatus;
pub use types::{ExportOptions, PoolReport};
