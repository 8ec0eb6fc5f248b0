//! Pool management over libzfs.
//!
//! The library side wraps libzfs pool handles ([`zfs_management::ZfsPool`]),
//! decodes the sizes libzfs formats for display
//! ([`zfs_management::decode_size`]) and maps property and status codes
//! through explicit tables. The agent side serves a few of these operations
//! over HTTP.
//!
//! Building without the default `native` feature drops the libzfs binding
//! and the HTTP routes; the decoder, handle and pool logic remain usable
//! against any [`zfs_management::ZpoolNative`] implementation.

pub mod auth;
pub mod error;
pub mod models;
pub mod settings;
pub mod utils;
pub mod zfs_management;

#[cfg(feature = "native")]
pub mod handlers;
#[cfg(feature = "native")]
pub mod routes;

pub use error::{ErrorContext, SizeFault, ZfsError, ZfsResult};
