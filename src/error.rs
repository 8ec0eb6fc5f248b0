//! Error types for pool operations.

use std::fmt;

use libc::c_int;
use thiserror::Error;

/// Result type alias for pool operations.
pub type ZfsResult<T> = Result<T, ZfsError>;

/// Why a formatted size string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeFault {
    /// The part before the suffix is not `digits[.,digits]`.
    NotNumeric,
    /// The suffix is not one of K, M, G, T, P.
    IllegalSymbol,
    /// The value does not fit in 64 bits.
    OutOfRange,
}

impl fmt::Display for SizeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeFault::NotNumeric => f.write_str("is neither numeric nor decimal"),
            SizeFault::IllegalSymbol => f.write_str("contains illegal symbols"),
            SizeFault::OutOfRange => f.write_str("exceeds the representable byte range"),
        }
    }
}

/// Diagnostic state of a libzfs instance, read right after a failing call.
///
/// libzfs keeps its last error inside the library handle and any later call
/// may overwrite it, so this is captured before anything else touches the
/// handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// `libzfs_errno()` (an `EZFS_*` value) or an OS errno when no library
    /// handle exists yet.
    pub code: c_int,
    pub description: String,
    pub action: String,
}

impl ErrorContext {
    pub fn new(code: c_int, description: impl Into<String>, action: impl Into<String>) -> Self {
        ErrorContext {
            code,
            description: description.into(),
            action: action.into(),
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "no diagnostic available (code {})", self.code)?;
        } else {
            write!(f, "{} (code {})", self.description, self.code)?;
        }
        if !self.action.is_empty() {
            write!(f, "; {}", self.action)?;
        }
        Ok(())
    }
}

/// Error variants for pool operations.
#[derive(Debug, Error)]
pub enum ZfsError {
    /// A size string reported by libzfs did not match the size grammar.
    #[error("formatted size string \"{input}\" {reason}")]
    InvalidFormat { input: String, reason: SizeFault },

    /// A native call returned its failure sentinel.
    #[error("{operation} failed: {context}")]
    NativeOperationFailed {
        operation: String,
        context: ErrorContext,
    },

    /// An operation was attempted on a disposed handle.
    #[error("{what} handle is closed")]
    HandleClosed { what: String },

    /// A name cannot cross the FFI boundary (interior NUL byte).
    #[error("invalid name '{name}': contains null byte")]
    InvalidName { name: String },

    /// No property with this name in the table.
    #[error("unknown property '{name}'")]
    UnknownProperty { name: String },

    /// The property table for this ABI has no native code for the property.
    #[error("property '{property}' has no native code in the {abi} table")]
    UnsupportedProperty {
        property: &'static str,
        abi: &'static str,
    },

    /// A blocking pool task panicked or was cancelled.
    #[error("pool task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

impl ZfsError {
    pub(crate) fn invalid_format(input: &str, reason: SizeFault) -> Self {
        ZfsError::InvalidFormat {
            input: input.to_string(),
            reason,
        }
    }

    pub(crate) fn native(operation: impl Into<String>, context: ErrorContext) -> Self {
        ZfsError::NativeOperationFailed {
            operation: operation.into(),
            context,
        }
    }

    /// True when the caller sent something unusable, as opposed to the
    /// native layer failing. Size strings only ever come from libzfs, so an
    /// undecodable one is a server-side failure.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ZfsError::InvalidName { .. } | ZfsError::UnknownProperty { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_message_names_input() {
        let err = ZfsError::invalid_format("5Q", SizeFault::IllegalSymbol);
        assert_eq!(
            err.to_string(),
            "formatted size string \"5Q\" contains illegal symbols"
        );
    }

    #[test]
    fn test_native_failure_message_includes_context() {
        let err = ZfsError::native(
            "export pool 'tank'",
            ErrorContext::new(2009, "pool is busy", "unmount datasets first"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("export pool 'tank' failed"));
        assert!(msg.contains("pool is busy (code 2009)"));
        assert!(msg.contains("unmount datasets first"));
    }

    #[test]
    fn test_empty_context_still_reports_code() {
        let ctx = ErrorContext::new(12, "", "");
        assert_eq!(ctx.to_string(), "no diagnostic available (code 12)");
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(!ZfsError::invalid_format("x", SizeFault::NotNumeric).is_caller_error());
        assert!(ZfsError::InvalidName { name: "a\0b".into() }.is_caller_error());
        assert!(ZfsError::UnknownProperty { name: "bogus".into() }.is_caller_error());
        assert!(!ZfsError::HandleClosed { what: "pool 'tank'".into() }.is_caller_error());
    }
}
