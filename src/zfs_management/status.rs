// zfs_management/status.rs
// zpool_status_t mapping

use libc::c_int;
use serde::{Serialize, Serializer};
use std::fmt;

/// Pool condition as reported by `zpool_get_status()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZpoolStatus {
    CorruptCache,
    MissingDevReplicated,
    MissingDevNonReplicated,
    CorruptLabelReplicated,
    CorruptLabelNonReplicated,
    BadGuidSum,
    CorruptPool,
    CorruptData,
    FailingDev,
    VersionNewer,
    HostidMismatch,
    HostidActive,
    HostidRequired,
    IoFailureWait,
    IoFailureContinue,
    IoFailureMmp,
    BadLog,
    Errata,
    UnsupFeatRead,
    UnsupFeatWrite,
    FaultedDevReplicated,
    FaultedDevNonReplicated,
    VersionOlder,
    FeatDisabled,
    Resilvering,
    OfflineDev,
    RemovedDev,
    Rebuilding,
    RebuildScrub,
    NonNativeAshift,
    CompatibilityErr,
    IncompatibleFeat,
    Ok,
    /// A code this table does not know about.
    Unknown(c_int),
}

/// Native codes for the OpenZFS 2.1 `zpool_status_t`.
const STATUS_CODES: &[(c_int, ZpoolStatus, &str)] = &[
    (0, ZpoolStatus::CorruptCache, "corrupt_cache"),
    (1, ZpoolStatus::MissingDevReplicated, "missing_dev_r"),
    (2, ZpoolStatus::MissingDevNonReplicated, "missing_dev_nr"),
    (3, ZpoolStatus::CorruptLabelReplicated, "corrupt_label_r"),
    (4, ZpoolStatus::CorruptLabelNonReplicated, "corrupt_label_nr"),
    (5, ZpoolStatus::BadGuidSum, "bad_guid_sum"),
    (6, ZpoolStatus::CorruptPool, "corrupt_pool"),
    (7, ZpoolStatus::CorruptData, "corrupt_data"),
    (8, ZpoolStatus::FailingDev, "failing_dev"),
    (9, ZpoolStatus::VersionNewer, "version_newer"),
    (10, ZpoolStatus::HostidMismatch, "hostid_mismatch"),
    (11, ZpoolStatus::HostidActive, "hostid_active"),
    (12, ZpoolStatus::HostidRequired, "hostid_required"),
    (13, ZpoolStatus::IoFailureWait, "io_failure_wait"),
    (14, ZpoolStatus::IoFailureContinue, "io_failure_continue"),
    (15, ZpoolStatus::IoFailureMmp, "io_failure_mmp"),
    (16, ZpoolStatus::BadLog, "bad_log"),
    (17, ZpoolStatus::Errata, "errata"),
    (18, ZpoolStatus::UnsupFeatRead, "unsup_feat_read"),
    (19, ZpoolStatus::UnsupFeatWrite, "unsup_feat_write"),
    (20, ZpoolStatus::FaultedDevReplicated, "faulted_dev_r"),
    (21, ZpoolStatus::FaultedDevNonReplicated, "faulted_dev_nr"),
    (22, ZpoolStatus::VersionOlder, "version_older"),
    (23, ZpoolStatus::FeatDisabled, "feat_disabled"),
    (24, ZpoolStatus::Resilvering, "resilvering"),
    (25, ZpoolStatus::OfflineDev, "offline_dev"),
    (26, ZpoolStatus::RemovedDev, "removed_dev"),
    (27, ZpoolStatus::Rebuilding, "rebuilding"),
    (28, ZpoolStatus::RebuildScrub, "rebuild_scrub"),
    (29, ZpoolStatus::NonNativeAshift, "non_native_ashift"),
    (30, ZpoolStatus::CompatibilityErr, "compatibility_err"),
    (31, ZpoolStatus::IncompatibleFeat, "incompatible_feat"),
    (32, ZpoolStatus::Ok, "ok"),
];

impl ZpoolStatus {
    pub fn from_code(code: c_int) -> Self {
        STATUS_CODES
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, status, _)| *status)
            .unwrap_or(ZpoolStatus::Unknown(code))
    }

    pub fn code(self) -> c_int {
        match self {
            ZpoolStatus::Unknown(code) => code,
            known => STATUS_CODES
                .iter()
                .find(|(_, s, _)| *s == known)
                .map(|(c, _, _)| *c)
                .unwrap_or(-1),
        }
    }

    pub fn name(self) -> &'static str {
        STATUS_CODES
            .iter()
            .find(|(_, s, _)| *s == self)
            .map(|(_, _, name)| *name)
            .unwrap_or("unknown")
    }

    /// No action is needed on the pool. Older on-disk versions and disabled
    /// features still count as usable; errata do not.
    pub fn is_healthy(self) -> bool {
        matches!(
            self,
            ZpoolStatus::Ok | ZpoolStatus::VersionOlder | ZpoolStatus::FeatDisabled
        )
    }
}

impl fmt::Display for ZpoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZpoolStatus::Unknown(code) => write!(f, "unknown({})", code),
            known => f.write_str(known.name()),
        }
    }
}

impl Serialize for ZpoolStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_code_round_trips() {
        for (code, status, _) in STATUS_CODES {
            assert_eq!(ZpoolStatus::from_code(*code), *status);
            assert_eq!(status.code(), *code);
        }
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let status = ZpoolStatus::from_code(99);
        assert_eq!(status, ZpoolStatus::Unknown(99));
        assert_eq!(status.code(), 99);
        assert_eq!(status.to_string(), "unknown(99)");
    }

    #[test]
    fn test_health_classification() {
        assert!(ZpoolStatus::Ok.is_healthy());
        assert!(ZpoolStatus::VersionOlder.is_healthy());
        assert!(ZpoolStatus::FeatDisabled.is_healthy());
        assert!(!ZpoolStatus::Errata.is_healthy());
        assert!(!ZpoolStatus::Resilvering.is_healthy());
        assert!(!ZpoolStatus::Unknown(77).is_healthy());
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&ZpoolStatus::MissingDevReplicated).unwrap();
        assert_eq!(json, "\"missing_dev_r\"");
    }
}
