// zfs_management/properties.rs
// Property name <-> native code tables
//
// Codes are written out per entry and never derived from declaration order.
// A new libzfs release that renumbers zpool_prop_t/zfs_prop_t gets a new
// table with its own ABI tag; existing entries do not move.

use crate::error::ZfsError;
use libc::c_int;
use std::fmt;
use std::str::FromStr;

/// One row of a property table.
#[derive(Debug, Clone, Copy)]
pub struct PropertyEntry<P> {
    pub property: P,
    /// Name as `zpool get`/`zfs get` prints it.
    pub name: &'static str,
    /// Native enum value for this ABI.
    pub code: c_int,
}

/// Mapping between symbolic properties and the codes one libzfs ABI uses.
#[derive(Debug)]
pub struct PropertyTable<P: 'static> {
    abi: &'static str,
    entries: &'static [PropertyEntry<P>],
}

impl<P: Copy + PartialEq> PropertyTable<P> {
    pub const fn new(abi: &'static str, entries: &'static [PropertyEntry<P>]) -> Self {
        PropertyTable { abi, entries }
    }

    /// ABI revision the codes were taken from, e.g. `openzfs-2.1`.
    pub fn abi(&self) -> &'static str {
        self.abi
    }

    pub fn entries(&self) -> &'static [PropertyEntry<P>] {
        self.entries
    }

    /// Native code for `property`, if this ABI has one.
    pub fn code(&self, property: P) -> Option<c_int> {
        self.entries
            .iter()
            .find(|e| e.property == property)
            .map(|e| e.code)
    }

    pub fn by_name(&self, name: &str) -> Option<P> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .map(|e| e.property)
    }

    pub fn by_code(&self, code: c_int) -> Option<P> {
        self.entries
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.property)
    }
}

macro_rules! property_table {
    (
        $(#[$meta:meta])*
        pub enum $ty:ident in $table:ident ($abi:literal) {
            $($variant:ident = $name:literal => $code:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $ty {
            $($variant,)*
        }

        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant,)*];

            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)*
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = ZfsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $table.by_name(s).ok_or_else(|| ZfsError::UnknownProperty {
                    name: s.to_string(),
                })
            }
        }

        pub static $table: PropertyTable<$ty> = PropertyTable::new(
            $abi,
            &[$(PropertyEntry { property: $ty::$variant, name: $name, code: $code },)*],
        );
    };
}

property_table! {
    /// Pool properties (`zpool_prop_t`).
    pub enum PoolProperty in ZPOOL_PROPERTIES ("openzfs-2.1") {
        Name = "name" => 0,
        Size = "size" => 1,
        Capacity = "capacity" => 2,
        AltRoot = "altroot" => 3,
        Health = "health" => 4,
        Guid = "guid" => 5,
        Version = "version" => 6,
        BootFs = "bootfs" => 7,
        Delegation = "delegation" => 8,
        AutoReplace = "autoreplace" => 9,
        CacheFile = "cachefile" => 10,
        FailureMode = "failmode" => 11,
        ListSnapshots = "listsnapshots" => 12,
        AutoExpand = "autoexpand" => 13,
        DedupDitto = "dedupditto" => 14,
        DedupRatio = "dedupratio" => 15,
        Free = "free" => 16,
        Allocated = "allocated" => 17,
        ReadOnly = "readonly" => 18,
        Ashift = "ashift" => 19,
        Comment = "comment" => 20,
        ExpandSize = "expandsize" => 21,
        Freeing = "freeing" => 22,
        Fragmentation = "fragmentation" => 23,
        Leaked = "leaked" => 24,
        MaxBlockSize = "maxblocksize" => 25,
        TName = "tname" => 26,
        MaxDnodeSize = "maxdnodesize" => 27,
        Multihost = "multihost" => 28,
        Checkpoint = "checkpoint" => 29,
        LoadGuid = "load_guid" => 30,
        AutoTrim = "autotrim" => 31,
        Compatibility = "compatibility" => 32,
    }
}

property_table! {
    /// Dataset properties (`zfs_prop_t`).
    pub enum DatasetProperty in ZFS_PROPERTIES ("openzfs-2.1") {
        Type = "type" => 0,
        Creation = "creation" => 1,
        Used = "used" => 2,
        Available = "available" => 3,
        Referenced = "referenced" => 4,
        CompressRatio = "compressratio" => 5,
        Mounted = "mounted" => 6,
        Origin = "origin" => 7,
        Quota = "quota" => 8,
        Reservation = "reservation" => 9,
        VolSize = "volsize" => 10,
        VolBlockSize = "volblocksize" => 11,
        RecordSize = "recordsize" => 12,
        Mountpoint = "mountpoint" => 13,
        ShareNfs = "sharenfs" => 14,
        Checksum = "checksum" => 15,
        Compression = "compression" => 16,
        Atime = "atime" => 17,
        Devices = "devices" => 18,
        Exec = "exec" => 19,
        Setuid = "setuid" => 20,
        ReadOnly = "readonly" => 21,
        Zoned = "zoned" => 22,
        SnapDir = "snapdir" => 23,
        AclMode = "aclmode" => 24,
        AclInherit = "aclinherit" => 25,
        CreateTxg = "createtxg" => 26,
        Name = "name" => 27,
        CanMount = "canmount" => 28,
        IscsiOptions = "iscsioptions" => 29,
        Xattr = "xattr" => 30,
        NumClones = "numclones" => 31,
        Copies = "copies" => 32,
        Version = "version" => 33,
        Utf8Only = "utf8only" => 34,
        Normalize = "normalization" => 35,
        Case = "casesensitivity" => 36,
        Vscan = "vscan" => 37,
        Nbmand = "nbmand" => 38,
        ShareSmb = "sharesmb" => 39,
        RefQuota = "refquota" => 40,
        RefReservation = "refreservation" => 41,
        Guid = "guid" => 42,
        PrimaryCache = "primarycache" => 43,
        SecondaryCache = "secondarycache" => 44,
        UsedSnap = "usedbysnapshots" => 45,
        UsedDs = "usedbydataset" => 46,
        UsedChild = "usedbychildren" => 47,
        UsedRefReserv = "usedbyrefreservation" => 48,
        UserAccounting = "useraccounting" => 49,
        StmfShareInfo = "stmf_sbd_lu" => 50,
        DeferDestroy = "defer_destroy" => 51,
        UserRefs = "userrefs" => 52,
        LogBias = "logbias" => 53,
        Unique = "unique" => 54,
        ObjsetId = "objsetid" => 55,
        Dedup = "dedup" => 56,
        MlsLabel = "mlslabel" => 57,
        Sync = "sync" => 58,
        DnodeSize = "dnodesize" => 59,
        RefRatio = "refcompressratio" => 60,
        Written = "written" => 61,
        Clones = "clones" => 62,
        LogicalUsed = "logicalused" => 63,
        LogicalReferenced = "logicalreferenced" => 64,
        Inconsistent = "inconsistent" => 65,
        VolMode = "volmode" => 66,
        FilesystemLimit = "filesystem_limit" => 67,
        SnapshotLimit = "snapshot_limit" => 68,
        FilesystemCount = "filesystem_count" => 69,
        SnapshotCount = "snapshot_count" => 70,
        SnapDev = "snapdev" => 71,
        AclType = "acltype" => 72,
        SelinuxContext = "context" => 73,
        SelinuxFsContext = "fscontext" => 74,
        SelinuxDefContext = "defcontext" => 75,
        SelinuxRootContext = "rootcontext" => 76,
        Relatime = "relatime" => 77,
        RedundantMetadata = "redundant_metadata" => 78,
        Overlay = "overlay" => 79,
        PrevSnap = "prevsnap" => 80,
        ReceiveResumeToken = "receive_resume_token" => 81,
        Encryption = "encryption" => 82,
        KeyLocation = "keylocation" => 83,
        KeyFormat = "keyformat" => 84,
        Pbkdf2Salt = "pbkdf2salt" => 85,
        Pbkdf2Iters = "pbkdf2iters" => 86,
        EncryptionRoot = "encryptionroot" => 87,
        KeyGuid = "keyguid" => 88,
        KeyStatus = "keystatus" => 89,
        RemapTxg = "remaptxg" => 90,
        SpecialSmallBlocks = "special_small_blocks" => 91,
        IvsetGuid = "ivsetguid" => 92,
        Redacted = "redacted" => 93,
        RedactSnaps = "redact_snaps" => 94,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_table_is_consistent<P>(table: &PropertyTable<P>, all: &[P])
    where
        P: Copy + PartialEq + Eq + std::hash::Hash + fmt::Debug,
    {
        assert_eq!(table.entries().len(), all.len());
        let names: HashSet<_> = table.entries().iter().map(|e| e.name).collect();
        let codes: HashSet<_> = table.entries().iter().map(|e| e.code).collect();
        assert_eq!(names.len(), all.len(), "duplicate property name");
        assert_eq!(codes.len(), all.len(), "duplicate property code");
        for p in all {
            let code = table.code(*p).expect("every property has a code");
            assert_eq!(table.by_code(code), Some(*p));
        }
    }

    #[test]
    fn test_pool_table_is_consistent() {
        assert_table_is_consistent(&ZPOOL_PROPERTIES, PoolProperty::ALL);
    }

    #[test]
    fn test_dataset_table_is_consistent() {
        assert_table_is_consistent(&ZFS_PROPERTIES, DatasetProperty::ALL);
    }

    #[test]
    fn test_size_property_codes() {
        assert_eq!(ZPOOL_PROPERTIES.code(PoolProperty::Size), Some(1));
        assert_eq!(ZPOOL_PROPERTIES.code(PoolProperty::Free), Some(16));
        assert_eq!(ZPOOL_PROPERTIES.code(PoolProperty::Allocated), Some(17));
        assert_eq!(ZFS_PROPERTIES.code(DatasetProperty::Used), Some(2));
    }

    #[test]
    fn test_parse_by_name() {
        assert_eq!("size".parse::<PoolProperty>().unwrap(), PoolProperty::Size);
        assert_eq!("FREE".parse::<PoolProperty>().unwrap(), PoolProperty::Free);
        assert_eq!(
            "usedbysnapshots".parse::<DatasetProperty>().unwrap(),
            DatasetProperty::UsedSnap
        );
        match "bogus".parse::<PoolProperty>() {
            Err(ZfsError::UnknownProperty { name }) => assert_eq!(name, "bogus"),
            other => panic!("expected UnknownProperty, got {:?}", other),
        }
    }

    #[test]
    fn test_display_uses_native_name() {
        assert_eq!(PoolProperty::FailureMode.to_string(), "failmode");
        assert_eq!(DatasetProperty::Case.to_string(), "casesensitivity");
    }

    #[test]
    fn test_codes_do_not_follow_declaration_order() {
        static PARTIAL: PropertyTable<PoolProperty> = PropertyTable::new(
            "test",
            &[
                PropertyEntry { property: PoolProperty::Free, name: "free", code: 3 },
                PropertyEntry { property: PoolProperty::Size, name: "size", code: 9 },
            ],
        );
        assert_eq!(PARTIAL.abi(), "test");
        assert_eq!(PARTIAL.code(PoolProperty::Size), Some(9));
        assert_eq!(PARTIAL.code(PoolProperty::Free), Some(3));
        assert_eq!(PARTIAL.code(PoolProperty::Allocated), None);
    }
}
