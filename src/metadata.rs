use std::ffi::{OsStr, OsString};
use std::fmt;
use std::os::unix::ffi::OsStrExt;

use crate::os::unix::escaped_bytes;

/// A modification time, split into whole seconds and nanoseconds since the
/// Unix epoch, as reported by the platform.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ModificationTime {
    /// Whole seconds since the epoch.
    pub seconds: i64,
    /// Nanoseconds past `seconds`.
    pub nanoseconds: i64,
}

/// The metadata of a single directory entry.
///
/// Values are built fresh on every read and are immutable. No attribute is
/// interpreted: in particular, the mode is the raw `st_mode` bitmask and
/// symbolic links are described as links, never followed.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct EntryMetadata {
    name: OsString,
    mode: u32,
    size: u64,
    modification_time: ModificationTime,
    device_id: u64,
    file_id: u64,
}

impl fmt::Debug for EntryMetadata {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EntryMetadata")
            .field("name", &escaped_bytes(self.name.as_bytes()))
            .field("mode", &format_args!("{:o}", self.mode))
            .field("size", &self.size)
            .field("modification_time", &self.modification_time)
            .field("device_id", &self.device_id)
            .field("file_id", &self.file_id)
            .finish()
    }
}

impl EntryMetadata {
    pub(crate) fn new(
        name: OsString,
        mode: u32,
        size: u64,
        modification_time: ModificationTime,
        device_id: u64,
        file_id: u64,
    ) -> EntryMetadata {
        EntryMetadata {
            name,
            mode,
            size,
            modification_time,
            device_id,
            file_id,
        }
    }

    /// The entry's file name. This is never `.` or `..`.
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Consume this value and return the entry's file name.
    pub fn into_name(self) -> OsString {
        self.name
    }

    /// The raw type and permission bits (`st_mode`).
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// The size in bytes (`st_size`).
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The last modification time (`st_mtime`).
    pub fn modification_time(&self) -> ModificationTime {
        self.modification_time
    }

    /// The identifier of the device holding this entry (`st_dev`).
    pub fn device_id(&self) -> u64 {
        self.device_id
    }

    /// The file serial number (`st_ino`). It is only unique among entries
    /// sharing the same device id.
    pub fn file_id(&self) -> u64 {
        self.file_id
    }
}
