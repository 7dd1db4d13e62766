use std::ffi::{CStr, OsString};
use std::io;
use std::mem;
use std::os::unix::io::RawFd;

// glibc's `struct stat` is only 64-bit clean with `_FILE_OFFSET_BITS=64`,
// which is also how `contents.c` is compiled. Everywhere else we support,
// `stat` is already the large file layout.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
pub(crate) use libc::{fstatat64, stat64};
#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
pub(crate) use libc::{fstatat as fstatat64, stat as stat64};

use crate::metadata::{EntryMetadata, ModificationTime};

/// Convert a raw `stat` record for the entry `name` into metadata.
pub(crate) fn normalize(name: OsString, raw: &stat64) -> EntryMetadata {
    EntryMetadata::new(
        name,
        raw.st_mode as u32,
        raw.st_size as u64,
        modification_time(raw),
        raw.st_dev as u64,
        raw.st_ino as u64,
    )
}

#[cfg(target_os = "netbsd")]
fn modification_time(raw: &stat64) -> ModificationTime {
    ModificationTime {
        seconds: raw.st_mtime as i64,
        nanoseconds: raw.st_mtimensec as i64,
    }
}

#[cfg(not(target_os = "netbsd"))]
fn modification_time(raw: &stat64) -> ModificationTime {
    ModificationTime {
        seconds: raw.st_mtime as i64,
        nanoseconds: raw.st_mtime_nsec as i64,
    }
}

/// Retrieve the metadata of `name`, relative to `parent_dirfd`, without
/// following symbolic links.
pub(crate) fn lstatat(parent_dirfd: RawFd, name: &CStr) -> io::Result<stat64> {
    let mut stat: stat64 = unsafe { mem::zeroed() };
    let res = unsafe {
        fstatat64(
            parent_dirfd,
            name.as_ptr(),
            &mut stat,
            libc::AT_SYMLINK_NOFOLLOW,
        )
    };
    if res < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(stat)
    }
}
