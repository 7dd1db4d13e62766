#[cfg(unix)]
use std::ffi::OsString;
#[cfg(unix)]
use std::os::unix::io::{AsRawFd, RawFd};

#[cfg(unix)]
use log::trace;

#[cfg(unix)]
use crate::error::Result;
#[cfg(unix)]
use crate::metadata::EntryMetadata;

/// Whether this build includes the batched native reader.
///
/// This is decided when the crate is compiled and never changes at runtime.
/// When it is `false`, [`read_names`] and [`read_contents`] use the
/// portable reader and calling into [`Native`](crate::Native) panics.
pub const FAST_PATH: bool = cfg!(dircontents_fast);

/// A strategy for reading the contents of an open directory.
///
/// Implementations never close or otherwise take ownership of the given file
/// descriptor, and leave its directory stream positioned at the beginning
/// when they return. `.` and `..` are never reported. The order of entries is
/// whatever the platform produces.
///
/// On success, `read_names` and `read_contents` report the same entries for
/// an unmodified directory. On failure, no entries are reported at all.
#[cfg(unix)]
pub trait ContentReader {
    /// A short name for this reader, used in diagnostics.
    const NAME: &'static str;

    /// Read the names of all entries in the directory referred to by `dirfd`.
    fn read_names(dirfd: RawFd) -> Result<Vec<OsString>>;

    /// Read the names and `lstat` metadata of all entries in the directory
    /// referred to by `dirfd`.
    fn read_contents(dirfd: RawFd) -> Result<Vec<EntryMetadata>>;
}

#[cfg(all(unix, dircontents_fast))]
type Backend = crate::os::unix::Native;
#[cfg(all(unix, not(dircontents_fast)))]
type Backend = crate::os::unix::Portable;

/// Read the names of the entries in the given open directory.
///
/// The directory is read through a duplicate of the handle, so `dir` is
/// neither closed nor left at a different stream position.
///
/// If the handle is invalid or isn't a directory, then an error carrying the
/// platform's error code is returned.
#[cfg(unix)]
pub fn read_names<D: AsRawFd + ?Sized>(dir: &D) -> Result<Vec<OsString>> {
    let names = Backend::read_names(dir.as_raw_fd())?;
    trace!("{} reader listed {} names", Backend::NAME, names.len());
    Ok(names)
}

/// Read the names and metadata of the entries in the given open directory.
///
/// Metadata is gathered as if by `lstat`, so symbolic links are described
/// rather than followed. An entry that disappears between being listed and
/// being inspected is omitted.
///
/// If the handle is invalid, isn't a directory, or an entry's metadata could
/// not be read for any other reason, then an error is returned.
#[cfg(unix)]
pub fn read_contents<D: AsRawFd + ?Sized>(
    dir: &D,
) -> Result<Vec<EntryMetadata>> {
    let ents = Backend::read_contents(dir.as_raw_fd())?;
    trace!("{} reader listed {} entries", Backend::NAME, ents.len());
    Ok(ents)
}
