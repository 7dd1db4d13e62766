use std::ffi::{OsStr, OsString};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::result;

use crate::os::unix::escaped_bytes;

/// A type alias for results returned by directory content readers.
pub type Result<T> = result::Result<T, Error>;

/// An error produced while reading the contents of a directory.
///
/// Every error wraps the `io::Error` reported by the operating system, with
/// its raw error code intact. Use [`Error::raw_os_error`] to tell apart, for
/// example, a handle that is not a directory (`ENOTDIR`) from one that is no
/// longer valid (`EBADF`).
///
/// Errors are never partial: when an error is returned, no entries are.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading the directory itself failed. This covers invalid handles,
    /// handles that are not directories and failures of the batched native
    /// call.
    #[error("failed to read directory contents: {0}")]
    Directory(#[source] io::Error),
    /// The directory was listed, but retrieving the metadata of one of its
    /// entries failed.
    #[error(
        "failed to read metadata for entry {}: {err}",
        escaped_bytes(.name.as_bytes())
    )]
    Entry {
        /// The name of the entry whose metadata could not be read.
        name: OsString,
        /// The underlying error.
        #[source]
        err: io::Error,
    },
}

impl Error {
    pub(crate) fn directory(err: io::Error) -> Error {
        Error::Directory(err)
    }

    pub(crate) fn entry(name: OsString, err: io::Error) -> Error {
        Error::Entry { name, err }
    }

    /// Returns the name of the entry that caused this error, if the failure
    /// was specific to one entry.
    pub fn entry_name(&self) -> Option<&OsStr> {
        match *self {
            Error::Directory(_) => None,
            Error::Entry { ref name, .. } => Some(name),
        }
    }

    /// Returns the underlying I/O error.
    pub fn io_error(&self) -> &io::Error {
        match *self {
            Error::Directory(ref err) => err,
            Error::Entry { ref err, .. } => err,
        }
    }

    /// Returns the raw OS error code, exactly as reported by the platform.
    pub fn raw_os_error(&self) -> Option<i32> {
        self.io_error().raw_os_error()
    }

    /// Returns the kind of the underlying I/O error.
    pub fn kind(&self) -> io::ErrorKind {
        self.io_error().kind()
    }
}

impl From<Error> for io::Error {
    /// Unwraps the underlying I/O error, discarding the entry name (if any).
    fn from(err: Error) -> io::Error {
        match err {
            Error::Directory(err) => err,
            Error::Entry { err, .. } => err,
        }
    }
}
