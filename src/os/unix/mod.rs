/*!
Unix directory content readers.

The portable reader is built on `readdir` and `fstatat`. The native reader
calls into `contents.c`, which is only compiled on some targets (see
`build.rs`).
*/

use std::ffi::{CStr, CString};
use std::io;
use std::os::unix::io::RawFd;
use std::ptr::NonNull;

#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
use libc::readdir as readdir64;
#[cfg(all(target_os = "linux", target_env = "gnu"))]
use libc::readdir64;

#[cfg(all(test, dircontents_fast))]
pub(crate) use self::native::outstanding_buffers;
pub use self::native::Native;
pub use self::portable::Portable;

mod errno;
mod native;
mod portable;
mod stat;

/// A directory stream opened on a duplicate of a caller's descriptor.
///
/// The duplicate shares its file offset with the original descriptor, so the
/// stream is rewound when it is opened and again when it is dropped. Dropping
/// the stream closes the duplicate, never the original.
#[derive(Debug)]
struct Stream(NonNull<libc::DIR>);

impl Drop for Stream {
    fn drop(&mut self) {
        unsafe {
            libc::rewinddir(self.0.as_ptr());
            // Explicitly ignore the error here if one occurs. Only the
            // duplicate descriptor is closed.
            libc::closedir(self.0.as_ptr());
        }
    }
}

impl Stream {
    /// Open a directory stream on a duplicate of the given descriptor.
    ///
    /// This fails with `EBADF` if `dirfd` is not an open descriptor and with
    /// `ENOTDIR` if it doesn't refer to a directory.
    fn duplicate(dirfd: RawFd) -> io::Result<Stream> {
        let fd = unsafe { libc::fcntl(dirfd, libc::F_DUPFD_CLOEXEC, 0) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: fd is a valid descriptor that we own, per the above check.
        // On success, the stream takes ownership of it.
        match NonNull::new(unsafe { libc::fdopendir(fd) }) {
            None => {
                let err = io::Error::last_os_error();
                unsafe {
                    libc::close(fd);
                }
                Err(err)
            }
            Some(dir) => {
                unsafe {
                    libc::rewinddir(dir.as_ptr());
                }
                Ok(Stream(dir))
            }
        }
    }

    /// Read the name of the next entry, skipping `.` and `..`.
    ///
    /// This returns `None` when the end of the stream has been reached. Names
    /// are kept NUL terminated so they can be handed straight to `fstatat`.
    fn read_name(&mut self) -> io::Result<Option<CString>> {
        loop {
            // readdir returns NULL both at the end of the stream and on
            // error, and only errno tells the two apart.
            errno::clear();
            let ent = unsafe { readdir64(self.0.as_ptr()) };
            if ent.is_null() {
                return match errno::errno() {
                    0 => Ok(None),
                    code => Err(io::Error::from_raw_os_error(code)),
                };
            }
            // SAFETY: `d_name` is guaranteed to be NUL terminated, and the
            // entry is valid until the next call to readdir on this stream.
            // The name is copied out before that happens.
            let name = unsafe { CStr::from_ptr((*ent).d_name.as_ptr()) };
            if is_dots(name.to_bytes()) {
                continue;
            }
            return Ok(Some(name.to_owned()));
        }
    }
}

fn is_dots(file_name: &[u8]) -> bool {
    file_name == b"." || file_name == b".."
}

/// Return a convenience ASCII-only debug representation of the given bytes.
/// In essence, non-ASCII and non-printable bytes are escaped.
pub(crate) fn escaped_bytes(bytes: &[u8]) -> String {
    use std::ascii::escape_default;

    bytes.iter().cloned().flat_map(escape_default).map(|b| b as char).collect()
}
