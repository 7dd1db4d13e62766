use std::ffi::OsString;
use std::os::unix::io::RawFd;

use crate::contents::ContentReader;
use crate::error::Result;
use crate::metadata::EntryMetadata;

/// A reader that collects a directory's entries with a single call into a
/// native shim, then copies them out of the shim's buffers.
///
/// The shim reads every name (and, for `read_contents`, every `lstat`
/// record) in one pass and hands back arrays that it allocated. Those arrays
/// are copied into owned values and released through the shim before this
/// reader returns, whether or not copying succeeds.
///
/// This reader only works when [`FAST_PATH`](crate::FAST_PATH) is `true`.
/// On any other build, calling it panics.
#[derive(Clone, Copy, Debug, Default)]
pub struct Native;

#[cfg(dircontents_fast)]
impl ContentReader for Native {
    const NAME: &'static str = "native";

    fn read_names(dirfd: RawFd) -> Result<Vec<OsString>> {
        imp::read_names(dirfd)
    }

    fn read_contents(dirfd: RawFd) -> Result<Vec<EntryMetadata>> {
        imp::read_contents(dirfd)
    }
}

#[cfg(not(dircontents_fast))]
impl ContentReader for Native {
    const NAME: &'static str = "native";

    fn read_names(_: RawFd) -> Result<Vec<OsString>> {
        unsupported()
    }

    fn read_contents(_: RawFd) -> Result<Vec<EntryMetadata>> {
        unsupported()
    }
}

#[cfg(not(dircontents_fast))]
fn unsupported() -> ! {
    panic!(
        "unsupported operation: the native directory reader is not \
         available in this build"
    )
}

/// Returns the number of buffers handed out by the native shim on the
/// calling thread that have not been released yet.
///
/// Outside of a call into [`Native`], this should always be `0`.
#[cfg(all(test, dircontents_fast))]
pub(crate) fn outstanding_buffers() -> i64 {
    unsafe { imp::dircontents_outstanding() as i64 }
}

#[cfg(dircontents_fast)]
mod imp {
    use std::ffi::{CStr, OsString};
    use std::io;
    use std::mem;
    use std::os::unix::ffi::OsStringExt;
    use std::os::unix::io::RawFd;
    use std::ptr;
    use std::slice;

    #[cfg(test)]
    use libc::c_long;
    use libc::{c_char, c_int, size_t};
    use log::trace;

    use crate::error::{Error, Result};
    use crate::metadata::EntryMetadata;
    use crate::os::unix::stat::{normalize, stat64};

    extern "C" {
        fn dircontents_read_names(
            directory: c_int,
            names: *mut *mut *mut c_char,
            count: *mut c_int,
        ) -> c_int;
        fn dircontents_free_names(names: *mut *mut c_char, count: c_int);
        fn dircontents_read_contents(
            directory: c_int,
            names: *mut *mut *mut c_char,
            metadata: *mut *mut stat64,
            count: *mut c_int,
        ) -> c_int;
        fn dircontents_free_contents(
            names: *mut *mut c_char,
            metadata: *mut stat64,
            count: c_int,
        );
        fn dircontents_stat_size() -> size_t;
        #[cfg(test)]
        pub(super) fn dircontents_outstanding() -> c_long;
    }

    /// The name array returned by `dircontents_read_names`.
    ///
    /// The array is released exactly once, when this value is dropped.
    /// Borrows handed out by `names` therefore cannot outlive it.
    struct Names {
        names: *mut *mut c_char,
        count: c_int,
    }

    impl Names {
        fn names(&self) -> &[*mut c_char] {
            // SAFETY: On success, the shim guarantees that `names` points to
            // `count` C string pointers, valid until they're freed in drop.
            unsafe { foreign_slice(self.names, self.count) }
        }
    }

    impl Drop for Names {
        fn drop(&mut self) {
            trace!("releasing {} native names", self.count);
            unsafe { dircontents_free_names(self.names, self.count) }
        }
    }

    /// The parallel name and metadata arrays returned by
    /// `dircontents_read_contents`.
    ///
    /// Both arrays are released exactly once, when this value is dropped.
    struct Contents {
        names: *mut *mut c_char,
        metadata: *mut stat64,
        count: c_int,
    }

    impl Contents {
        fn names(&self) -> &[*mut c_char] {
            // SAFETY: See Names::names.
            unsafe { foreign_slice(self.names, self.count) }
        }

        fn metadata(&self) -> &[stat64] {
            // SAFETY: On success, the shim guarantees that `metadata` points
            // to `count` initialized stat records, valid until they're freed
            // in drop. Their stride is checked against ours before the call.
            unsafe { foreign_slice(self.metadata, self.count) }
        }
    }

    impl Drop for Contents {
        fn drop(&mut self) {
            trace!("releasing {} native entries", self.count);
            unsafe {
                dircontents_free_contents(
                    self.names,
                    self.metadata,
                    self.count,
                )
            }
        }
    }

    pub(super) fn read_names(dirfd: RawFd) -> Result<Vec<OsString>> {
        let mut names = ptr::null_mut();
        let mut count = 0;
        let res =
            unsafe { dircontents_read_names(dirfd, &mut names, &mut count) };
        if res < 0 {
            // Nothing was allocated, so there is nothing to release.
            return Err(Error::directory(io::Error::from_raw_os_error(-res)));
        }
        let buf = Names { names, count };
        let copied = buf.names().iter().map(|&p| copy_name(p)).collect();
        drop(buf);
        Ok(copied)
    }

    pub(super) fn read_contents(
        dirfd: RawFd,
    ) -> Result<Vec<EntryMetadata>> {
        let stride = unsafe { dircontents_stat_size() };
        assert_eq!(
            stride,
            mem::size_of::<stat64>(),
            "native stat layout does not match libc's"
        );

        let mut names = ptr::null_mut();
        let mut metadata = ptr::null_mut();
        let mut count = 0;
        let res = unsafe {
            dircontents_read_contents(
                dirfd,
                &mut names,
                &mut metadata,
                &mut count,
            )
        };
        if res < 0 {
            return Err(Error::directory(io::Error::from_raw_os_error(-res)));
        }
        let buf = Contents { names, metadata, count };
        // Both arrays are sized by the one count the shim reports, so they
        // are parallel.
        let copied = buf
            .names()
            .iter()
            .zip(buf.metadata())
            .map(|(&p, raw)| normalize(copy_name(p), raw))
            .collect();
        drop(buf);
        Ok(copied)
    }

    /// Borrow a foreign array of `count` elements.
    ///
    /// # Safety
    ///
    /// When `count` is positive, `base` must point to `count` initialized
    /// elements that stay valid for the returned lifetime.
    unsafe fn foreign_slice<'a, T>(base: *mut T, count: c_int) -> &'a [T] {
        assert!(count >= 0, "negative native entry count: {}", count);
        if count == 0 {
            return &[];
        }
        assert!(!base.is_null(), "null native array of {} entries", count);
        slice::from_raw_parts(base, count as usize)
    }

    fn copy_name(p: *const c_char) -> OsString {
        assert!(!p.is_null(), "null native entry name");
        // SAFETY: The shim only stores NUL terminated strings, and the
        // pointer is valid for as long as the array holding it.
        let bytes = unsafe { CStr::from_ptr(p) }.to_bytes();
        OsString::from_vec(bytes.to_vec())
    }
}
