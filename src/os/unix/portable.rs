use std::ffi::{CString, OsString};
use std::io;
use std::os::unix::ffi::OsStringExt;
use std::os::unix::io::RawFd;

use log::debug;

use crate::contents::ContentReader;
use crate::error::{Error, Result};
use crate::metadata::EntryMetadata;
use crate::os::unix::stat::{lstatat, normalize};
use crate::os::unix::Stream;

/// A reader that lists entries with `readdir` and inspects them one at a
/// time with `fstatat`.
///
/// This reader is available on every supported Unix platform.
///
/// An entry that disappears between being listed and being inspected
/// (`ENOENT`) is left out, just as the native reader does. Any other failure
/// to inspect an entry aborts the whole read with [`Error::Entry`], so a
/// successful result always describes every entry that was listed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Portable;

impl Portable {
    fn list(dirfd: RawFd) -> io::Result<Vec<CString>> {
        let mut stream = Stream::duplicate(dirfd)?;
        let mut names = vec![];
        while let Some(name) = stream.read_name()? {
            names.push(name);
        }
        Ok(names)
    }

    /// Inspect each of `names`, relative to `dirfd`, without following
    /// symbolic links.
    ///
    /// A name that no longer exists is skipped. The first other failure
    /// aborts the whole call.
    pub(crate) fn inspect(
        dirfd: RawFd,
        names: Vec<CString>,
    ) -> Result<Vec<EntryMetadata>> {
        let mut ents = Vec::with_capacity(names.len());
        for cname in names {
            match lstatat(dirfd, &cname) {
                Ok(raw) => {
                    let name = OsString::from_vec(cname.into_bytes());
                    ents.push(normalize(name, &raw));
                }
                Err(ref err) if err.raw_os_error() == Some(libc::ENOENT) => {
                    debug!("skipping vanished entry {:?}", cname);
                }
                Err(err) => {
                    let name = OsString::from_vec(cname.into_bytes());
                    return Err(Error::entry(name, err));
                }
            }
        }
        Ok(ents)
    }
}

impl ContentReader for Portable {
    const NAME: &'static str = "portable";

    fn read_names(dirfd: RawFd) -> Result<Vec<OsString>> {
        let names = Portable::list(dirfd).map_err(Error::directory)?;
        Ok(names
            .into_iter()
            .map(|name| OsString::from_vec(name.into_bytes()))
            .collect())
    }

    fn read_contents(dirfd: RawFd) -> Result<Vec<EntryMetadata>> {
        let names = Portable::list(dirfd).map_err(Error::directory)?;
        Portable::inspect(dirfd, names)
    }
}
