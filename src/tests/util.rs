use std::error;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::EntryMetadata;

/// Create an error from a format!-like syntax.
#[macro_export]
macro_rules! err {
    ($($tt:tt)*) => {
        Box::<dyn error::Error + Send + Sync>::from(format!($($tt)*))
    }
}

/// A handle that never refers to an open descriptor.
#[derive(Debug)]
pub struct BadHandle;

impl AsRawFd for BadHandle {
    fn as_raw_fd(&self) -> RawFd {
        -1
    }
}

/// Returns true if the tests run with privileges that bypass permission
/// checks, which makes permission based failures impossible to provoke.
pub fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

/// Return the given names, sorted.
pub fn sorted(mut names: Vec<OsString>) -> Vec<OsString> {
    names.sort();
    names
}

/// Return the names of the given entries, sorted.
pub fn sorted_names(ents: &[EntryMetadata]) -> Vec<OsString> {
    sorted(ents.iter().map(|e| e.name().to_os_string()).collect())
}

/// Return the given entries sorted by name.
pub fn sorted_ents(mut ents: Vec<EntryMetadata>) -> Vec<EntryMetadata> {
    ents.sort_by(|e1, e2| e1.name().cmp(e2.name()));
    ents
}

/// Build a sorted list of names from string literals.
pub fn names(names: &[&str]) -> Vec<OsString> {
    sorted(names.iter().map(OsString::from).collect())
}

/// A helper for managing a directory in which to run tests.
///
/// When manipulating paths within this directory, paths are interpreted
/// relative to this directory.
#[derive(Debug)]
pub struct Dir {
    dir: TempDir,
}

impl Dir {
    /// Create a new empty temporary directory.
    pub fn tmp() -> Dir {
        let dir = TempDir::new().unwrap();
        Dir { dir }
    }

    /// Return the path to this directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Return a path joined to the path to this directory.
    pub fn join<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.path().join(path)
    }

    /// Open this directory, returning a handle that can be read by the
    /// readers in this crate.
    pub fn open(&self) -> File {
        self.open_at(".")
    }

    /// Open the given path, relative to this directory.
    pub fn open_at<P: AsRef<Path>>(&self, path: P) -> File {
        let full = self.join(path);
        File::open(&full)
            .map_err(|e| err!("failed to open {}: {}", full.display(), e))
            .unwrap()
    }

    /// Create a directory at the given path, while creating all intermediate
    /// directories as needed.
    pub fn mkdirp<P: AsRef<Path>>(&self, path: P) {
        let full = self.join(path);
        fs::create_dir_all(&full)
            .map_err(|e| {
                err!("failed to create directory {}: {}", full.display(), e)
            })
            .unwrap();
    }

    /// Create an empty file at the given path. All ancestor directories must
    /// already exists.
    pub fn touch<P: AsRef<Path>>(&self, path: P) {
        self.write(path, b"");
    }

    /// Create empty files at the given paths. All ancestor directories must
    /// already exists.
    pub fn touch_all<P: AsRef<Path>>(&self, paths: &[P]) {
        for p in paths {
            self.touch(p);
        }
    }

    /// Create a file at the given path with the given contents.
    pub fn write<P: AsRef<Path>>(&self, path: P, contents: &[u8]) {
        let full = self.join(path);
        File::create(&full)
            .and_then(|mut f| f.write_all(contents))
            .map_err(|e| {
                err!("failed to write file {}: {}", full.display(), e)
            })
            .unwrap();
    }

    /// Set the permission bits of the given path.
    pub fn chmod<P: AsRef<Path>>(&self, path: P, mode: u32) {
        let full = self.join(path);
        fs::set_permissions(&full, fs::Permissions::from_mode(mode))
            .map_err(|e| err!("failed to chmod {}: {}", full.display(), e))
            .unwrap();
    }

    /// Create a symlink to the given src with the given link name.
    pub fn symlink<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        src: P1,
        link_name: P2,
    ) {
        let (src, link_name) = (self.join(src), self.join(link_name));
        std::os::unix::fs::symlink(&src, &link_name)
            .map_err(|e| {
                err!(
                    "failed to symlink {} with target {}: {}",
                    link_name.display(),
                    src.display(),
                    e
                )
            })
            .unwrap();
    }
}
