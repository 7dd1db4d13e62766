/*!
Read the contents of an already open directory.

This crate answers one question about a directory handle: which entries does
it contain, and (optionally) what does `lstat` say about each of them. It
does not recurse, cache or watch. Opening and closing the directory is left
to the caller.

Two readers implement the same contract:

* [`Native`] makes a single call into a small C shim that collects every
  name (and every `struct stat`) in one pass, then copies the results out of
  the foreign buffers and releases them. It only exists on targets where the
  shim is compiled, which is reported by [`FAST_PATH`].
* [`Portable`] reads the directory with `readdir` and issues one `fstatat`
  per entry.

[`read_names`] and [`read_contents`] use whichever reader this build
selected. Callers normally never need to name a reader directly.

# Example

```no_run
use std::fs::File;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let dir = File::open("/tmp")?;
for ent in dircontents::read_contents(&dir)? {
    println!("{:?}: {} bytes", ent.name(), ent.size());
}
# Ok(())
# }
```

# Building without the native reader

The native reader is compiled on Linux (glibc) and macOS. To force the
portable reader, build with `RUSTFLAGS="--cfg dircontents_disable_fast"`.
*/

#![deny(missing_docs)]

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

#[cfg(unix)]
pub use crate::contents::{read_contents, read_names, ContentReader};
pub use crate::contents::FAST_PATH;
#[cfg(unix)]
pub use crate::error::{Error, Result};
#[cfg(unix)]
pub use crate::metadata::{EntryMetadata, ModificationTime};
#[cfg(unix)]
pub use crate::os::unix::{Native, Portable};

mod contents;
#[cfg(unix)]
mod error;
#[cfg(unix)]
mod metadata;
mod os;
#[cfg(all(test, unix))]
mod tests;
