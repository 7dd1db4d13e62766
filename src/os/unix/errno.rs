// Access to the calling thread's errno. The standard library keeps its own
// accessor private, so we go through libc, whose symbol name varies by
// platform.

use libc::c_int;

#[cfg(any(
    target_os = "linux",
    target_os = "l4re",
    target_os = "emscripten",
    target_os = "dragonfly",
    target_os = "hurd",
    target_os = "redox",
))]
use libc::__errno_location as errno_location;
#[cfg(any(
    target_os = "android",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "cygwin",
    target_os = "nuttx",
    target_os = "espidf",
    target_os = "horizon",
    target_os = "vita",
))]
use libc::__errno as errno_location;
#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "tvos",
    target_os = "watchos",
    target_os = "visionos",
    target_os = "freebsd",
))]
use libc::__error as errno_location;
#[cfg(any(target_os = "solaris", target_os = "illumos"))]
use libc::___errno as errno_location;
#[cfg(target_os = "haiku")]
use libc::_errnop as errno_location;

fn location() -> *mut c_int {
    unsafe { errno_location() as *mut c_int }
}

/// Returns the calling thread's current errno value.
pub fn errno() -> i32 {
    unsafe { *location() as i32 }
}

/// Sets the calling thread's errno to `0`.
///
/// This is needed before calls such as `readdir`, which report both the end
/// of a stream and a failure by returning NULL.
pub fn clear() {
    unsafe {
        *location() = 0;
    }
}
