use std::env;

const SHIM: &str = "src/os/unix/contents.c";

fn main() {
    println!("cargo:rustc-check-cfg=cfg(dircontents_fast)");
    println!("cargo:rustc-check-cfg=cfg(dircontents_disable_fast)");
    println!("cargo:rerun-if-changed={}", SHIM);
    println!("cargo:rerun-if-changed=build.rs");

    if !enable_fast_path() {
        return;
    }
    // The Rust side reads the shim's `struct stat` array as `stat64` on
    // glibc, so force the large file layout in C as well.
    cc::Build::new()
        .file(SHIM)
        .define("_FILE_OFFSET_BITS", "64")
        .compile("dircontents_native");
    println!("cargo:rustc-cfg=dircontents_fast");
}

fn enable_fast_path() -> bool {
    if env::var_os("CARGO_CFG_DIRCONTENTS_DISABLE_FAST").is_some() {
        return false;
    }
    let os = match env::var("CARGO_CFG_TARGET_OS") {
        Err(_) => return false,
        Ok(os) => os,
    };
    let target_env = env::var("CARGO_CFG_TARGET_ENV").unwrap_or_default();
    match os.as_str() {
        "linux" => target_env == "gnu",
        "macos" => true,
        _ => false,
    }
}
