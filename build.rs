#![forbid(unsafe_code)]

use std::fmt::Display;

fn main() {
    // Builds outside a git checkout still succeed; the version endpoint
    // reports "unknown" for whatever could not be determined.
    emit("GIT_BRANCH", build_data::get_git_branch());
    emit("GIT_COMMIT_SHORT", build_data::get_git_commit_short());
    emit("GIT_DIRTY", build_data::get_git_dirty());
    emit("RUSTC_VERSION", build_data::get_rustc_version());

    // Tells cargo not to rebuild build.rs during debug builds when other files change.
    // This speeds up development builds.
    //build_data::no_debug_rebuilds();
}

fn emit<T: Display, E>(key: &str, value: Result<T, E>) {
    let value = match value {
        Ok(v) => v.to_string(),
        Err(_) => "unknown".to_string(),
    };
    println!("cargo:rustc-env={}={}", key, value);
}
