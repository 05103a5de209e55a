use std::env;
use std::path::PathBuf;

const SCRIPT_NAME: &str = "_vee_bootstrap.py";

fn main() {
    println!("cargo:rerun-if-env-changed=VEE_SRC_BIN");

    // We bake in the path to the bootstrap, as the launcher has no reliable way
    // of figuring out where it was installed from.
    let src_bin = env::var_os("VEE_SRC_BIN")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").unwrap_or_default()).join("bin")
        });

    let script = src_bin.join(SCRIPT_NAME);
    println!("cargo:rustc-env=VEE_BOOTSTRAP_SCRIPT={}", script.display());
}
