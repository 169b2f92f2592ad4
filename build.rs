//! Build script for the bridge firmware
//!
//! Passes the cortex-m-rt and defmt linker scripts to the firmware binary.
//! `memory.x` is generated by embassy-stm32 (`memory-x` feature).

fn main() {
    // Re-run only when this script changes
    println!("cargo:rerun-if-changed=build.rs");

    // Linker scripts only apply to the firmware binary
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_some() {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
