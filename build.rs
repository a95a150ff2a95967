/// With the `link` feature, point the linker at `vJoyInterface.lib`.
///
/// `VJOY_LIB_DIR` names the directory that holds the import library for the
/// target architecture (e.g. `vjoy_libs/2.1.8/lib/amd64`).
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=VJOY_LIB_DIR");

    if std::env::var_os("CARGO_FEATURE_LINK").is_none() {
        return;
    }

    match std::env::var("VJOY_LIB_DIR") {
        Ok(dir) if !dir.is_empty() => println!("cargo:rustc-link-search=native={dir}"),
        _ => println!(
            "cargo:warning=feature `link` is enabled but VJOY_LIB_DIR is not set; \
             relying on the default library search path"
        ),
    }
}
