//! Writes `include/chaojiying.h` for C callers when built with `--features ffi`.

fn main() {
    println!("cargo:rerun-if-changed=src/ffi.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    #[cfg(feature = "ffi")]
    write_c_header();
}

#[cfg(feature = "ffi")]
fn write_c_header() {
    let Ok(crate_dir) = std::env::var("CARGO_MANIFEST_DIR").map(std::path::PathBuf::from) else {
        return;
    };

    let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml")).unwrap_or_default();
    let header = crate_dir.join("include").join("chaojiying.h");

    match cbindgen::generate_with_config(&crate_dir, config) {
        Ok(bindings) => {
            if let Some(dir) = header.parent() {
                let _ = std::fs::create_dir_all(dir);
            }
            bindings.write_to_file(&header);
        }
        Err(e) => println!("cargo:warning=C header not generated: {}", e),
    }
}
