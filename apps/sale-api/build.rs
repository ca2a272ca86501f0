//! Build script for compiling Protocol Buffer definitions.
//!
//! Compiles the .proto files into Rust code using tonic-build. The
//! generated code is placed in `$OUT_DIR` and included via
//! `tonic::include_proto!`. The sale contract gets a server, the catalog
//! contract only a client (the catalog is an external service).

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tell Cargo to rerun this build script if the proto files change
    println!("cargo:rerun-if-changed=../../proto/sale.proto");
    println!("cargo:rerun-if-changed=../../proto/catalog.proto");
    println!("cargo:rerun-if-changed=../../proto");

    // Sale services: we implement the server side
    tonic_build::configure()
        .build_server(true)
        .build_client(false)
        .compile_protos(&["../../proto/sale.proto"], &["../../proto"])?;

    // Catalog service: client stubs only
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(&["../../proto/catalog.proto"], &["../../proto"])?;

    Ok(())
}
