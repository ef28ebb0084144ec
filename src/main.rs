//! Release Packager - builds installers and archives from a git-tracked tree.
//!
//! This binary enumerates tracked files, compiles an NSIS installer and produces
//! per-platform .zip/.tar.gz archives, reporting every artifact it creates.

use std::process;

#[tokio::main]
async fn main() {
    // Logging is initialised by the CLI once verbosity flags are known
    let exit_code = match release_packager::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
