//! # `Gomu`
//!
//! `Gomu` walks the Go modules in one or more directories and keeps their
//! dependencies in sync: listing the chain, pulling branches, pointing
//! manifests at local checkouts, resetting them, and syncing with optional
//! commit, tag and pull request steps.
//!
//! ## Usage
//!
//! ```sh
//! gomu list -i hatchify
//! gomu sync mod-common parg -i hatchify -c -m "Update deps"
//! gomu help sync
//! ```
//!
//! Flags are global and single-dash; see `gomu help` for the full list.

use gomu::error::GomuError;
use std::ffi::OsString;

fn main() {
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    match gomu::run(args.as_slice()) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            eprintln!("\nerror: {err}");
            std::process::exit(
                err.downcast_ref::<GomuError>()
                    .map_or(1, GomuError::exit_code),
            );
        }
    }
}
