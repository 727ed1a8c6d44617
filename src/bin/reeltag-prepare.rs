//! reeltag-prepare: Cleans the raw movie metadata export.

use std::process;

use clap::Parser;

use reeltag::cli::args::PrepareArgs;
use reeltag::cli::commands::run_prepare;
use reeltag::cli::init_logging;

fn main() {
    let args = PrepareArgs::parse();
    init_logging(args.verbosity());

    if let Err(e) = run_prepare(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
