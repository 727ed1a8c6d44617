//! reeltag-classify: Predicts the genres of one movie.

use std::process;

use clap::Parser;

use reeltag::cli::args::ClassifyArgs;
use reeltag::cli::commands::run_classify;
use reeltag::cli::init_logging;

fn main() {
    let args = ClassifyArgs::parse();
    init_logging(args.verbosity());

    if let Err(e) = run_classify(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
