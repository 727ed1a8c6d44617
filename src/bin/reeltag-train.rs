//! reeltag-train: Trains and saves a genre model.

use std::process;

use clap::Parser;

use reeltag::cli::args::TrainArgs;
use reeltag::cli::commands::run_train;
use reeltag::cli::init_logging;

fn main() {
    let args = TrainArgs::parse();
    init_logging(args.verbosity());

    if let Err(e) = run_train(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
