//! Command line argument parsing for the reeltag tools using clap.

use std::path::PathBuf;

use clap::Parser;

/// Map a `-v` count and `-q` flag to a verbosity level
/// (0=quiet, 1=normal, 2=verbose, 3=debug).
fn verbosity(verbose: u8, quiet: bool) -> u8 {
    if quiet {
        0
    } else {
        match verbose {
            0 => 1,
            n => n,
        }
    }
}

/// Clean the raw movie metadata export into a training file
#[derive(Parser, Debug, Clone)]
#[command(name = "reeltag-prepare")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PrepareArgs {
    /// Raw metadata CSV (release_date, title, overview, genres)
    #[arg(short, long, default_value = "data/movies_metadata.csv")]
    pub filepath: PathBuf,

    /// Where to write the cleaned CSV
    #[arg(short, long, default_value = "data/movies_data_ready.csv")]
    pub savepath: PathBuf,

    /// Verbosity level (repeat for more output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

impl PrepareArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        verbosity(self.verbose, self.quiet)
    }
}

/// Train a genre model on a cleaned movie file
#[derive(Parser, Debug, Clone)]
#[command(name = "reeltag-train")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TrainArgs {
    /// Cleaned movie CSV (title, overview, genres)
    #[arg(short, long, default_value = "data/movies_data_ready.csv")]
    pub filepath: PathBuf,

    /// Where to save the trained model
    #[arg(short, long, default_value = "models/model.rtag")]
    pub savepath: PathBuf,

    /// Model family to train
    #[arg(short, long, default_value = "Ovr")]
    pub model: String,

    /// Fraction of examples held out for evaluation
    #[arg(long, default_value = "0.2")]
    pub testsize: f64,

    /// Probability at or above which a genre is assigned
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Per-label estimator (logistic or linear-svm)
    #[arg(long)]
    pub estimator: Option<String>,

    /// JSON model configuration; flags override its values
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Seed for the train/test split and estimator training
    #[arg(long)]
    pub seed: Option<u64>,

    /// Lemmatize tokens during normalization
    #[arg(long)]
    pub lemmatize: bool,

    /// Worker threads for fitting (default: number of CPUs)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Verbosity level (repeat for more output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

impl TrainArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        verbosity(self.verbose, self.quiet)
    }
}

/// Predict the genres of a movie
#[derive(Parser, Debug, Clone)]
#[command(name = "reeltag-classify")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ClassifyArgs {
    /// Trained model file
    #[arg(short, long, default_value = "models/model.rtag")]
    pub model: PathBuf,

    /// Title of the movie
    #[arg(short, long)]
    pub title: String,

    /// Short description of the movie
    #[arg(short, long)]
    pub description: String,

    /// Print a timing breakdown to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl ClassifyArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        verbosity(u8::from(self.verbose) * 2, self.quiet)
    }
}
