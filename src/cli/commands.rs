//! Command implementations for the reeltag tools.

use std::fs;
use std::time::Instant;

use log::info;

use crate::analysis::normalizer::{Normalizer, example_text};
use crate::cli::args::{ClassifyArgs, PrepareArgs, TrainArgs};
use crate::cli::output::{
    ClassifyTimings, PredictionOutput, TrainingReport, format_timings, format_training_report,
    render_json,
};
use crate::dataset::corpus::Corpus;
use crate::dataset::prepare::{DataPreparer, PrepareReport};
use crate::error::{ReeltagError, Result, ensure_exists};
use crate::ml::estimator::EstimatorConfig;
use crate::model::persistence::{load_from_path, save_to_path};
use crate::model::{ModelConfig, ModelFamily, build_model};

/// Smallest held-out fraction for which the model is evaluated.
pub const MIN_TEST_SIZE: f64 = 0.01;

/// Clean a raw metadata export.
pub fn run_prepare(args: &PrepareArgs) -> Result<PrepareReport> {
    ensure_exists(&args.filepath)?;
    if args.verbosity() > 0 {
        println!("Using the following dataset: {}", args.filepath.display());
    }

    let preparer = DataPreparer::new(Normalizer::new(Default::default())?)?;
    let report = preparer.prepare_file(&args.filepath, &args.savepath)?;

    if args.verbosity() > 0 {
        println!("{report}");
        println!("Processed data saved as '{}'", args.savepath.display());
    }
    Ok(report)
}

/// Resolve the model configuration from the config file and flags.
pub fn resolve_config(args: &TrainArgs) -> Result<ModelConfig> {
    let mut config = match &args.config {
        Some(path) => ModelConfig::from_json_file(path)?,
        None => ModelConfig::default(),
    };

    config.family = args.model.parse::<ModelFamily>()?;
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(estimator) = &args.estimator {
        config.estimator = estimator.parse::<EstimatorConfig>()?;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(threads) = args.threads {
        config.num_threads = threads;
    }
    if args.lemmatize {
        config.normalizer.lemmatize = true;
    }

    config.validate()?;
    Ok(config)
}

/// Train, evaluate and save a model.
pub fn run_train(args: &TrainArgs) -> Result<TrainingReport> {
    let config = resolve_config(args)?;
    if !(0.0..1.0).contains(&args.testsize) {
        return Err(ReeltagError::configuration(format!(
            "testsize must be in [0, 1), got {}",
            args.testsize
        )));
    }
    ensure_exists(&args.filepath)?;

    let normalizer = Normalizer::new(config.normalizer.clone())?;
    let corpus = Corpus::load(&args.filepath, &normalizer)?;
    let evaluate = args.testsize >= MIN_TEST_SIZE;
    let (train, test) = if evaluate {
        corpus.split(args.testsize, config.seed)?
    } else {
        (corpus, Corpus::default())
    };
    info!(
        "training on {} examples, holding out {}",
        train.len(),
        test.len()
    );

    let mut model = build_model(config)?;
    let start = Instant::now();
    model.fit(&train.texts, &train.labels)?;
    let training_secs = start.elapsed().as_secs_f64();

    let stats = if evaluate && !test.is_empty() {
        Some(model.get_stats(&test.texts, &test.labels)?)
    } else {
        None
    };

    if let Some(parent) = args.savepath.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    save_to_path(model.as_ref(), &args.savepath)?;

    let metadata = model
        .metadata()
        .ok_or_else(|| ReeltagError::not_fitted("model has no metadata after fitting"))?;
    let report = TrainingReport {
        family: metadata.family.to_string(),
        estimator: metadata.estimator.clone(),
        training_examples: metadata.training_examples,
        test_examples: test.len(),
        num_labels: metadata.num_labels,
        vocabulary_size: metadata.vocabulary_size,
        training_secs,
        stats,
        model_path: args.savepath.display().to_string(),
    };

    if args.verbosity() > 0 {
        println!("{}", format_training_report(&report));
    }
    Ok(report)
}

/// Predict the genres of one movie and print them as JSON.
pub fn run_classify(args: &ClassifyArgs) -> Result<PredictionOutput> {
    let start = Instant::now();
    let model = load_from_path(&args.model)?;
    let load = start.elapsed();

    let (text, normalization) = model
        .normalizer()
        .normalize_with_timings(&example_text(&args.title, &args.description))?;

    let start = Instant::now();
    let genre = model.predict(&[text])?.pop().unwrap_or_default();
    let prediction = start.elapsed();

    let output = PredictionOutput {
        title: args.title.clone(),
        description: args.description.clone(),
        genre,
    };
    println!("{}", render_json(&output, args.pretty)?);

    if args.verbose {
        let timings = ClassifyTimings {
            load,
            normalization,
            prediction,
        };
        eprintln!("{}", format_timings(&timings));
    }
    Ok(output)
}
