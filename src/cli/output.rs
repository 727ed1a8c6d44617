//! Output formatting for the reeltag tools.

use std::fmt::Write as _;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::StepTimings;
use crate::error::Result;
use crate::ml::metrics::Stats;

/// JSON document printed by `reeltag-classify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub title: String,
    pub description: String,
    pub genre: Vec<String>,
}

/// Summary of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub family: String,
    pub estimator: String,
    pub training_examples: usize,
    pub test_examples: usize,
    pub num_labels: usize,
    pub vocabulary_size: usize,
    pub training_secs: f64,
    pub stats: Option<Stats>,
    pub model_path: String,
}

/// Time spent answering one classification request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifyTimings {
    pub load: Duration,
    pub normalization: StepTimings,
    pub prediction: Duration,
}

/// Serialize `value` as compact or pretty JSON.
pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Precision/recall/F1 as a boxed table.
pub fn format_stats_table(stats: &Stats) -> String {
    let border = "+-----------+--------+";
    let mut table = String::new();
    let _ = writeln!(table, "{border}");
    let _ = writeln!(table, "| {:<9} | {:>6} |", "Metric", "Value");
    let _ = writeln!(table, "{border}");
    for (name, value) in [
        ("Precision", stats.precision),
        ("Recall", stats.recall),
        ("F1", stats.f1),
    ] {
        let _ = writeln!(table, "| {name:<9} | {value:>6.4} |");
    }
    table.push_str(border);
    table
}

/// Human-readable training summary.
pub fn format_training_report(report: &TrainingReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Trained {} model ({}) on {} examples: {} genres, {} features",
        report.family,
        report.estimator,
        report.training_examples,
        report.num_labels,
        report.vocabulary_size
    );
    match &report.stats {
        Some(stats) => {
            let _ = writeln!(out, "\nEvaluation on {} held-out examples:", report.test_examples);
            let _ = writeln!(out, "{}", format_stats_table(stats));
        }
        None => {
            let _ = writeln!(out, "\nNo held-out data; evaluation skipped.");
        }
    }
    let _ = writeln!(out, "\nTotal training time: {:.2} s", report.training_secs);
    let _ = write!(out, "Model saved as '{}'", report.model_path);
    out
}

/// Per-step timing breakdown for a classification.
pub fn format_timings(timings: &ClassifyTimings) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Timings:");
    let _ = writeln!(out, "  {:<26} {:>10.3} ms", "model loading", millis(timings.load));
    for (step, elapsed) in &timings.normalization.steps {
        let _ = writeln!(out, "  {:<26} {:>10.3} ms", step.label(), millis(*elapsed));
    }
    let _ = writeln!(
        out,
        "  {:<26} {:>10.3} ms",
        "normalization total",
        millis(timings.normalization.total())
    );
    let _ = write!(out, "  {:<26} {:>10.3} ms", "prediction", millis(timings.prediction));
    out
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
