//! Benchmarks for normalization and genre prediction.

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};

use reeltag::analysis::normalizer::{Normalizer, NormalizerConfig};
use reeltag::model::{GenreModel, ModelConfig, build_model};

const GENRES: [(&str, [&str; 4]); 4] = [
    ("Action", ["explosion", "chase", "gunfight", "mercenary"]),
    ("Comedy", ["prank", "hilarious", "wacky", "roommate"]),
    ("Horror", ["haunted", "demon", "ghost", "cursed"]),
    ("Romance", ["love", "wedding", "kiss", "heartbreak"]),
];

/// Generate synthetic overviews drawing keywords from one or two genres.
fn generate_examples(count: usize) -> (Vec<String>, Vec<Vec<String>>) {
    let filler = ["the", "city", "night", "family", "secret", "journey", "old"];
    let mut texts = Vec::with_capacity(count);
    let mut labels = Vec::with_capacity(count);

    for i in 0..count {
        let first = i % GENRES.len();
        let second = (i * 7 + 3) % GENRES.len();
        let mut words = Vec::new();
        let mut genres = vec![GENRES[first].0.to_string()];
        for j in 0..12 {
            words.push(filler[(i + j * 5) % filler.len()]);
            words.push(GENRES[first].1[(i + j) % 4]);
        }
        if i % 3 == 0 && second != first {
            words.push(GENRES[second].1[i % 4]);
            words.push(GENRES[second].1[(i + 1) % 4]);
            genres.push(GENRES[second].0.to_string());
        }
        texts.push(words.join(" "));
        labels.push(genres);
    }

    (texts, labels)
}

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    let normalizer = Normalizer::new(NormalizerConfig::default()).unwrap();
    let lemmatizing = Normalizer::new(NormalizerConfig {
        lemmatize: true,
        ..Default::default()
    })
    .unwrap();
    let overview = "When a powerful satellite system falls into the hands of a \
                    crime syndicate, James Bond must travel to St. Petersburg in 1995 \
                    to stop the 3 people behind it... before it's too late!";

    group.bench_function("normalize_overview", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(overview))))
    });

    group.bench_function("normalize_overview_lemmatized", |b| {
        b.iter(|| black_box(lemmatizing.normalize(black_box(overview))))
    });

    group.bench_function("normalize_with_timings", |b| {
        b.iter(|| black_box(normalizer.normalize_with_timings(black_box(overview))))
    });

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");
    group.sample_size(20);

    let (texts, labels) = generate_examples(400);
    let mut model = build_model(ModelConfig::default()).unwrap();
    model.fit(&texts, &labels).unwrap();

    group.bench_function("predict_single", |b| {
        b.iter(|| {
            black_box(model.predict_single(
                black_box("The Haunting"),
                black_box("A cursed family moves into a haunted house full of ghosts."),
            ))
        })
    });

    let batch: Vec<String> = texts.iter().take(100).cloned().collect();
    group.throughput(Throughput::Elements(batch.len() as u64));
    group.bench_function("predict_batch", |b| {
        b.iter(|| black_box(model.predict(black_box(&batch))))
    });

    group.finish();
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10);

    let (texts, labels) = generate_examples(400);
    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("fit_one_vs_rest", |b| {
        b.iter(|| {
            let mut model = build_model(ModelConfig::default()).unwrap();
            model.fit(black_box(&texts), black_box(&labels)).unwrap();
            black_box(model)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_normalization, bench_prediction, bench_training);
criterion_main!(benches);
