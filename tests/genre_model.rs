//! Integration tests for fitting, evaluating and persisting genre models.

use reeltag::error::{ReeltagError, Result};
use reeltag::ml::estimator::EstimatorConfig;
use reeltag::model::persistence::{load, load_from_path, save, save_to_path};
use reeltag::model::{GenreModel, ModelConfig, build_model};

const GENRES: [(&str, [&str; 6]); 4] = [
    (
        "Action",
        ["explosion", "chase", "gunfight", "mercenary", "heist", "commando"],
    ),
    (
        "Comedy",
        ["prank", "wacky", "hilarious", "slapstick", "goofy", "sitcom"],
    ),
    (
        "Horror",
        ["ghost", "haunted", "demon", "scream", "curse", "possessed"],
    ),
    (
        "Romance",
        ["love", "wedding", "kiss", "heart", "sweetheart", "courtship"],
    ),
];

const FILLER: [&str; 5] = ["city", "family", "night", "friends", "journey"];

/// Deterministic multi-label corpus where each genre has its own keywords.
fn corpus() -> (Vec<String>, Vec<Vec<String>>) {
    let mut texts = Vec::new();
    let mut labels = Vec::new();
    for i in 0..80 {
        let first = i % 4;
        let mut genres = vec![first];
        if i % 3 == 0 {
            genres.push((first + 1 + i / 4 % 3) % 4);
        }

        let mut words = Vec::new();
        for (k, &g) in genres.iter().enumerate() {
            let keywords = GENRES[g].1;
            words.push(keywords[(i + k) % 6]);
            words.push(keywords[(i + k + 2) % 6]);
        }
        words.push(FILLER[i % 5]);
        words.push(FILLER[(i + 2) % 5]);

        texts.push(words.join(" "));
        let mut names: Vec<String> = genres.iter().map(|&g| GENRES[g].0.to_string()).collect();
        names.sort();
        labels.push(names);
    }
    (texts, labels)
}

fn config() -> ModelConfig {
    ModelConfig {
        num_threads: 2,
        ..ModelConfig::default()
    }
}

fn fitted(config: ModelConfig) -> Result<Box<dyn GenreModel>> {
    let (texts, labels) = corpus();
    let mut model = build_model(config)?;
    model.fit(&texts, &labels)?;
    Ok(model)
}

#[test]
fn test_training_data_is_learned() -> Result<()> {
    let (texts, labels) = corpus();
    let model = fitted(config())?;

    assert_eq!(model.labels(), &["Action", "Comedy", "Horror", "Romance"]);
    let stats = model.get_stats(&texts, &labels)?;
    assert!(stats.f1 > 0.5, "{stats}");
    assert!(stats.precision > 0.0 && stats.recall > 0.0);
    Ok(())
}

#[test]
fn test_linear_svm_is_learned() -> Result<()> {
    let (texts, labels) = corpus();
    let model = fitted(ModelConfig {
        estimator: EstimatorConfig::linear_svm(),
        ..config()
    })?;

    let stats = model.get_stats(&texts, &labels)?;
    assert!(stats.f1 > 0.5, "{stats}");
    Ok(())
}

#[test]
fn test_predict_single_stays_in_label_universe() -> Result<()> {
    let model = fitted(config())?;

    for (title, description) in [
        ("The Haunting", "A possessed family hears a ghost scream at night."),
        ("Ka-Boom 2", "Mercenary commandos plan 1 last heist!"),
        ("Untitled", "Nothing here matches anything at all."),
        ("", ""),
    ] {
        let genres = model.predict_single(title, description)?;
        for genre in &genres {
            assert!(model.labels().contains(genre), "{genre}");
        }
    }

    let genres = model.predict_single("The Haunting", "A haunted house, a demon and a curse.")?;
    assert!(genres.contains(&"Horror".to_string()), "{genres:?}");
    Ok(())
}

#[test]
fn test_predict_before_fit() -> Result<()> {
    let model = build_model(config())?;
    assert!(matches!(
        model.predict(&["ghost".to_string()]),
        Err(ReeltagError::NotFitted(_))
    ));
    assert!(matches!(
        model.get_stats(&["ghost".to_string()], &[vec!["Horror".to_string()]]),
        Err(ReeltagError::NotFitted(_))
    ));
    Ok(())
}

#[test]
fn test_fit_rejects_mismatched_lengths() -> Result<()> {
    let (texts, labels) = corpus();
    let mut model = build_model(config())?;
    assert!(matches!(
        model.fit(&texts[..10], &labels[..9]),
        Err(ReeltagError::InvalidInput(_))
    ));
    Ok(())
}

#[test]
fn test_invalid_threshold() {
    for threshold in [-0.5, 1.5, f64::NAN] {
        let result = build_model(ModelConfig {
            threshold,
            ..config()
        });
        assert!(matches!(result, Err(ReeltagError::Configuration(_))));
    }
}

#[test]
fn test_threshold_bounds() -> Result<()> {
    let (texts, _) = corpus();

    let everything = fitted(ModelConfig {
        threshold: 0.0,
        ..config()
    })?;
    for genres in everything.predict(&texts)? {
        assert_eq!(genres.len(), 4);
    }

    let nothing = fitted(ModelConfig {
        threshold: 1.0,
        ..config()
    })?;
    for genres in nothing.predict(&texts)? {
        assert!(genres.is_empty());
    }
    Ok(())
}

#[test]
fn test_certain_label_survives_threshold_of_one() -> Result<()> {
    let (texts, mut labels) = corpus();
    for genres in &mut labels {
        genres.push("Feature".to_string());
    }

    let mut model = build_model(ModelConfig {
        threshold: 1.0,
        ..config()
    })?;
    model.fit(&texts, &labels)?;

    // probability 1.0 meets a threshold of 1.0
    for genres in model.predict(&texts)? {
        assert_eq!(genres, vec!["Feature".to_string()]);
    }
    let single = model.predict_single("Untitled", "A ghost haunts a wedding")?;
    assert_eq!(single, vec!["Feature".to_string()]);
    Ok(())
}

#[test]
fn test_save_load_preserves_predictions() -> Result<()> {
    let (texts, _) = corpus();
    let model = fitted(config())?;

    let mut bytes = Vec::new();
    save(model.as_ref(), &mut bytes)?;
    let restored = load(&mut bytes.as_slice())?;
    assert_eq!(restored.predict(&texts)?, model.predict(&texts)?);

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("genres.rtag");
    save_to_path(model.as_ref(), &path)?;
    let restored = load_from_path(&path)?;
    assert_eq!(restored.predict(&texts)?, model.predict(&texts)?);
    assert_eq!(restored.metadata(), model.metadata());
    Ok(())
}

#[test]
fn test_corrupt_model_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("broken.rtag");
    std::fs::write(&path, b"RTAG but not really a model")?;
    assert!(matches!(
        load_from_path(&path),
        Err(ReeltagError::CorruptModel(_))
    ));
    Ok(())
}
