//! Versioned, checksummed model files.
//!
//! Layout, all integers little-endian:
//!
//! | bytes | field                          |
//! |-------|--------------------------------|
//! | 4     | magic `RTAG`                   |
//! | 4     | format version (`u32`)         |
//! | 4     | CRC32 of the payload (`u32`)   |
//! | 8     | payload length (`u64`)         |
//! | n     | bincode payload                |
//!
//! The payload is a tagged structure naming the model family, so new
//! families can be added without changing the header.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{ReeltagError, Result, ensure_exists};
use crate::model::one_vs_rest::{FittedOneVsRest, OneVsRestModel};
use crate::model::{GenreModel, ModelConfig};
use crate::storage::file::write_atomic;

/// File signature.
pub const MAGIC: &[u8; 4] = b"RTAG";

/// Current format version. Files with any other version are rejected.
pub const FORMAT_VERSION: u32 = 1;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 20;

#[derive(Serialize)]
enum SavedModelRef<'a> {
    Ovr {
        config: &'a ModelConfig,
        fitted: &'a FittedOneVsRest,
    },
}

// Must mirror `SavedModelRef` variant for variant, field for field.
#[derive(Deserialize)]
enum SavedModel {
    Ovr {
        config: ModelConfig,
        fitted: FittedOneVsRest,
    },
}

pub(crate) fn write_one_vs_rest(
    writer: &mut dyn Write,
    config: &ModelConfig,
    fitted: &FittedOneVsRest,
) -> Result<()> {
    let payload = bincode::serialize(&SavedModelRef::Ovr { config, fitted })
        .map_err(|e| ReeltagError::other(format!("Failed to encode model: {e}")))?;
    write_frame(writer, &payload)
}

fn write_frame(writer: &mut dyn Write, payload: &[u8]) -> Result<()> {
    writer.write_all(MAGIC)?;
    writer.write_u32::<LittleEndian>(FORMAT_VERSION)?;
    writer.write_u32::<LittleEndian>(crc32fast::hash(payload))?;
    writer.write_u64::<LittleEndian>(payload.len() as u64)?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let truncated = |_| ReeltagError::corrupt_model("truncated header");

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(truncated)?;
    if &magic != MAGIC {
        return Err(ReeltagError::corrupt_model("not a reeltag model file"));
    }

    let version = reader.read_u32::<LittleEndian>().map_err(truncated)?;
    if version != FORMAT_VERSION {
        return Err(ReeltagError::corrupt_model(format!(
            "unsupported format version {version}, expected {FORMAT_VERSION}"
        )));
    }

    let checksum = reader.read_u32::<LittleEndian>().map_err(truncated)?;
    let length = reader.read_u64::<LittleEndian>().map_err(truncated)?;

    let mut payload = Vec::new();
    reader
        .take(length)
        .read_to_end(&mut payload)
        .map_err(|e| ReeltagError::corrupt_model(format!("failed to read payload: {e}")))?;
    if payload.len() as u64 != length {
        return Err(ReeltagError::corrupt_model(format!(
            "payload truncated: expected {length} bytes, found {}",
            payload.len()
        )));
    }

    if crc32fast::hash(&payload) != checksum {
        return Err(ReeltagError::corrupt_model("checksum mismatch"));
    }
    Ok(payload)
}

/// Write a fitted model to `writer`.
pub fn save<W: Write>(model: &dyn GenreModel, writer: &mut W) -> Result<()> {
    model.save(writer)
}

/// Read a model written by [`save`].
pub fn load<R: Read>(reader: &mut R) -> Result<Box<dyn GenreModel>> {
    let payload = read_frame(reader)?;
    let saved: SavedModel = bincode::deserialize(&payload)
        .map_err(|e| ReeltagError::corrupt_model(format!("failed to decode payload: {e}")))?;

    match saved {
        SavedModel::Ovr { config, fitted } => {
            let model = OneVsRestModel::from_parts(config, fitted).map_err(|e| {
                if matches!(e, ReeltagError::CorruptModel(_)) {
                    e
                } else {
                    ReeltagError::corrupt_model(e.to_string())
                }
            })?;
            Ok(Box::new(model))
        }
    }
}

/// Save a fitted model to `path`. The file is replaced atomically.
pub fn save_to_path<P: AsRef<Path>>(model: &dyn GenreModel, path: P) -> Result<()> {
    if !model.is_fitted() {
        return Err(ReeltagError::not_fitted("only fitted models can be saved"));
    }
    let path = path.as_ref();
    write_atomic(path, |file| model.save(file))?;
    info!("saved {} model to {}", model.family(), path.display());
    Ok(())
}

/// Load a model from `path`.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Box<dyn GenreModel>> {
    let path = path.as_ref();
    ensure_exists(path)?;
    let mut reader = BufReader::new(File::open(path)?);
    let model = load(&mut reader)?;
    info!("loaded {} model from {}", model.family(), path.display());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::vectorizer::{DocumentFrequency, VectorizerConfig};
    use crate::model::build_model;

    fn fitted_model() -> Box<dyn GenreModel> {
        let config = ModelConfig {
            num_threads: 1,
            vectorizer: VectorizerConfig {
                min_df: DocumentFrequency::Count(1),
                ..VectorizerConfig::default()
            },
            ..ModelConfig::default()
        };
        let mut model = build_model(config).unwrap();
        let texts: Vec<String> = ["haunted house ghost", "ghost story night", "car chase heist"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let labels = vec![
            vec!["Horror".to_string()],
            vec!["Horror".to_string()],
            vec!["Action".to_string()],
        ];
        model.fit(&texts, &labels).unwrap();
        model
    }

    fn encoded() -> Vec<u8> {
        let mut bytes = Vec::new();
        save(fitted_model().as_ref(), &mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_header_layout() {
        let bytes = encoded();
        assert_eq!(&bytes[..4], b"RTAG");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), FORMAT_VERSION);
        let length = u64::from_le_bytes(bytes[12..20].try_into().unwrap());
        assert_eq!(length as usize, bytes.len() - HEADER_LEN);
        let checksum = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
        assert_eq!(checksum, crc32fast::hash(&bytes[HEADER_LEN..]));
    }

    #[test]
    fn test_round_trip() {
        let model = fitted_model();
        let mut bytes = Vec::new();
        save(model.as_ref(), &mut bytes).unwrap();

        let loaded = load(&mut bytes.as_slice()).unwrap();
        assert_eq!(loaded.labels(), model.labels());
        assert_eq!(loaded.metadata(), model.metadata());
        assert_eq!(loaded.config(), model.config());
        assert_eq!(
            loaded.predict_single("Ghost", "a haunted night").unwrap(),
            model.predict_single("Ghost", "a haunted night").unwrap()
        );
    }

    fn assert_corrupt(bytes: &[u8]) {
        let mut reader = bytes;
        assert!(matches!(load(&mut reader), Err(ReeltagError::CorruptModel(_))));
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut bytes = encoded();
        bytes[0] = b'X';
        assert_corrupt(&bytes);
    }

    #[test]
    fn test_rejects_other_version() {
        let mut bytes = encoded();
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());
        assert_corrupt(&bytes);
    }

    #[test]
    fn test_rejects_flipped_payload_byte() {
        let mut bytes = encoded();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        assert_corrupt(&bytes);
    }

    #[test]
    fn test_rejects_truncation() {
        let bytes = encoded();
        assert_corrupt(&bytes[..bytes.len() - 5]);
        assert_corrupt(&bytes[..10]);
        assert_corrupt(&[]);
    }

    #[test]
    fn test_rejects_garbage_payload_with_valid_checksum() {
        let payload = vec![0xffu8; 16];
        let mut bytes = Vec::new();
        write_frame(&mut bytes, &payload).unwrap();
        assert_corrupt(&bytes);
    }

    #[test]
    fn test_path_round_trip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.rtag");

        let model = fitted_model();
        save_to_path(model.as_ref(), &path).unwrap();
        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded.labels(), model.labels());

        assert!(matches!(
            load_from_path(dir.path().join("absent.rtag")),
            Err(ReeltagError::MissingFile(_))
        ));
    }

    #[test]
    fn test_unfitted_model_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.rtag");
        let model = build_model(ModelConfig::default()).unwrap();

        assert!(matches!(
            save_to_path(model.as_ref(), &path),
            Err(ReeltagError::NotFitted(_))
        ));
        assert!(!path.exists());
    }
}
