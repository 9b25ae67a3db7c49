//! Result persistence: measurement tables as CSV, summary and quality
//! reports as JSON.

mod tables;

pub use tables::{write_phoneme_table, write_word_table};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub(crate) fn io_error(path: &Path, source: std::io::Error) -> OutputError {
    OutputError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Persist any serializable record as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|source| OutputError::Json {
        path: path.display().to_string(),
        source,
    })
}
