// src/data/cleaner.rs
use crate::errors::DataError;
use polars::prelude::*;
use std::path::PathBuf;
use tracing::info;

/// Produces the cleaned, canonical listings dataframe the form and the
/// offline experiments are built from.
pub trait Cleaner {
    fn clean_data(&self) -> Result<DataFrame, DataError>;
}

/// A cleaner whose output was already written to a comma-separated file.
#[derive(Debug, Clone)]
pub struct CsvCleaner {
    path: PathBuf,
}

impl CsvCleaner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Cleaner for CsvCleaner {
    fn clean_data(&self) -> Result<DataFrame, DataError> {
        if !self.path.is_file() {
            return Err(DataError::Unreadable {
                path: self.path.display().to_string(),
                reason: "file does not exist".into(),
            });
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10_000))
            .try_into_reader_with_file_path(Some(self.path.clone()))?
            .finish()?;

        info!(
            path = %self.path.display(),
            rows = df.height(),
            columns = df.width(),
            "cleaned dataset loaded"
        );

        Ok(df)
    }
}
