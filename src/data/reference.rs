// src/data/reference.rs
//! Postal-code reference table: one row per (postal code, sub-municipality),
//! carrying the administrative divisions above it.

use crate::errors::DataError;
use polars::prelude::*;
use std::path::Path;
use tracing::info;

// Headers of the published semicolon-delimited postal code file.
const SRC_POST_CODE: &str = "Postal Code";
const SRC_REGION: &str = "Region name (French)";
const SRC_PROVINCE: &str = "Province name (French)";
const SRC_ARRONDISSEMENT: &str = "Arrondissement name (French)";
const SRC_MUNICIPALITY_FR: &str = "Municipality name (French)";
const SRC_MUNICIPALITY_NL: &str = "Municipality name (Dutch)";
const SRC_SUB_MUNICIPALITY_FR: &str = "Sub-municipality name (French)";
const SRC_SUB_MUNICIPALITY_NL: &str = "Sub-municipality name (Dutch)";

/// One step of the geographic selection chain, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoLevel {
    Region,
    Province,
    Arrondissement,
    Municipality,
    SubMunicipality,
    PostCode,
}

impl GeoLevel {
    pub const ALL: [GeoLevel; 6] = [
        GeoLevel::Region,
        GeoLevel::Province,
        GeoLevel::Arrondissement,
        GeoLevel::Municipality,
        GeoLevel::SubMunicipality,
        GeoLevel::PostCode,
    ];

    /// Canonical column name. Also used as the form field name.
    pub fn column(self) -> &'static str {
        match self {
            GeoLevel::Region => "region",
            GeoLevel::Province => "province",
            GeoLevel::Arrondissement => "arrondissement",
            GeoLevel::Municipality => "municipality",
            GeoLevel::SubMunicipality => "subMunicipality",
            GeoLevel::PostCode => "postCode",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GeoLevel::Region => "Region",
            GeoLevel::Province => "Province",
            GeoLevel::Arrondissement => "Arrondissement",
            GeoLevel::Municipality => "Municipality",
            GeoLevel::SubMunicipality => "Sub-municipality",
            GeoLevel::PostCode => "Post code",
        }
    }
}

/// Read the reference file and rename it to canonical columns.
pub fn load_reference(path: &Path) -> Result<DataFrame, DataError> {
    if !path.is_file() {
        return Err(DataError::Unreadable {
            path: path.display().to_string(),
            reason: "file does not exist".into(),
        });
    }

    // Every column is read as text; postal codes are identifiers, not numbers.
    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_separator(b';'))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let df = canonicalize(&raw)?;

    info!(path = %path.display(), rows = df.height(), "reference table loaded");
    Ok(df)
}

/// Project the raw file onto the canonical columns, coalescing the French and
/// Dutch municipality names (French wins).
pub fn canonicalize(raw: &DataFrame) -> Result<DataFrame, DataError> {
    let municipality = coalesce(
        text_column(raw, SRC_MUNICIPALITY_FR)?,
        text_column(raw, SRC_MUNICIPALITY_NL)?,
    );
    let sub_municipality = coalesce(
        text_column(raw, SRC_SUB_MUNICIPALITY_FR)?,
        text_column(raw, SRC_SUB_MUNICIPALITY_NL)?,
    );

    let df = df!(
        GeoLevel::Region.column() => text_column(raw, SRC_REGION)?,
        GeoLevel::Province.column() => text_column(raw, SRC_PROVINCE)?,
        GeoLevel::Arrondissement.column() => text_column(raw, SRC_ARRONDISSEMENT)?,
        GeoLevel::Municipality.column() => municipality,
        GeoLevel::SubMunicipality.column() => sub_municipality,
        GeoLevel::PostCode.column() => text_column(raw, SRC_POST_CODE)?,
    )?;

    Ok(df)
}

/// Trimmed text values of a column; blank cells become null.
fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, DataError> {
    let column = df
        .column(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?
        .cast(&DataType::String)?;

    let values = column
        .str()?
        .into_iter()
        .map(|v| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .collect();

    Ok(values)
}

fn coalesce(preferred: Vec<Option<String>>, fallback: Vec<Option<String>>) -> Vec<Option<String>> {
    preferred
        .into_iter()
        .zip(fallback)
        .map(|(a, b)| a.or(b))
        .collect()
}
