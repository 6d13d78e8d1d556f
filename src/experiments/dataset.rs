// src/experiments/dataset.rs
use crate::domain::schema::{CATEGORICAL_FEATURES, NUMERICAL_FEATURES, TARGET_NAME};
use crate::domain::{FeatureValue, PropertyRecord};
use crate::errors::DataError;
use polars::prelude::*;
use tracing::info;

/// Turn the cleaned dataset into model rows and their target prices.
///
/// Numerical features are read as floats with nulls as 0. Text categoricals
/// stay text; numeric ones (flags, years, postal codes) become integers when
/// whole. Absent columns and nulls are `Missing`. Rows without a price are
/// dropped.
pub fn records_from_df(df: &DataFrame) -> Result<(Vec<PropertyRecord>, Vec<f64>), DataError> {
    let target_col = df
        .column(TARGET_NAME)
        .map_err(|_| DataError::MissingColumn(TARGET_NAME.to_string()))?
        .cast(&DataType::Float64)?;
    let target = target_col.f64()?;

    let mut numeric_cols = Vec::with_capacity(NUMERICAL_FEATURES.len());
    for name in NUMERICAL_FEATURES {
        let col = match df.column(name) {
            Ok(c) => Some(c.cast(&DataType::Float64)?),
            Err(_) => None,
        };
        numeric_cols.push((name, col));
    }

    let mut categorical_cols = Vec::with_capacity(CATEGORICAL_FEATURES.len());
    for name in CATEGORICAL_FEATURES {
        let col = match df.column(name) {
            Ok(c) if c.dtype() == &DataType::String => Some(c.clone()),
            Ok(c) => Some(c.cast(&DataType::Float64)?),
            Err(_) => None,
        };
        categorical_cols.push((name, col));
    }

    let mut rows = Vec::new();
    let mut prices = Vec::new();

    for i in 0..df.height() {
        let Some(price) = target.get(i) else {
            continue;
        };

        let mut record = PropertyRecord::new();

        for (name, col) in &numeric_cols {
            let value = match col {
                Some(c) => c.f64()?.get(i).unwrap_or(0.0),
                None => 0.0,
            };
            record.insert(*name, FeatureValue::Float(value));
        }

        for (name, col) in &categorical_cols {
            let value = match col {
                Some(c) if c.dtype() == &DataType::String => match c.str()?.get(i) {
                    Some(s) => FeatureValue::Text(s.to_string()),
                    None => FeatureValue::Missing,
                },
                Some(c) => match c.f64()?.get(i) {
                    Some(v) if v.fract() == 0.0 => FeatureValue::Integer(v as i64),
                    Some(v) => FeatureValue::Float(v),
                    None => FeatureValue::Missing,
                },
                None => FeatureValue::Missing,
            };
            record.insert(*name, value);
        }

        rows.push(record);
        prices.push(price);
    }

    info!(rows = rows.len(), dropped = df.height() - rows.len(), "evaluation rows built");
    Ok((rows, prices))
}
