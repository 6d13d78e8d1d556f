// src/data/values.rs
use crate::errors::DataError;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Distinct text values of `column_name`, sorted ascending.
///
/// Nulls are skipped. A column that does not hold text yields nothing, so the
/// caller never sees a numeric option in a dropdown.
pub fn get_values_from_df(column_name: &str, df: &DataFrame) -> Result<Vec<String>, DataError> {
    let column = df
        .column(column_name)
        .map_err(|_| DataError::MissingColumn(column_name.to_string()))?;

    if column.dtype() != &DataType::String {
        return Ok(Vec::new());
    }

    let distinct: BTreeSet<&str> = column.str()?.into_iter().flatten().collect();

    Ok(distinct.into_iter().map(str::to_string).collect())
}

/// Rows of `df` whose text column `column_name` equals `value`.
pub fn filter_equal(df: &DataFrame, column_name: &str, value: &str) -> Result<DataFrame, DataError> {
    let column = df
        .column(column_name)
        .map_err(|_| DataError::MissingColumn(column_name.to_string()))?;

    let mask = column.str()?.equal(value);

    Ok(df.filter(&mask)?)
}
