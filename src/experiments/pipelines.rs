// src/experiments/pipelines.rs
use crate::domain::PropertyRecord;
use crate::errors::ExperimentError;
use crate::experiments::cv::mean;
use std::collections::HashMap;

/// A candidate pipeline. `fit` replaces whatever state a previous fit left.
pub trait Regressor {
    fn fit(&mut self, rows: &[PropertyRecord], target: &[f64]) -> Result<(), ExperimentError>;
    fn predict(&self, rows: &[PropertyRecord]) -> Vec<f64>;
}

fn check_lengths(rows: &[PropertyRecord], target: &[f64]) -> Result<(), ExperimentError> {
    if rows.len() != target.len() {
        return Err(ExperimentError::LengthMismatch {
            rows: rows.len(),
            targets: target.len(),
        });
    }
    if rows.is_empty() {
        return Err(ExperimentError::EmptyTrainingSet);
    }
    Ok(())
}

fn category_of(row: &PropertyRecord, feature: &str) -> Option<String> {
    row.get(feature).and_then(|v| v.category())
}

/// Always predicts the training mean.
#[derive(Debug, Clone, Default)]
pub struct MeanBaseline {
    mean: f64,
}

impl Regressor for MeanBaseline {
    fn fit(&mut self, rows: &[PropertyRecord], target: &[f64]) -> Result<(), ExperimentError> {
        check_lengths(rows, target)?;
        self.mean = mean(target);
        Ok(())
    }

    fn predict(&self, rows: &[PropertyRecord]) -> Vec<f64> {
        vec![self.mean; rows.len()]
    }
}

/// Mean price per value of one categorical feature; unseen or missing
/// values get the overall mean.
#[derive(Debug, Clone)]
pub struct GroupMeanRegressor {
    feature: &'static str,
    means: HashMap<String, f64>,
    fallback: f64,
}

impl GroupMeanRegressor {
    pub fn new(feature: &'static str) -> Self {
        Self {
            feature,
            means: HashMap::new(),
            fallback: 0.0,
        }
    }
}

impl Regressor for GroupMeanRegressor {
    fn fit(&mut self, rows: &[PropertyRecord], target: &[f64]) -> Result<(), ExperimentError> {
        check_lengths(rows, target)?;

        let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
        for (row, y) in rows.iter().zip(target) {
            if let Some(key) = category_of(row, self.feature) {
                let entry = sums.entry(key).or_insert((0.0, 0));
                entry.0 += y;
                entry.1 += 1;
            }
        }

        self.means = sums
            .into_iter()
            .map(|(key, (sum, n))| (key, sum / n as f64))
            .collect();
        self.fallback = mean(target);
        Ok(())
    }

    fn predict(&self, rows: &[PropertyRecord]) -> Vec<f64> {
        rows.iter()
            .map(|row| {
                category_of(row, self.feature)
                    .and_then(|key| self.means.get(&key).copied())
                    .unwrap_or(self.fallback)
            })
            .collect()
    }
}

const SURFACE: &str = "habitableSurface";

/// Price per habitable m², optionally learned per group.
#[derive(Debug, Clone)]
pub struct SurfaceRateRegressor {
    group: Option<&'static str>,
    rates: HashMap<String, f64>,
    fallback_rate: f64,
}

impl SurfaceRateRegressor {
    pub fn new() -> Self {
        Self {
            group: None,
            rates: HashMap::new(),
            fallback_rate: 0.0,
        }
    }

    pub fn grouped_by(feature: &'static str) -> Self {
        Self {
            group: Some(feature),
            ..Self::new()
        }
    }

    fn surface(row: &PropertyRecord) -> f64 {
        row.get(SURFACE).and_then(|v| v.as_f64()).unwrap_or(0.0)
    }
}

impl Default for SurfaceRateRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Regressor for SurfaceRateRegressor {
    fn fit(&mut self, rows: &[PropertyRecord], target: &[f64]) -> Result<(), ExperimentError> {
        check_lengths(rows, target)?;

        let mut total = (0.0, 0.0);
        let mut groups: HashMap<String, (f64, f64)> = HashMap::new();

        for (row, y) in rows.iter().zip(target) {
            let surface = Self::surface(row);
            if surface <= 0.0 {
                continue;
            }
            total.0 += y;
            total.1 += surface;

            if let Some(key) = self.group.and_then(|g| category_of(row, g)) {
                let entry = groups.entry(key).or_insert((0.0, 0.0));
                entry.0 += y;
                entry.1 += surface;
            }
        }

        if total.1 == 0.0 {
            return Err(ExperimentError::EmptyTrainingSet);
        }

        self.fallback_rate = total.0 / total.1;
        self.rates = groups
            .into_iter()
            .map(|(key, (price, surface))| (key, price / surface))
            .collect();
        Ok(())
    }

    fn predict(&self, rows: &[PropertyRecord]) -> Vec<f64> {
        rows.iter()
            .map(|row| {
                let rate = self
                    .group
                    .and_then(|g| category_of(row, g))
                    .and_then(|key| self.rates.get(&key).copied())
                    .unwrap_or(self.fallback_rate);
                rate * Self::surface(row)
            })
            .collect()
    }
}
