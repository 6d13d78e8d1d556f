// src/experiments/cv.rs
use crate::domain::PropertyRecord;
use crate::errors::ExperimentError;
use crate::experiments::pipelines::Regressor;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CvOptions {
    pub folds: usize,
    /// Shuffle before splitting. `None` keeps rows in order.
    pub shuffle_seed: Option<u64>,
}

impl Default for CvOptions {
    fn default() -> Self {
        Self {
            folds: 5,
            shuffle_seed: None,
        }
    }
}

/// Mean absolute error per fold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CvScores {
    pub train_mae: Vec<f64>,
    pub test_mae: Vec<f64>,
}

/// One line of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub preprocessor: String,
    pub mae_test_mean: f64,
    pub mae_test_std: f64,
    pub mae_train_mean: f64,
    pub mae_train_std: f64,
}

/// Test indices of each fold. The first `n % k` folds hold one extra row.
pub fn kfold_indices(
    n: usize,
    options: &CvOptions,
) -> Result<Vec<Vec<usize>>, ExperimentError> {
    let k = options.folds;
    if k < 2 || k > n {
        return Err(ExperimentError::InvalidFolds { folds: k, rows: n });
    }

    let mut order: Vec<usize> = (0..n).collect();
    if let Some(seed) = options.shuffle_seed {
        order.shuffle(&mut StdRng::seed_from_u64(seed));
    }

    let base = n / k;
    let extra = n % k;
    let mut folds = Vec::with_capacity(k);
    let mut start = 0;
    for fold in 0..k {
        let size = base + usize::from(fold < extra);
        folds.push(order[start..start + size].to_vec());
        start += size;
    }

    Ok(folds)
}

pub fn cross_validate<R: Regressor + ?Sized>(
    rows: &[PropertyRecord],
    target: &[f64],
    pipe: &mut R,
    options: &CvOptions,
) -> Result<CvScores, ExperimentError> {
    if rows.len() != target.len() {
        return Err(ExperimentError::LengthMismatch {
            rows: rows.len(),
            targets: target.len(),
        });
    }

    let mut scores = CvScores::default();

    for test_idx in kfold_indices(rows.len(), options)? {
        let mut in_test = vec![false; rows.len()];
        for &i in &test_idx {
            in_test[i] = true;
        }
        let train_idx: Vec<usize> = (0..rows.len()).filter(|&i| !in_test[i]).collect();

        let (train_rows, train_y) = gather(rows, target, &train_idx);
        let (test_rows, test_y) = gather(rows, target, &test_idx);

        pipe.fit(&train_rows, &train_y)?;

        scores.train_mae.push(mae(&pipe.predict(&train_rows), &train_y));
        scores.test_mae.push(mae(&pipe.predict(&test_rows), &test_y));
    }

    Ok(scores)
}

/// Cross-validate `pipe` and return `results` with its summary appended.
/// `results` itself is left untouched.
pub fn evaluate_model_and_store<R: Regressor + ?Sized>(
    rows: &[PropertyRecord],
    target: &[f64],
    name: &str,
    pipe: &mut R,
    options: &CvOptions,
    results: &[EvaluationSummary],
) -> Result<Vec<EvaluationSummary>, ExperimentError> {
    let scores = cross_validate(rows, target, pipe, options)?;

    let summary = EvaluationSummary {
        preprocessor: name.to_string(),
        mae_test_mean: mean(&scores.test_mae),
        mae_test_std: std_dev(&scores.test_mae),
        mae_train_mean: mean(&scores.train_mae),
        mae_train_std: std_dev(&scores.train_mae),
    };

    info!(
        preprocessor = name,
        mae_test_mean = summary.mae_test_mean,
        mae_train_mean = summary.mae_train_mean,
        "pipeline evaluated"
    );

    let mut out = results.to_vec();
    out.push(summary);
    Ok(out)
}

fn gather(rows: &[PropertyRecord], target: &[f64], idx: &[usize]) -> (Vec<PropertyRecord>, Vec<f64>) {
    idx.iter().map(|&i| (rows[i].clone(), target[i])).unzip()
}

fn mae(predicted: &[f64], actual: &[f64]) -> f64 {
    let total: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a).abs())
        .sum();
    total / actual.len() as f64
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}
