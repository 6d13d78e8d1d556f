// src/predict/local.rs
use crate::domain::{PayloadOptions, PropertyRecord};
use crate::errors::PredictError;
use crate::predict::{Prediction, Predictor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// A fitted pipeline: takes rows, returns one prediction per row.
pub trait Model {
    fn predict(&self, rows: &[PropertyRecord]) -> Vec<Prediction>;
}

/// Linear pipeline with one-hot encoded categoricals, persisted as JSON.
///
/// ```json
/// {
///   "intercept": 80000.0,
///   "numerical": { "habitableSurface": 2100.0 },
///   "categorical": { "postCode": { "1000": 45000.0 } },
///   "required": ["postCode"],
///   "log_target": false
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    #[serde(default)]
    pub numerical: HashMap<String, f64>,
    /// feature -> category -> weight. Unseen categories weigh nothing.
    #[serde(default)]
    pub categorical: HashMap<String, HashMap<String, f64>>,
    /// Features the model refuses to predict without.
    #[serde(default)]
    pub required: Vec<String>,
    /// The model was fitted on ln(price).
    #[serde(default)]
    pub log_target: bool,
}

impl LinearModel {
    fn predict_one(&self, row: &PropertyRecord) -> Prediction {
        if let Some(missing) = self
            .required
            .iter()
            .find(|name| row.get(name).and_then(|v| v.category()).is_none())
        {
            return Prediction::Message(format!("Missing value for {missing}"));
        }

        let numerical: f64 = self
            .numerical
            .iter()
            .map(|(name, coef)| coef * row.get(name).and_then(|v| v.as_f64()).unwrap_or(0.0))
            .sum();

        let categorical: f64 = self
            .categorical
            .iter()
            .filter_map(|(name, weights)| {
                let key = row.get(name)?.category()?;
                weights.get(&key).copied()
            })
            .sum();

        let raw = self.intercept + numerical + categorical;
        Prediction::Price(if self.log_target { raw.exp() } else { raw })
    }
}

impl Model for LinearModel {
    fn predict(&self, rows: &[PropertyRecord]) -> Vec<Prediction> {
        rows.iter().map(|row| self.predict_one(row)).collect()
    }
}

/// Opens the artifact on every request, so a retrained model is picked up
/// without a restart.
#[derive(Debug, Clone)]
pub struct LocalModelPredictor {
    path: PathBuf,
}

impl LocalModelPredictor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load_model(&self) -> Result<LinearModel, PredictError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "model artifact unreadable");
            PredictError::ModelNotFound {
                path: self.path.display().to_string(),
            }
        })?;

        serde_json::from_str(&raw).map_err(|e| PredictError::InvalidModel(e.to_string()))
    }
}

impl Predictor for LocalModelPredictor {
    fn name(&self) -> &'static str {
        "local"
    }

    fn payload_options(&self) -> PayloadOptions {
        PayloadOptions::local()
    }

    fn predict(&self, record: &PropertyRecord) -> Result<Prediction, PredictError> {
        let model = self.load_model()?;

        model
            .predict(std::slice::from_ref(record))
            .into_iter()
            .next()
            .ok_or(PredictError::EmptyPrediction)
    }
}
