// src/predict/mod.rs
mod local;
mod remote;

pub use local::{LinearModel, LocalModelPredictor, Model};
pub use remote::{interpret_response, RemotePredictor};

use crate::domain::{PayloadOptions, PropertyRecord};
use crate::errors::PredictError;
use serde_json::Value;
use std::fmt;

/// What a model or the remote API answered.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Price(f64),
    /// Text from the model or the API, shown verbatim.
    Message(String),
    /// Any other response shape, shown as received.
    Raw(Value),
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Price(price) => write!(f, "Predicted price is {price:.2}€"),
            Prediction::Message(msg) => write!(f, "{msg}"),
            Prediction::Raw(value) => write!(f, "{value}"),
        }
    }
}

/// A way of turning one property record into a prediction.
pub trait Predictor: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// How records for this predictor should be assembled by default.
    fn payload_options(&self) -> PayloadOptions;

    fn predict(&self, record: &PropertyRecord) -> Result<Prediction, PredictError>;
}
