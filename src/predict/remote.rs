// src/predict/remote.rs
use crate::domain::{PayloadOptions, PropertyRecord};
use crate::errors::PredictError;
use crate::predict::{Prediction, Predictor};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Posts the record as JSON to a hosted prediction service.
pub struct RemotePredictor {
    client: Client,
    endpoint: Url,
}

impl RemotePredictor {
    pub fn new(endpoint: &str) -> Result<Self, PredictError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| PredictError::RequestFailed(format!("invalid endpoint `{endpoint}`: {e}")))?;

        let client = Client::builder()
            .build()
            .map_err(|e| PredictError::RequestFailed(e.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

impl Predictor for RemotePredictor {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn payload_options(&self) -> PayloadOptions {
        PayloadOptions::remote()
    }

    fn predict(&self, record: &PropertyRecord) -> Result<Prediction, PredictError> {
        debug!(endpoint = %self.endpoint, features = record.len(), "posting prediction request");

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(record)
            .send()
            .map_err(|e| {
                warn!(endpoint = %self.endpoint, error = %e, "prediction request failed");
                PredictError::RequestFailed(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(PredictError::RequestFailed(format!(
                "endpoint answered {status}: {text}"
            )));
        }

        let body: Value = resp
            .json()
            .map_err(|e| PredictError::RequestFailed(format!("response is not JSON: {e}")))?;

        debug!(%body, "prediction response");
        Ok(interpret_response(body))
    }
}

/// A bare string is a message, an object with a numeric `price` is a price,
/// anything else is passed through.
pub fn interpret_response(body: Value) -> Prediction {
    match body {
        Value::String(msg) => Prediction::Message(msg),
        other => match other.get("price").and_then(Value::as_f64) {
            Some(price) => Prediction::Price(price),
            None => Prediction::Raw(other),
        },
    }
}
