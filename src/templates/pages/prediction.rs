// templates/pages/prediction.rs
use crate::errors::PredictError;
use crate::predict::Prediction;
use crate::templates::{alert, AlertKind};
use maud::Markup;

/// Fragment swapped into `#prediction` after a submission.
pub fn prediction_result(outcome: &Result<Prediction, PredictError>) -> Markup {
    match outcome {
        Ok(prediction) => alert(AlertKind::Success, &prediction.to_string()),
        Err(err) => alert(AlertKind::Error, err.user_message()),
    }
}
