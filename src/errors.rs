use astra::Response;
// errors.rs
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, bad form input, etc.) or downstream layers (data, spreadsheets).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Data Error: {0}")]
    Data(#[from] DataError),

    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),

    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

/// Failures while loading or querying the reference table and the cleaned dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("polars: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("column `{0}` not found")]
    MissingColumn(String),

    #[error("cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Failures of a prediction strategy. These are shown to the user, never
/// turned into an error page.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("model artifact not found at {path}")]
    ModelNotFound { path: String },

    #[error("model artifact is invalid: {0}")]
    InvalidModel(String),

    #[error("prediction request failed: {0}")]
    RequestFailed(String),

    #[error("model returned no prediction")]
    EmptyPrediction,
}

impl PredictError {
    /// Message rendered in the result alert.
    pub fn user_message(&self) -> &'static str {
        match self {
            PredictError::ModelNotFound { .. } => {
                "Model file not found. Please train the model first."
            }
            PredictError::InvalidModel(_) => "Model file is unreadable. Please retrain the model.",
            PredictError::RequestFailed(_) => "Prediction request failed. Please try again later.",
            PredictError::EmptyPrediction => "The model did not return a prediction.",
        }
    }
}

/// Failures of the offline model-selection workflow.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("need between 2 and {rows} folds, got {folds}")]
    InvalidFolds { folds: usize, rows: usize },

    #[error("{rows} rows but {targets} target values")]
    LengthMismatch { rows: usize, targets: usize },

    #[error("cannot fit on an empty training set")]
    EmptyTrainingSet,

    #[error(transparent)]
    Data(#[from] DataError),
}
