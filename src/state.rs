// src/state.rs
use crate::config::ServeArgs;
use crate::data::{load_reference, Cleaner, CsvCleaner};
use crate::domain::{FormOptions, PayloadOptions};
use crate::predict::Predictor;
use anyhow::Context;
use polars::prelude::DataFrame;
use tracing::info;

/// Everything a request needs; built once, shared read-only by the workers.
pub struct AppState {
    pub reference: DataFrame,
    pub options: FormOptions,
    pub predictor: Box<dyn Predictor>,
    pub payload: PayloadOptions,
}

impl AppState {
    pub fn new(
        reference: DataFrame,
        options: FormOptions,
        predictor: Box<dyn Predictor>,
        payload: PayloadOptions,
    ) -> Self {
        Self {
            reference,
            options,
            predictor,
            payload,
        }
    }

    pub fn from_args(args: &ServeArgs) -> anyhow::Result<Self> {
        let reference = load_reference(&args.reference)
            .with_context(|| format!("loading reference table {}", args.reference.display()))?;

        let dataset = CsvCleaner::new(&args.dataset)
            .clean_data()
            .with_context(|| format!("loading cleaned dataset {}", args.dataset.display()))?;
        let options = FormOptions::from_dataset(&dataset)?;

        let predictor = args.build_predictor()?;
        let payload = args.payload_options(predictor.as_ref());

        info!(
            strategy = predictor.name(),
            null_convention = ?payload.null_convention,
            post_code_as_integer = payload.post_code_as_integer,
            "prediction strategy ready"
        );

        Ok(Self::new(reference, options, predictor, payload))
    }
}
