// src/config.rs
use crate::domain::{NullConvention, PayloadOptions};
use crate::predict::{LocalModelPredictor, Predictor, RemotePredictor};
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// House price prediction form
#[derive(Parser, Debug)]
#[command(name = "price-form")]
#[command(about = "Collects property attributes and predicts a sale price")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the prediction form
    Serve(ServeArgs),
    /// Compare candidate pipelines with k-fold cross-validation
    Evaluate(EvaluateArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Load the model artifact and predict in-process
    Local,
    /// Post the record to a hosted prediction API
    Remote,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen address
    #[arg(long, default_value = "127.0.0.1:3000", env = "PRICE_FORM_LISTEN")]
    pub listen: SocketAddr,

    /// Worker threads serving requests
    #[arg(long, default_value = "8", env = "PRICE_FORM_WORKERS")]
    pub workers: usize,

    /// Semicolon-delimited postal code reference file
    #[arg(long, default_value = "data/postal_codes.csv", env = "PRICE_FORM_REFERENCE")]
    pub reference: PathBuf,

    /// Cleaned listings dataset used for dropdown values
    #[arg(long, default_value = "data/cleaned.csv", env = "PRICE_FORM_DATASET")]
    pub dataset: PathBuf,

    /// Prediction strategy
    #[arg(long, value_enum, default_value = "local", env = "PRICE_FORM_STRATEGY")]
    pub strategy: Strategy,

    /// Model artifact for the local strategy
    #[arg(long, default_value = "data/model.json", env = "PRICE_FORM_MODEL")]
    pub model: PathBuf,

    /// Prediction endpoint for the remote strategy
    #[arg(long, env = "PRICE_FORM_API_URL")]
    pub api_url: Option<String>,

    /// How unset selections are sent; defaults to the strategy's convention
    #[arg(long, value_enum, env = "PRICE_FORM_NULL_CONVENTION")]
    pub null_convention: Option<NullConvention>,
}

impl ServeArgs {
    pub fn build_predictor(&self) -> anyhow::Result<Box<dyn Predictor>> {
        match self.strategy {
            Strategy::Local => Ok(Box::new(LocalModelPredictor::new(self.model.clone()))),
            Strategy::Remote => {
                let Some(url) = self.api_url.as_deref() else {
                    bail!("--api-url is required with --strategy remote");
                };
                let predictor = RemotePredictor::new(url)
                    .with_context(|| format!("cannot use prediction endpoint {url}"))?;
                Ok(Box::new(predictor))
            }
        }
    }

    /// Strategy defaults with the null convention override applied.
    pub fn payload_options(&self, predictor: &dyn Predictor) -> PayloadOptions {
        let mut options = predictor.payload_options();
        if let Some(convention) = self.null_convention {
            options.null_convention = convention;
        }
        options
    }
}

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Cleaned listings dataset with a `price` column
    #[arg(long, default_value = "data/cleaned.csv", env = "PRICE_FORM_DATASET")]
    pub dataset: PathBuf,

    /// Number of folds
    #[arg(long, default_value = "5")]
    pub folds: usize,

    /// Shuffle rows with this seed before splitting
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where the chart and workbook are written
    #[arg(long, default_value = "reports")]
    pub out_dir: PathBuf,

    /// X-axis label of the comparison chart
    #[arg(long, default_value = "preprocessor")]
    pub label: String,
}

impl EvaluateArgs {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.folds < 2 {
            bail!("--folds must be at least 2");
        }
        Ok(())
    }
}
