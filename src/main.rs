use crate::config::{Cli, Command, EvaluateArgs, ServeArgs};
use crate::data::{Cleaner, CsvCleaner};
use crate::experiments::{
    evaluate_model_and_store, records_from_df, visualize_results, CvOptions, GroupMeanRegressor,
    MeanBaseline, Regressor, SurfaceRateRegressor,
};
use crate::router::handle;
use crate::spreadsheets::export_results_xlsx;
use crate::state::AppState;
use astra::Server;
use clap::Parser;
use std::fs;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod data;
mod domain;
mod errors;
mod experiments;
mod predict;
mod responses;
mod router;
mod spreadsheets;
mod state;
mod templates;

#[cfg(test)]
mod tests;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("price_form=info".parse()?))
        .init();

    match Cli::parse().command {
        Command::Serve(args) => serve(args),
        Command::Evaluate(args) => evaluate(args),
    }
}

fn serve(args: ServeArgs) -> anyhow::Result<()> {
    // 1️⃣ Reference table, dropdown domains and predictor
    let state = AppState::from_args(&args)?;

    // 2️⃣ Start the server
    info!(listen = %args.listen, workers = args.workers, "starting server");
    let server = Server::bind(&args.listen).max_workers(args.workers);

    // 3️⃣ Serve requests, passing the shared state into the closure
    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down cleanly");
    Ok(())
}

fn evaluate(args: EvaluateArgs) -> anyhow::Result<()> {
    args.validate()?;

    let df = CsvCleaner::new(&args.dataset).clean_data()?;
    let (rows, target) = records_from_df(&df)?;
    let options = CvOptions {
        folds: args.folds,
        shuffle_seed: args.seed,
    };

    let mut candidates = vec![
        candidate("mean", MeanBaseline::default()),
        candidate("postcode-mean", GroupMeanRegressor::new("postCode")),
        candidate("subtype-mean", GroupMeanRegressor::new("subtype")),
        candidate("surface-rate", SurfaceRateRegressor::new()),
        candidate(
            "surface-rate-by-province",
            SurfaceRateRegressor::grouped_by("province"),
        ),
    ];

    let mut results = Vec::new();
    for (name, pipe) in candidates.iter_mut() {
        results = evaluate_model_and_store(&rows, &target, *name, pipe.as_mut(), &options, &results)?;
    }

    fs::create_dir_all(&args.out_dir)?;

    let chart_path = args.out_dir.join("model_selection.html");
    fs::write(&chart_path, visualize_results(&results, &args.label).into_string())?;

    let workbook_path = args.out_dir.join("model_selection.xlsx");
    fs::write(&workbook_path, export_results_xlsx(&results, &args.label)?)?;

    info!(
        chart = %chart_path.display(),
        workbook = %workbook_path.display(),
        candidates = results.len(),
        "model selection report written"
    );
    Ok(())
}

fn candidate(name: &'static str, pipe: impl Regressor + 'static) -> (&'static str, Box<dyn Regressor>) {
    (name, Box::new(pipe))
}
