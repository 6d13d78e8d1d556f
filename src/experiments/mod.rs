//! Offline model selection: cross-validated error comparison across
//! candidate pipelines, plus the charts and workbook that summarise it.

pub mod chart;
pub mod cv;
pub mod dataset;
pub mod pipelines;

pub use chart::{comparison_chart, visualize_results};
pub use cv::{cross_validate, evaluate_model_and_store, kfold_indices, CvOptions, EvaluationSummary};
pub use dataset::records_from_df;
pub use pipelines::{GroupMeanRegressor, MeanBaseline, Regressor, SurfaceRateRegressor};
