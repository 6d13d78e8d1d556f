pub mod results_xlsx;

pub use results_xlsx::export_results_xlsx;
