pub mod home;
pub mod prediction;
pub mod report;

pub use home::{home_page, FormVm};
pub use prediction::prediction_result;
pub use report::report_page;
