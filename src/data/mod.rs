pub mod cleaner;
pub mod reference;
pub mod values;

pub use cleaner::{Cleaner, CsvCleaner};
pub use reference::{load_reference, GeoLevel};
pub use values::{filter_equal, get_values_from_df};
