pub mod cascade;
pub mod form;
pub mod options;
pub mod payload;
pub mod schema;
pub mod taxonomy;

pub use cascade::{resolve_cascade, CascadeOutcome, CascadeStep, SelectionState, StepMode};
pub use form::FormInput;
pub use options::FormOptions;
pub use payload::{assemble_payload, FeatureValue, NullConvention, PayloadOptions, PropertyRecord};
pub use taxonomy::PropertyType;
