pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{alert, button, card, geo_chain, html_error_response, subtype_field, AlertKind};
pub use layouts::desktop::desktop_layout;
