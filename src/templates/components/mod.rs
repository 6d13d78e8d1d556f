use maud::{html, Markup};

pub mod error;
pub mod geo;
pub mod select;

pub use error::html_error_response;
pub use geo::geo_chain;
pub use select::{select_field, subtype_field, SelectField};

pub fn button(label: &str) -> Markup {
    html! {
        button type="submit" class="btn" { (label) }
    }
}

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

pub fn alert(kind: AlertKind, message: &str) -> Markup {
    let class = match kind {
        AlertKind::Success => "alert alert-success",
        AlertKind::Error => "alert alert-error",
    };
    html! {
        div class=(class) role="status" { (message) }
    }
}
