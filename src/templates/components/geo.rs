use crate::domain::{CascadeOutcome, CascadeStep, StepMode};
use crate::templates::components::{select_field, SelectField};
use maud::{html, Markup};

/// The whole region..postal code chain. Any change re-requests it, so
/// stale downstream picks disappear server-side.
pub fn geo_chain(outcome: &CascadeOutcome) -> Markup {
    html! {
        div
            id="geo-chain"
            hx-get="/geo"
            hx-trigger="change"
            hx-include="#geo-chain"
            hx-target="#geo-chain"
            hx-swap="outerHTML"
        {
            @for step in &outcome.steps {
                @match step.mode {
                    StepMode::Skipped => {}
                    StepMode::Auto => { (fixed_level(step)) }
                    StepMode::Chosen | StepMode::Open => {
                        (select_field(&SelectField {
                            name: step.level.column(),
                            label: step.level.label(),
                            options: &step.candidates,
                            selected: step.selected.as_deref(),
                            placeholder: Some("--"),
                            humanize: false,
                        }))
                    }
                }
            }
        }
    }
}

fn fixed_level(step: &CascadeStep) -> Markup {
    let value = step.selected.as_deref().unwrap_or_default();
    html! {
        div class="field" {
            label for=(step.level.column()) { (step.level.label()) }
            select name=(step.level.column()) id=(step.level.column()) {
                option value=(value) selected { (value) }
            }
            span class="hint" { "Only option" }
        }
    }
}
