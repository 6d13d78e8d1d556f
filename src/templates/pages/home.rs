// templates/pages/home.rs

use crate::domain::form::{NumericInput, CONSTRUCTION_YEAR, NUMERIC_INPUTS};
use crate::domain::schema::flag_features;
use crate::domain::{CascadeOutcome, FormInput, FormOptions, PropertyType};
use crate::templates::components::{select_field, SelectField};
use crate::templates::{button, card, desktop_layout, geo_chain, subtype_field};
use maud::{html, Markup};

pub struct FormVm<'a> {
    pub input: &'a FormInput,
    pub options: &'a FormOptions,
    pub cascade: &'a CascadeOutcome,
    /// Rendered prediction, for submissions made without htmx.
    pub result: Option<Markup>,
}

pub fn home_page(vm: &FormVm<'_>) -> Markup {
    desktop_layout(
        "House Price Prediction",
        html! {
            main class="container" {
                h1 { "House Price Prediction" }
                p { "This is a simple house price prediction app." }
                p { "Please fill in the form below to get a prediction." }

                form
                    method="post"
                    action="/predict"
                    hx-post="/predict"
                    hx-target="#prediction"
                    hx-swap="innerHTML"
                    hx-disabled-elt="button"
                {
                    (card("Property", html! {
                        (type_pills(vm.input.property_type))
                        (subtype_field(vm.input.property_type, &vm.input.subtype))
                    }))

                    (card("Location", geo_chain(vm.cascade)))

                    (card("Building", building_fields(vm)))

                    (card("Rooms and surfaces", html! {
                        div class="grid" {
                            @for input in &NUMERIC_INPUTS {
                                (number_field(input, vm.input.number(input.name)))
                            }
                        }
                    }))

                    div class="actions" { (button("Predict")) }
                }

                div id="prediction" {
                    @if let Some(result) = &vm.result {
                        (result)
                    }
                }
            }
        },
    )
}

fn type_pills(current: PropertyType) -> Markup {
    html! {
        div class="field" {
            label { "Type of property" }
            div class="pills" {
                @for property_type in PropertyType::ALL {
                    label {
                        input
                            type="radio"
                            name="type"
                            value=(property_type.as_str())
                            checked[property_type == current]
                            hx-get="/subtypes"
                            hx-target="#subtype-field"
                            hx-swap="outerHTML";
                        " " (property_type.as_str())
                    }
                }
            }
        }
    }
}

fn building_fields(vm: &FormVm<'_>) -> Markup {
    let input = vm.input;
    let options = vm.options;

    html! {
        (select_field(&SelectField {
            name: "buildingCondition",
            label: "Building condition",
            options: &options.building_conditions,
            selected: input.building_condition.as_deref(),
            placeholder: Some("--"),
            humanize: false,
        }))

        @for flag in flag_features() {
            div class="field" {
                label {
                    input type="checkbox" name=(flag) value="on" checked[input.flag(flag)];
                    " Has " (flag[3..].to_lowercase())
                }
            }
        }

        (number_field(&CONSTRUCTION_YEAR, input.building_construction_year))

        (select_field(&SelectField {
            name: "heatingType",
            label: "Heating type",
            options: &options.heating_types,
            selected: input.heating_type.as_deref(),
            placeholder: Some("--"),
            humanize: false,
        }))
        (select_field(&SelectField {
            name: "epcScore",
            label: "EPC score",
            options: &options.epc_scores,
            selected: input.epc_score.as_deref(),
            placeholder: Some("--"),
            humanize: false,
        }))
        (select_field(&SelectField {
            name: "terraceOrientation",
            label: "Terrace orientation",
            options: &options.terrace_orientations,
            selected: input.terrace_orientation.as_deref(),
            placeholder: Some("--"),
            humanize: false,
        }))
        (select_field(&SelectField {
            name: "gardenOrientation",
            label: "Garden orientation",
            options: &options.garden_orientations,
            selected: input.garden_orientation.as_deref(),
            placeholder: Some("--"),
            humanize: false,
        }))
        (select_field(&SelectField {
            name: "floodZoneType",
            label: "Flood zone type",
            options: &options.flood_zone_types,
            selected: input.flood_zone_type.as_deref().or(options.default_flood_zone()),
            placeholder: Some("--"),
            humanize: true,
        }))
        (select_field(&SelectField {
            name: "kitchenType",
            label: "Kitchen type",
            options: &options.kitchen_types,
            selected: input.kitchen_type.as_deref(),
            placeholder: Some("--"),
            humanize: false,
        }))
    }
}

fn number_field(input: &NumericInput, value: u32) -> Markup {
    html! {
        div class="field" {
            label for=(input.name) { (input.label) }
            input
                type="number"
                id=(input.name)
                name=(input.name)
                min=(input.min)
                max=(input.max)
                step="1"
                value=(value);
        }
    }
}
