use crate::domain::PropertyType;
use maud::{html, Markup};

pub struct SelectField<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub options: &'a [String],
    pub selected: Option<&'a str>,
    /// Label of the empty first option. `None` means a value is required.
    pub placeholder: Option<&'a str>,
    /// Show `NON_FLOOD_ZONE` as `NON FLOOD ZONE`.
    pub humanize: bool,
}

pub fn select_field(field: &SelectField<'_>) -> Markup {
    html! {
        div class="field" {
            label for=(field.name) { (field.label) }
            select name=(field.name) id=(field.name) {
                @if let Some(placeholder) = field.placeholder {
                    option value="" selected[field.selected.is_none()] { (placeholder) }
                }
                @for opt in field.options {
                    option value=(opt) selected[field.selected == Some(opt.as_str())] {
                        @if field.humanize { (opt.replace('_', " ")) } @else { (opt) }
                    }
                }
            }
        }
    }
}

/// Swapped in by htmx whenever the property type changes.
pub fn subtype_field(property_type: PropertyType, selected: &str) -> Markup {
    let options = property_type.subtype_options();
    let selected = if property_type.allows_subtype(selected) {
        selected
    } else {
        property_type.default_subtype()
    };

    html! {
        div id="subtype-field" {
            (select_field(&SelectField {
                name: "subtype",
                label: "Subtype",
                options: &options,
                selected: Some(selected),
                placeholder: None,
                humanize: false,
            }))
        }
    }
}
