// src/domain/form.rs
use crate::domain::cascade::SelectionState;
use crate::domain::taxonomy::PropertyType;
use crate::errors::ServerError;
use std::collections::HashMap;

/// A bounded integer input on the form.
#[derive(Debug, Clone, Copy)]
pub struct NumericInput {
    pub name: &'static str,
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

const fn numeric(name: &'static str, label: &'static str, min: u32, max: u32, default: u32) -> NumericInput {
    NumericInput {
        name,
        label,
        min,
        max,
        default,
    }
}

pub const CONSTRUCTION_YEAR: NumericInput = numeric(
    "buildingConstructionYear",
    "Building construction year",
    1900,
    2025,
    2024,
);

/// Numerical features in the order they appear on the form.
pub const NUMERIC_INPUTS: [NumericInput; 10] = [
    numeric("bedroomCount", "Bedroom count", 0, 10, 2),
    numeric("toiletCount", "Toilet count", 1, 10, 1),
    numeric("bathroomCount", "Bathroom count", 1, 10, 1),
    numeric("habitableSurface", "Habitable surface", 10, 500, 50),
    numeric("kitchenSurface", "Kitchen surface", 5, 100, 10),
    numeric("facedeCount", "Facade count", 1, 8, 1),
    numeric("streetFacadeWidth", "Street facade width", 1, 20, 5),
    numeric("terraceSurface", "Terrace surface", 0, 30, 0),
    numeric("gardenSurface", "Garden surface", 0, 1000, 0),
    numeric("landSurface", "Land surface", 0, 10000, 0),
];

/// Everything the user entered, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub property_type: PropertyType,
    pub subtype: String,
    /// Geographic picks as requested; resolve them before use.
    pub geo: SelectionState,

    pub building_condition: Option<String>,
    pub building_construction_year: u32,
    pub heating_type: Option<String>,
    pub epc_score: Option<String>,
    pub terrace_orientation: Option<String>,
    pub garden_orientation: Option<String>,
    pub flood_zone_type: Option<String>,
    pub kitchen_type: Option<String>,

    pub has_basement: bool,
    pub has_terrace: bool,
    pub has_swimming_pool: bool,

    /// Values of [`NUMERIC_INPUTS`], keyed by feature name.
    pub numbers: HashMap<&'static str, u32>,
}

impl Default for FormInput {
    fn default() -> Self {
        let property_type = PropertyType::default();
        Self {
            property_type,
            subtype: property_type.default_subtype().to_string(),
            geo: SelectionState::default(),
            building_condition: None,
            building_construction_year: CONSTRUCTION_YEAR.default,
            heating_type: None,
            epc_score: None,
            terrace_orientation: None,
            garden_orientation: None,
            flood_zone_type: None,
            kitchen_type: None,
            has_basement: false,
            has_terrace: false,
            has_swimming_pool: false,
            numbers: NUMERIC_INPUTS.iter().map(|n| (n.name, n.default)).collect(),
        }
    }
}

impl FormInput {
    /// Build from decoded form fields. Absent numbers take their defaults;
    /// out-of-range or unparsable ones are rejected.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ServerError> {
        let property_type = match text(params, "type") {
            Some(raw) => PropertyType::parse(&raw)
                .ok_or_else(|| ServerError::BadRequest(format!("unknown property type `{raw}`")))?,
            None => PropertyType::default(),
        };

        // A subtype left over from a previous type resets, like the select does.
        let subtype = text(params, "subtype")
            .filter(|s| property_type.allows_subtype(s))
            .unwrap_or_else(|| property_type.default_subtype().to_string());

        let mut numbers = HashMap::new();
        for input in NUMERIC_INPUTS {
            numbers.insert(input.name, bounded(params, input)?);
        }

        Ok(Self {
            property_type,
            subtype,
            geo: SelectionState::from_params(params),
            building_condition: text(params, "buildingCondition"),
            building_construction_year: bounded(params, CONSTRUCTION_YEAR)?,
            heating_type: text(params, "heatingType"),
            epc_score: text(params, "epcScore"),
            terrace_orientation: text(params, "terraceOrientation"),
            garden_orientation: text(params, "gardenOrientation"),
            flood_zone_type: text(params, "floodZoneType"),
            kitchen_type: text(params, "kitchenType"),
            has_basement: checked(params, "hasBasement"),
            has_terrace: checked(params, "hasTerrace"),
            has_swimming_pool: checked(params, "hasSwimmingPool"),
            numbers,
        })
    }

    pub fn number(&self, name: &str) -> u32 {
        self.numbers
            .get(name)
            .copied()
            .or_else(|| NUMERIC_INPUTS.iter().find(|n| n.name == name).map(|n| n.default))
            .unwrap_or(0)
    }

    /// Checkbox state by feature name.
    pub fn flag(&self, name: &str) -> bool {
        match name {
            "hasBasement" => self.has_basement,
            "hasTerrace" => self.has_terrace,
            "hasSwimmingPool" => self.has_swimming_pool,
            _ => false,
        }
    }
}

fn text(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// Browsers only submit checked boxes.
fn checked(params: &HashMap<String, String>, key: &str) -> bool {
    matches!(
        params.get(key).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("on" | "1" | "true" | "yes")
    )
}

fn bounded(params: &HashMap<String, String>, input: NumericInput) -> Result<u32, ServerError> {
    let Some(raw) = text(params, input.name) else {
        return Ok(input.default);
    };

    let value: u32 = raw
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("{} must be a whole number", input.label)))?;

    if value < input.min || value > input.max {
        return Err(ServerError::BadRequest(format!(
            "{} must be between {} and {}",
            input.label, input.min, input.max
        )));
    }

    Ok(value)
}
