// src/domain/schema.rs

/// Numerical model inputs, in the order the model was trained on.
pub const NUMERICAL_FEATURES: [&str; 10] = [
    "bedroomCount",
    "habitableSurface",
    "facedeCount",
    "streetFacadeWidth",
    "kitchenSurface",
    "landSurface",
    "terraceSurface",
    "gardenSurface",
    "toiletCount",
    "bathroomCount",
];

/// Categorical model inputs. The `has*` flags travel as 0/1 integers.
pub const CATEGORICAL_FEATURES: [&str; 16] = [
    "type",
    "subtype",
    "province",
    "locality",
    "postCode",
    "hasBasement",
    "buildingCondition",
    "buildingConstructionYear",
    "hasTerrace",
    "floodZoneType",
    "heatingType",
    "kitchenType",
    "gardenOrientation",
    "hasSwimmingPool",
    "terraceOrientation",
    "epcScore",
];

pub const TARGET_NAME: &str = "price";

/// Flag features rendered as checkboxes.
pub fn flag_features() -> impl Iterator<Item = &'static str> {
    CATEGORICAL_FEATURES
        .iter()
        .copied()
        .filter(|name| name.starts_with("has"))
}
