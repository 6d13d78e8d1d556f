// src/domain/payload.rs
//! Maps a validated form into the flat feature record the model or the
//! remote API consumes.

use crate::domain::cascade::SelectionState;
use crate::domain::form::FormInput;
use crate::domain::schema::{CATEGORICAL_FEATURES, NUMERICAL_FEATURES};
use crate::data::GeoLevel;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One feature value. `Missing` serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Integer(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            FeatureValue::Text(_) | FeatureValue::Missing => None,
        }
    }

    /// Category key used for one-hot lookups and grouping.
    pub fn category(&self) -> Option<String> {
        match self {
            FeatureValue::Integer(v) => Some(v.to_string()),
            FeatureValue::Float(v) => Some(v.to_string()),
            FeatureValue::Text(s) if !s.is_empty() => Some(s.clone()),
            FeatureValue::Text(_) | FeatureValue::Missing => None,
        }
    }
}

/// Feature name -> value, in schema order. A name appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyRecord {
    fields: Vec<(&'static str, FeatureValue)>,
}

impl PropertyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace.
    pub fn insert(&mut self, name: &'static str, value: FeatureValue) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl Serialize for PropertyRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// How an unset categorical selection is represented.
///
/// The local pipeline accepts missing values; the hosted API expects empty
/// strings. Which one applies is a deployment choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NullConvention {
    Missing,
    EmptyString,
}

impl NullConvention {
    fn absent(self) -> FeatureValue {
        match self {
            NullConvention::Missing => FeatureValue::Missing,
            NullConvention::EmptyString => FeatureValue::Text(String::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadOptions {
    pub null_convention: NullConvention,
    /// Send the postal code as a number rather than a category label.
    pub post_code_as_integer: bool,
}

impl PayloadOptions {
    pub fn local() -> Self {
        Self {
            null_convention: NullConvention::Missing,
            post_code_as_integer: false,
        }
    }

    pub fn remote() -> Self {
        Self {
            null_convention: NullConvention::EmptyString,
            post_code_as_integer: true,
        }
    }
}

/// Build the record for `input`, taking locations from the resolved `geo`
/// selection. Every schema feature is present exactly once.
pub fn assemble_payload(
    input: &FormInput,
    geo: &SelectionState,
    options: PayloadOptions,
) -> PropertyRecord {
    let absent = options.null_convention;
    let category = |value: Option<&str>| match value {
        Some(v) => FeatureValue::Text(v.to_string()),
        None => absent.absent(),
    };

    let mut record = PropertyRecord::new();

    for name in NUMERICAL_FEATURES {
        record.insert(name, FeatureValue::Integer(i64::from(input.number(name))));
    }

    let post_code = match geo.get(GeoLevel::PostCode) {
        Some(code) if options.post_code_as_integer => code
            .parse::<i64>()
            .map(FeatureValue::Integer)
            .unwrap_or_else(|_| FeatureValue::Text(code.to_string())),
        other => category(other),
    };

    for name in CATEGORICAL_FEATURES {
        let value = match name {
            "type" => FeatureValue::Text(input.property_type.as_str().to_string()),
            "subtype" => FeatureValue::Text(input.subtype.clone()),
            "province" => category(geo.get(GeoLevel::Province)),
            "locality" => category(geo.get(GeoLevel::Municipality)),
            "postCode" => post_code.clone(),
            "buildingConstructionYear" => {
                FeatureValue::Integer(i64::from(input.building_construction_year))
            }
            "buildingCondition" => category(input.building_condition.as_deref()),
            "floodZoneType" => category(input.flood_zone_type.as_deref()),
            "heatingType" => category(input.heating_type.as_deref()),
            "kitchenType" => category(input.kitchen_type.as_deref()),
            "gardenOrientation" => category(input.garden_orientation.as_deref()),
            "terraceOrientation" => category(input.terrace_orientation.as_deref()),
            "epcScore" => category(input.epc_score.as_deref()),
            flag if flag.starts_with("has") => FeatureValue::Integer(i64::from(input.flag(flag))),
            _ => absent.absent(),
        };
        record.insert(name, value);
    }

    record
}
