// src/domain/options.rs
use crate::data::get_values_from_df;
use crate::errors::DataError;
use polars::prelude::DataFrame;

/// Preferred flood zone when the dataset has it.
pub const DEFAULT_FLOOD_ZONE: &str = "NON_FLOOD_ZONE";

/// Dropdown domains read from the cleaned dataset at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormOptions {
    pub building_conditions: Vec<String>,
    pub heating_types: Vec<String>,
    pub epc_scores: Vec<String>,
    pub terrace_orientations: Vec<String>,
    pub garden_orientations: Vec<String>,
    pub flood_zone_types: Vec<String>,
    pub kitchen_types: Vec<String>,
}

impl FormOptions {
    pub fn from_dataset(df: &DataFrame) -> Result<Self, DataError> {
        Ok(Self {
            building_conditions: get_values_from_df("buildingCondition", df)?,
            heating_types: get_values_from_df("heatingType", df)?,
            epc_scores: get_values_from_df("epcScore", df)?,
            terrace_orientations: get_values_from_df("terraceOrientation", df)?,
            garden_orientations: get_values_from_df("gardenOrientation", df)?,
            flood_zone_types: get_values_from_df("floodZoneType", df)?,
            kitchen_types: get_values_from_df("kitchenType", df)?,
        })
    }

    pub fn default_flood_zone(&self) -> Option<&str> {
        self.flood_zone_types
            .iter()
            .find(|z| z.as_str() == DEFAULT_FLOOD_ZONE)
            .map(String::as_str)
    }
}
