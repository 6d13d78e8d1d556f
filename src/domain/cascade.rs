// src/domain/cascade.rs
//! Region -> province -> arrondissement -> municipality -> sub-municipality ->
//! postal code. Each level narrows the reference table for the next one.

use crate::data::{filter_equal, get_values_from_df, GeoLevel};
use crate::errors::DataError;
use polars::prelude::DataFrame;
use std::collections::HashMap;
use tracing::debug;

/// The user's picks at each level. Lives for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub region: Option<String>,
    pub province: Option<String>,
    pub arrondissement: Option<String>,
    pub municipality: Option<String>,
    pub sub_municipality: Option<String>,
    pub post_code: Option<String>,
}

impl SelectionState {
    /// Read the levels from request parameters keyed by column name.
    /// Empty values count as unset.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut state = Self::default();
        for level in GeoLevel::ALL {
            let value = params
                .get(level.column())
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            state.set(level, value);
        }
        state
    }

    pub fn get(&self, level: GeoLevel) -> Option<&str> {
        self.slot(level).as_deref()
    }

    pub fn set(&mut self, level: GeoLevel, value: Option<String>) {
        *self.slot_mut(level) = value;
    }

    fn slot(&self, level: GeoLevel) -> &Option<String> {
        match level {
            GeoLevel::Region => &self.region,
            GeoLevel::Province => &self.province,
            GeoLevel::Arrondissement => &self.arrondissement,
            GeoLevel::Municipality => &self.municipality,
            GeoLevel::SubMunicipality => &self.sub_municipality,
            GeoLevel::PostCode => &self.post_code,
        }
    }

    fn slot_mut(&mut self, level: GeoLevel) -> &mut Option<String> {
        match level {
            GeoLevel::Region => &mut self.region,
            GeoLevel::Province => &mut self.province,
            GeoLevel::Arrondissement => &mut self.arrondissement,
            GeoLevel::Municipality => &mut self.municipality,
            GeoLevel::SubMunicipality => &mut self.sub_municipality,
            GeoLevel::PostCode => &mut self.post_code,
        }
    }
}

/// Asked for a value whenever a level has two or more candidates.
pub trait LevelChooser {
    fn choose(&mut self, level: GeoLevel, candidates: &[String]) -> Option<String>;
}

impl<F> LevelChooser for F
where
    F: FnMut(GeoLevel, &[String]) -> Option<String>,
{
    fn choose(&mut self, level: GeoLevel, candidates: &[String]) -> Option<String> {
        self(level, candidates)
    }
}

/// Replays selections that arrived with a request.
impl LevelChooser for &SelectionState {
    fn choose(&mut self, level: GeoLevel, _candidates: &[String]) -> Option<String> {
        self.get(level).map(str::to_string)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    /// No candidates; the level does not exist for this branch.
    Skipped,
    /// Exactly one candidate, taken without asking.
    Auto,
    /// Picked by the chooser.
    Chosen,
    /// Several candidates and nothing (valid) picked yet.
    Open,
}

#[derive(Debug, Clone)]
pub struct CascadeStep {
    pub level: GeoLevel,
    pub candidates: Vec<String>,
    pub selected: Option<String>,
    pub mode: StepMode,
}

#[derive(Debug, Clone)]
pub struct CascadeOutcome {
    pub steps: Vec<CascadeStep>,
    pub selection: SelectionState,
    /// Reference rows still matching every selection made.
    pub remaining: DataFrame,
}

impl CascadeOutcome {
    pub fn post_code(&self) -> Option<&str> {
        self.selection.get(GeoLevel::PostCode)
    }

    pub fn step(&self, level: GeoLevel) -> Option<&CascadeStep> {
        self.steps.iter().find(|s| s.level == level)
    }
}

/// Walk the levels top-down over `table`.
///
/// A chooser's answer is only accepted when it is one of the level's
/// candidates, so a stale downstream pick is dropped once an upper level
/// changes. The resulting postal code always lies in `remaining`.
pub fn resolve_cascade<C: LevelChooser>(
    table: &DataFrame,
    mut chooser: C,
) -> Result<CascadeOutcome, DataError> {
    let mut subset = table.clone();
    let mut selection = SelectionState::default();
    let mut steps = Vec::with_capacity(GeoLevel::ALL.len());

    for level in GeoLevel::ALL {
        let candidates = get_values_from_df(level.column(), &subset)?;

        let (selected, mode) = match candidates.len() {
            0 => (None, StepMode::Skipped),
            1 => (Some(candidates[0].clone()), StepMode::Auto),
            _ => match chooser.choose(level, &candidates) {
                Some(value) if candidates.contains(&value) => (Some(value), StepMode::Chosen),
                _ => (None, StepMode::Open),
            },
        };

        if let Some(value) = &selected {
            subset = filter_equal(&subset, level.column(), value)?;
        }

        debug!(
            level = level.column(),
            candidates = candidates.len(),
            selected = selected.as_deref().unwrap_or(""),
            ?mode,
            "cascade level resolved"
        );

        selection.set(level, selected.clone());
        steps.push(CascadeStep {
            level,
            candidates,
            selected,
            mode,
        });
    }

    Ok(CascadeOutcome {
        steps,
        selection,
        remaining: subset,
    })
}
