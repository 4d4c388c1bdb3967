//! Run-keyed store of named correction sets.
//!
//! Plays the calibration-record provider role: the enricher asks for the
//! uncertainty surface of a named set at the current run and borrows it for
//! the duration of one processing unit. A missing set or uncovered run is
//! fatal for that unit.

use crate::jec::JecUncertaintySurface;
use jp_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One interval of validity for a correction set, inclusive on both ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInterval {
    /// First run covered
    pub first_run: u64,
    /// Last run covered
    pub last_run: u64,
    /// Uncertainty surface valid for these runs
    pub surface: JecUncertaintySurface,
}

/// A named correction set with its intervals of validity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionSet {
    /// Correction-set name (e.g. "AK4PFchs")
    pub name: String,
    /// Intervals of validity, in run order
    pub intervals: Vec<RunInterval>,
}

/// Calibration records for all known correction sets.
#[derive(Debug, Clone)]
pub struct CalibrationStore {
    sets: HashMap<String, Vec<RunInterval>>,
}

impl CalibrationStore {
    /// Build a store from correction sets.
    pub fn from_sets(sets: Vec<CorrectionSet>) -> Result<Self> {
        let mut map = HashMap::new();
        for set in sets {
            if set.intervals.is_empty() {
                return Err(Error::Validation(format!(
                    "correction set '{}' has no intervals of validity",
                    set.name
                )));
            }
            for (i, iv) in set.intervals.iter().enumerate() {
                if iv.first_run > iv.last_run {
                    return Err(Error::Validation(format!(
                        "correction set '{}' interval {i} has first_run {} > last_run {}",
                        set.name, iv.first_run, iv.last_run
                    )));
                }
            }
            if map.insert(set.name.clone(), set.intervals).is_some() {
                return Err(Error::Validation(format!("duplicate correction set '{}'", set.name)));
            }
        }
        Ok(Self { sets: map })
    }

    /// Load a store from a JSON file holding a list of correction sets.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading calibration records");
        let text = std::fs::read_to_string(path)?;
        let sets: Vec<CorrectionSet> = serde_json::from_str(&text)?;
        let store = Self::from_sets(sets)?;
        tracing::info!(n_sets = store.sets.len(), "calibration records loaded");
        Ok(store)
    }

    /// The uncertainty surface of `set` valid at `run`.
    ///
    /// Errors with `Error::Calibration` when the set is unknown or no
    /// interval covers the run; callers treat this as fatal for the unit.
    pub fn uncertainty_surface(&self, set: &str, run: u64) -> Result<&JecUncertaintySurface> {
        let intervals = self
            .sets
            .get(set)
            .ok_or_else(|| Error::Calibration(format!("correction set '{set}' not found")))?;
        intervals
            .iter()
            .find(|iv| iv.first_run <= run && run <= iv.last_run)
            .map(|iv| &iv.surface)
            .ok_or_else(|| {
                Error::Calibration(format!("no interval of set '{set}' covers run {run}"))
            })
    }
}
