//! Trigger-path resolution and trigger-leg collection.
//!
//! The trigger menu is caller-owned configuration data; the resolver is a
//! pure function the orchestrator re-invokes only when the menu changes.

use crate::event::{TriggerResults, TriggerSummary};
use jp_core::{Direction, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One path of the trigger menu: its name and ordered module labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerPath {
    /// Path name (e.g. "HLT_PFJet320_v5")
    pub name: String,
    /// Module labels, in execution order
    pub modules: Vec<String>,
}

/// A trigger menu: a named, ordered list of paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerMenu {
    /// Menu name; a change of name signals a configuration change
    pub name: String,
    /// Paths in menu order
    pub paths: Vec<TriggerPath>,
}

/// One trigger-matched physics object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerLeg {
    /// Pseudorapidity
    pub eta: f64,
    /// Azimuthal angle
    pub phi: f64,
    /// Transverse momentum
    pub pt: f64,
    /// Energy
    pub energy: f64,
}

impl TriggerLeg {
    /// Direction of this leg
    pub fn direction(&self) -> Direction {
        Direction::new(self.eta, self.phi)
    }
}

/// Index of the path whose name contains `pattern`.
///
/// Substring match over path names in menu order; when several paths match,
/// the last one wins. `None` when no path matches.
pub fn resolve_trigger_bit(menu: &TriggerMenu, pattern: &str) -> Option<usize> {
    let mut bit = None;
    for (i, path) in menu.paths.iter().enumerate() {
        if path.name.contains(pattern) {
            bit = Some(i);
        }
    }
    bit
}

/// Collect the trigger legs recorded for `path` in this unit's summary.
///
/// Walks the path's module labels in order, up to and including
/// `last_module` when the trigger results recorded one (filters past that
/// point never ran). A label qualifies when it contains `filter_label`; its
/// objects are appended in key order. Labels absent from the summary are
/// skipped.
pub fn collect_trigger_legs(
    path: &TriggerPath,
    results: &TriggerResults,
    summary: &TriggerSummary,
    filter_label: &str,
) -> Vec<TriggerLeg> {
    let last = results.last_module.get(&path.name).copied().unwrap_or(path.modules.len());
    let mut legs = Vec::new();
    for label in path.modules.iter().take(last.saturating_add(1)) {
        if !label.contains(filter_label) {
            continue;
        }
        let Some(filter) = summary.filters.iter().find(|f| &f.label == label) else {
            continue;
        };
        for &key in &filter.object_keys {
            match summary.objects.get(key) {
                Some(obj) => {
                    legs.push(TriggerLeg { eta: obj.eta, phi: obj.phi, pt: obj.pt, energy: obj.e })
                }
                None => tracing::warn!(key, label = %filter.label, "trigger object key out of range"),
            }
        }
    }
    legs
}

/// Assignment of a trigger menu to a run range, inclusive on both ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuAssignment {
    /// First run covered
    pub first_run: u64,
    /// Last run covered
    pub last_run: u64,
    /// Menu in effect for these runs
    pub menu: TriggerMenu,
}

/// File-backed trigger-configuration service: menus keyed by run range.
#[derive(Debug, Clone)]
pub struct MenuService {
    assignments: Vec<MenuAssignment>,
}

impl MenuService {
    /// Build a service from menu assignments.
    pub fn from_assignments(assignments: Vec<MenuAssignment>) -> Result<Self> {
        for (i, a) in assignments.iter().enumerate() {
            if a.first_run > a.last_run {
                return Err(Error::Validation(format!(
                    "menu assignment {i} has first_run {} > last_run {}",
                    a.first_run, a.last_run
                )));
            }
        }
        Ok(Self { assignments })
    }

    /// Load assignments from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading trigger menus");
        let text = std::fs::read_to_string(path)?;
        let assignments: Vec<MenuAssignment> = serde_json::from_str(&text)?;
        Self::from_assignments(assignments)
    }

    /// The menu in effect for `run`.
    pub fn menu_for_run(&self, run: u64) -> Result<&TriggerMenu> {
        self.assignments
            .iter()
            .find(|a| a.first_run <= run && run <= a.last_run)
            .map(|a| &a.menu)
            .ok_or_else(|| Error::Trigger(format!("no trigger menu assigned for run {run}")))
    }
}
