//! Serde schemas for processing units.
//!
//! A processing unit bundles one run's worth of events together with the
//! trigger products recorded for it. Products are keyed by label, matching
//! the configuration surface of the enricher: the same unit may carry
//! several jet collections or trigger summaries, and the enricher selects
//! the configured ones.

use jp_core::FourMomentum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One processing unit: a run (or run section) and its events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventUnit {
    /// Run number
    pub run: u64,
    /// Whether this unit is simulated input (enables smearing)
    pub simulation: bool,
    /// Trigger-results records by label
    #[serde(default)]
    pub trigger_results: HashMap<String, TriggerResults>,
    /// Trigger summaries by label
    #[serde(default)]
    pub trigger_summaries: HashMap<String, TriggerSummary>,
    /// Events in this unit
    pub events: Vec<Event>,
}

/// One event: named jet collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Event number
    pub id: u64,
    /// Jet collections by label
    pub jet_collections: HashMap<String, Vec<JetRecord>>,
}

/// A reconstructed jet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JetRecord {
    /// Transverse momentum
    pub pt: f64,
    /// Pseudorapidity
    pub eta: f64,
    /// Azimuthal angle
    pub phi: f64,
    /// Energy
    pub e: f64,
    /// Matched generator-level jet (simulated input only)
    #[serde(default)]
    pub gen: Option<GenJet>,
    /// Keys of this jet's constituents in the external particle collection
    #[serde(default)]
    pub constituents: Vec<u32>,
}

/// Generator-level (true) jet kinematics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenJet {
    /// Transverse momentum
    pub pt: f64,
    /// Pseudorapidity
    pub eta: f64,
    /// Azimuthal angle
    pub phi: f64,
    /// Energy
    pub e: f64,
}

impl JetRecord {
    /// Measured four-momentum
    pub fn p4(&self) -> FourMomentum {
        FourMomentum::from_pt_eta_phi_e(self.pt, self.eta, self.phi, self.e)
    }
}

impl GenJet {
    /// Generator-level four-momentum
    pub fn p4(&self) -> FourMomentum {
        FourMomentum::from_pt_eta_phi_e(self.pt, self.eta, self.phi, self.e)
    }
}

/// Per-path progress of the trigger, as recorded by the online system.
///
/// `last_module[path]` is the index of the last module that ran for that
/// path in this unit; filters later in the path were never evaluated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerResults {
    /// Index of the last module run, keyed by path name
    #[serde(default)]
    pub last_module: HashMap<String, usize>,
}

/// Trigger summary: which filters fired and the objects they recorded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerSummary {
    /// Filters that stored objects, in firing order
    #[serde(default)]
    pub filters: Vec<TriggerFilter>,
    /// Object table referenced by the filters' keys
    #[serde(default)]
    pub objects: Vec<TriggerObjectRecord>,
}

/// One filter's entry in the trigger summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerFilter {
    /// Module label of the filter
    pub label: String,
    /// Indices into the summary's object table
    pub object_keys: Vec<usize>,
}

/// Kinematics of one trigger object.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TriggerObjectRecord {
    /// Transverse momentum
    pub pt: f64,
    /// Pseudorapidity
    pub eta: f64,
    /// Azimuthal angle
    pub phi: f64,
    /// Energy
    pub e: f64,
}
