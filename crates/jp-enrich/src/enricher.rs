//! The enrichment orchestrator.

use crate::annotation::{AnnotatedEvent, AnnotatedJet, Enrichment, JetAnnotation, MatchedLeg};
use crate::event::{EventUnit, JetRecord};
use crate::matching::first_match_within;
use crate::smearing::smear;
use crate::trigger::{TriggerLeg, TriggerMenu, collect_trigger_legs, resolve_trigger_bit};
use jp_calib::{CalibrationStore, JecUncertaintySurface, ResolutionTable};
use jp_core::{Direction, Error, Result};

/// Startup configuration of the enricher.
///
/// Labels select products from each unit; `max_delta_r` is caller-supplied
/// with no implicit default.
#[derive(Debug, Clone)]
pub struct EnricherConfig {
    /// Label of the jet collection to annotate
    pub jet_collection: String,
    /// Label of the trigger-results record
    pub trigger_results: String,
    /// Label of the trigger summary
    pub trigger_summary: String,
    /// Substring selecting the trigger filters whose objects become legs
    pub trigger_filter: String,
    /// Substring selecting the trigger path
    pub trigger_path: String,
    /// Maximum angular distance for trigger association
    pub max_delta_r: f64,
    /// Name of the JEC correction set
    pub jec_set: String,
}

#[derive(Debug, Clone)]
struct ResolvedPath {
    menu_name: String,
    path_index: usize,
}

/// Annotates jet collections unit by unit.
///
/// Holds only startup configuration and the trigger-path resolution cached
/// from the last menu seen; everything per-unit (legs, uncertainty surface)
/// is acquired at the start of `process_unit` and released when it returns.
#[derive(Debug, Clone)]
pub struct JetEnricher {
    config: EnricherConfig,
    table: ResolutionTable,
    resolved: Option<ResolvedPath>,
}

impl JetEnricher {
    /// Create an enricher.
    pub fn new(config: EnricherConfig, table: ResolutionTable) -> Result<Self> {
        if !(config.max_delta_r.is_finite() && config.max_delta_r > 0.0) {
            return Err(Error::Validation(format!(
                "max_delta_r must be finite and > 0, got {}",
                config.max_delta_r
            )));
        }
        Ok(Self { config, table, resolved: None })
    }

    /// Annotate every jet of every event in `unit`.
    ///
    /// Output preserves event and jet order and count. Missing service-level
    /// configuration (unresolvable trigger path, absent calibration set or
    /// product label) aborts the unit with an error and produces no output;
    /// per-jet gaps (no trigger match, eta outside the resolution table)
    /// become sentinel values in the annotation instead.
    pub fn process_unit(
        &mut self,
        unit: &EventUnit,
        menu: &TriggerMenu,
        calib: &CalibrationStore,
    ) -> Result<Vec<AnnotatedEvent>> {
        let path_index = self.resolve_path(menu)?;
        let path = &menu.paths[path_index];

        let results = unit.trigger_results.get(&self.config.trigger_results).ok_or_else(|| {
            Error::Validation(format!(
                "trigger results '{}' missing from unit for run {}",
                self.config.trigger_results, unit.run
            ))
        })?;
        let summary = unit.trigger_summaries.get(&self.config.trigger_summary).ok_or_else(|| {
            Error::Validation(format!(
                "trigger summary '{}' missing from unit for run {}",
                self.config.trigger_summary, unit.run
            ))
        })?;
        let legs = collect_trigger_legs(path, results, summary, &self.config.trigger_filter);

        let surface = calib.uncertainty_surface(&self.config.jec_set, unit.run)?;

        tracing::debug!(
            run = unit.run,
            n_events = unit.events.len(),
            n_legs = legs.len(),
            path = %path.name,
            "processing unit"
        );

        let mut out = Vec::with_capacity(unit.events.len());
        for event in &unit.events {
            let jets = event.jet_collections.get(&self.config.jet_collection).ok_or_else(|| {
                Error::Validation(format!(
                    "jet collection '{}' missing from event {} in run {}",
                    self.config.jet_collection, event.id, unit.run
                ))
            })?;
            let annotated = jets
                .iter()
                .map(|jet| self.enrich_jet(jet, &legs, surface, unit.simulation))
                .collect();
            out.push(AnnotatedEvent { id: event.id, jets: annotated });
        }
        Ok(out)
    }

    fn enrich_jet(
        &self,
        jet: &JetRecord,
        legs: &[TriggerLeg],
        surface: &JecUncertaintySurface,
        simulation: bool,
    ) -> AnnotatedJet {
        let trigger = first_match_within(
            Direction::new(jet.eta, jet.phi),
            legs,
            self.config.max_delta_r,
        )
        .map(|m| MatchedLeg { leg: legs[m.index], delta_r: m.delta_r });

        let truth = if simulation { jet.gen.as_ref().map(|g| g.p4()) } else { None };
        let smeared = smear(&self.table, jet.p4(), truth);

        let enrichment = Enrichment {
            trigger,
            smeared,
            resolution: self.table.lookup(jet.eta),
            jec_uncertainty: surface.uncertainty(jet.eta, jet.pt),
            constituents: jet.constituents.clone(),
        };
        AnnotatedJet {
            pt: jet.pt,
            eta: jet.eta,
            phi: jet.phi,
            e: jet.e,
            annotation: JetAnnotation::from(enrichment),
        }
    }

    /// Resolve the configured path against `menu`, re-deriving only when the
    /// menu name differs from the cached one.
    fn resolve_path(&mut self, menu: &TriggerMenu) -> Result<usize> {
        if let Some(r) = &self.resolved {
            if r.menu_name == menu.name {
                return Ok(r.path_index);
            }
        }
        tracing::info!(menu = %menu.name, "trigger menu changed, resolving path");
        match resolve_trigger_bit(menu, &self.config.trigger_path) {
            Some(path_index) => {
                self.resolved = Some(ResolvedPath { menu_name: menu.name.clone(), path_index });
                Ok(path_index)
            }
            None => {
                self.resolved = None;
                Err(Error::Trigger(format!(
                    "no trigger path matching '{}' in menu '{}'",
                    self.config.trigger_path, menu.name
                )))
            }
        }
    }
}
