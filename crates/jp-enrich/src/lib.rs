//! Per-jet enrichment pipeline.
//!
//! Augments reconstructed jet collections with derived annotations:
//! nearest-trigger-object association, MC resolution smearing, JER scale
//! variants, JEC uncertainty and a constituent-key index. The orchestrator
//! ([`enricher::JetEnricher`]) iterates each processing unit once; the
//! per-jet pieces ([`matching`], [`smearing`], the calibration lookups from
//! `jp-calib`) are pure functions of their inputs.

pub mod annotation;
pub mod enricher;
pub mod event;
pub mod matching;
pub mod smearing;
pub mod trigger;

pub use annotation::{AnnotatedEvent, AnnotatedJet, JetAnnotation};
pub use enricher::{EnricherConfig, JetEnricher};
pub use event::EventUnit;
pub use trigger::{MenuService, TriggerMenu};
