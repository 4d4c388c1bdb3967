//! Calibration building blocks for jetprep.
//!
//! This crate hosts the calibration structures the enrichment pipeline
//! queries per jet:
//! - the JER scale-factor table (piecewise step function over |eta|)
//! - the JEC uncertainty surface (per-eta-bin piecewise-linear curves in pt)
//! - the run-keyed store of named correction sets

pub mod jec;
pub mod jer;
pub mod provider;

pub use jec::JecUncertaintySurface;
pub use jer::{Resolution, ResolutionEntry, ResolutionTable};
pub use provider::CalibrationStore;
