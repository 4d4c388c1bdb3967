//! Jet energy resolution scale factors.
//!
//! Measured resolution in data is wider than in simulation; the smearing
//! transform rescales the MC momentum residual by a per-|eta| scale factor.
//! The table is a contiguous sequence of half-open |eta| bins; queries
//! outside the covered range have no resolution (`None`), surfaced as the
//! literal sentinel only at the annotation boundary.

use jp_core::{Error, Result};

/// Scale factor triple for one |eta| bin: nominal and its up/down variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Nominal data/MC resolution ratio
    pub nominal: f64,
    /// Upward variant
    pub up: f64,
    /// Downward variant
    pub down: f64,
}

/// One row of the resolution table: `[eta_lo, eta_hi)` in |eta|.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionEntry {
    /// Lower |eta| edge (inclusive)
    pub eta_lo: f64,
    /// Upper |eta| edge (exclusive)
    pub eta_hi: f64,
    /// Nominal scale factor
    pub nominal: f64,
    /// Upward variant
    pub up: f64,
    /// Downward variant
    pub down: f64,
}

/// Piecewise step function over |eta| returning resolution scale factors.
#[derive(Debug, Clone)]
pub struct ResolutionTable {
    entries: Vec<ResolutionEntry>,
}

impl ResolutionTable {
    /// Construct a table from ordered entries.
    ///
    /// Entries must start at |eta| = 0, be contiguous and non-overlapping,
    /// with `eta_lo < eta_hi` for every row.
    pub fn new(entries: Vec<ResolutionEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::Validation("ResolutionTable requires at least one entry".into()));
        }
        if entries[0].eta_lo != 0.0 {
            return Err(Error::Validation(format!(
                "ResolutionTable must start at |eta| = 0, got {}",
                entries[0].eta_lo
            )));
        }
        for (i, e) in entries.iter().enumerate() {
            if !(e.eta_lo.is_finite() && e.eta_hi.is_finite() && e.eta_lo < e.eta_hi) {
                return Err(Error::Validation(format!(
                    "ResolutionTable entry {i} has invalid edges [{}, {})",
                    e.eta_lo, e.eta_hi
                )));
            }
            if i > 0 && entries[i - 1].eta_hi != e.eta_lo {
                return Err(Error::Validation(format!(
                    "ResolutionTable entries must be contiguous: entry {} ends at {} but entry {i} starts at {}",
                    i - 1,
                    entries[i - 1].eta_hi,
                    e.eta_lo
                )));
            }
        }
        Ok(Self { entries })
    }

    /// The Run 2 scale-factor table.
    ///
    /// Frozen calibration constants; these encode an external measurement
    /// and must be reproduced exactly.
    pub fn run2() -> Self {
        let rows = [
            (0.0, 0.8, 1.061, 1.084, 1.038),
            (0.8, 1.3, 1.088, 1.117, 1.059),
            (1.3, 1.9, 1.106, 1.136, 1.076),
            (1.9, 2.5, 1.126, 1.220, 1.032),
            (2.5, 3.0, 1.343, 1.466, 1.220),
            (3.0, 3.2, 1.303, 1.414, 1.192),
            (3.2, 5.0, 1.320, 1.606, 1.034),
        ];
        let entries = rows
            .iter()
            .map(|&(eta_lo, eta_hi, nominal, up, down)| ResolutionEntry {
                eta_lo,
                eta_hi,
                nominal,
                up,
                down,
            })
            .collect();
        // Known-valid constants; bypasses `new` so construction stays infallible.
        Self { entries }
    }

    /// Look up the scale factors for a (signed) pseudorapidity.
    ///
    /// The query uses `|eta|`; bins are half-open `[lo, hi)`. Returns `None`
    /// outside the covered range (including non-finite input).
    pub fn lookup(&self, eta: f64) -> Option<Resolution> {
        let a = eta.abs();
        self.entries
            .iter()
            .find(|e| a >= e.eta_lo && a < e.eta_hi)
            .map(|e| Resolution { nominal: e.nominal, up: e.up, down: e.down })
    }

    /// Table rows, in |eta| order.
    pub fn entries(&self) -> &[ResolutionEntry] {
        &self.entries
    }
}
