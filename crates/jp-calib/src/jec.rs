//! Jet energy correction uncertainty surface.
//!
//! A binned lookup structure keyed by (eta, pt): ordered eta bins, each
//! carrying a piecewise-linear curve of relative uncertainty versus pt.
//! The surface is constructed from calibration records outside the
//! per-jet path and only queried inside it. Queries outside the covered
//! range follow the surface's own extrapolation policy: clamp to the
//! nearest eta bin and to the pt knot range.

use jp_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// One eta bin of the uncertainty surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JecEtaBin {
    /// Lower eta edge (inclusive)
    pub eta_lo: f64,
    /// Upper eta edge (exclusive; the last bin's edge is closing only)
    pub eta_hi: f64,
    /// pt knot positions, strictly increasing
    pub pt_knots: Vec<f64>,
    /// Relative uncertainty at each knot
    pub values: Vec<f64>,
}

/// Relative JEC uncertainty as a function of (eta, pt).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SurfaceData")]
pub struct JecUncertaintySurface {
    bins: Vec<JecEtaBin>,
}

/// Raw serde payload, promoted to a surface through validation.
#[derive(Debug, Clone, Deserialize)]
struct SurfaceData {
    bins: Vec<JecEtaBin>,
}

impl TryFrom<SurfaceData> for JecUncertaintySurface {
    type Error = Error;

    fn try_from(data: SurfaceData) -> Result<Self> {
        JecUncertaintySurface::from_bins(data.bins)
    }
}

impl JecUncertaintySurface {
    /// Construct a surface from ordered eta bins.
    pub fn from_bins(bins: Vec<JecEtaBin>) -> Result<Self> {
        if bins.is_empty() {
            return Err(Error::Validation("JecUncertaintySurface requires at least one eta bin".into()));
        }
        for (i, b) in bins.iter().enumerate() {
            if !(b.eta_lo.is_finite() && b.eta_hi.is_finite() && b.eta_lo < b.eta_hi) {
                return Err(Error::Validation(format!(
                    "JecUncertaintySurface bin {i} has invalid eta edges [{}, {})",
                    b.eta_lo, b.eta_hi
                )));
            }
            if i > 0 && bins[i - 1].eta_hi > b.eta_lo {
                return Err(Error::Validation(format!(
                    "JecUncertaintySurface eta bins overlap: bin {} ends at {} but bin {i} starts at {}",
                    i - 1,
                    bins[i - 1].eta_hi,
                    b.eta_lo
                )));
            }
            if b.pt_knots.is_empty() {
                return Err(Error::Validation(format!(
                    "JecUncertaintySurface bin {i} has no pt knots"
                )));
            }
            if b.values.len() != b.pt_knots.len() {
                return Err(Error::Validation(format!(
                    "JecUncertaintySurface bin {i} length mismatch: {} knots, {} values",
                    b.pt_knots.len(),
                    b.values.len()
                )));
            }
            for w in b.pt_knots.windows(2) {
                if w[0] >= w[1] {
                    return Err(Error::Validation(format!(
                        "JecUncertaintySurface bin {i} pt knots must be strictly increasing, got {} then {}",
                        w[0], w[1]
                    )));
                }
            }
        }
        Ok(Self { bins })
    }

    /// Evaluate the relative uncertainty at (eta, pt).
    ///
    /// Always yields a value: eta outside the binned range uses the nearest
    /// bin, pt outside the knot range is clamped to the edge knots.
    pub fn uncertainty(&self, eta: f64, pt: f64) -> f64 {
        let bin = self.select_bin(eta);
        let knots = &bin.pt_knots;
        let values = &bin.values;

        // NaN clamps low, like any pt at or below the first knot.
        if pt.is_nan() || pt <= knots[0] {
            return values[0];
        }
        let last = knots.len() - 1;
        if pt >= knots[last] {
            return values[last];
        }
        // k is the first knot strictly above pt; linear between k-1 and k.
        let k = knots.partition_point(|&x| x <= pt);
        let t = (pt - knots[k - 1]) / (knots[k] - knots[k - 1]);
        values[k - 1] + t * (values[k] - values[k - 1])
    }

    fn select_bin(&self, eta: f64) -> &JecEtaBin {
        // Number of bins starting at or below eta; clamp into range.
        let k = self.bins.partition_point(|b| b.eta_lo <= eta);
        let idx = k.saturating_sub(1);
        &self.bins[idx]
    }

    /// Eta bins, in eta order.
    pub fn bins(&self) -> &[JecEtaBin] {
        &self.bins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn surface() -> JecUncertaintySurface {
        JecUncertaintySurface::from_bins(vec![
            JecEtaBin {
                eta_lo: -5.0,
                eta_hi: 0.0,
                pt_knots: vec![10.0, 100.0, 1000.0],
                values: vec![0.05, 0.02, 0.01],
            },
            JecEtaBin {
                eta_lo: 0.0,
                eta_hi: 5.0,
                pt_knots: vec![10.0, 100.0, 1000.0],
                values: vec![0.06, 0.03, 0.015],
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_linear_interpolation_between_knots() {
        let s = surface();
        assert_relative_eq!(s.uncertainty(1.0, 55.0), 0.045, max_relative = 1e-12);
        assert_relative_eq!(s.uncertainty(-1.0, 550.0), 0.015, max_relative = 1e-12);
    }

    #[test]
    fn test_pt_clamped_to_knot_range() {
        let s = surface();
        assert_eq!(s.uncertainty(1.0, 1.0), 0.06);
        assert_eq!(s.uncertainty(1.0, 5000.0), 0.015);
    }

    #[test]
    fn test_eta_clamped_to_binned_range() {
        let s = surface();
        assert_eq!(s.uncertainty(-9.0, 10.0), 0.05);
        assert_eq!(s.uncertainty(9.0, 10.0), 0.06);
    }

    #[test]
    fn test_non_finite_queries_clamp() {
        let s = surface();
        assert_eq!(s.uncertainty(1.0, f64::NAN), 0.06);
        assert_eq!(s.uncertainty(1.0, f64::INFINITY), 0.015);
        assert_eq!(s.uncertainty(f64::NAN, 10.0), 0.05);
    }

    #[test]
    fn test_eta_bin_selection_half_open() {
        let s = surface();
        // eta = 0.0 belongs to the second bin.
        assert_eq!(s.uncertainty(0.0, 10.0), 0.06);
    }

    #[test]
    fn test_from_bins_rejects_bad_input() {
        assert!(JecUncertaintySurface::from_bins(vec![]).is_err());
        assert!(
            JecUncertaintySurface::from_bins(vec![JecEtaBin {
                eta_lo: 0.0,
                eta_hi: 5.0,
                pt_knots: vec![10.0, 10.0],
                values: vec![0.1, 0.1],
            }])
            .is_err()
        );
        assert!(
            JecUncertaintySurface::from_bins(vec![JecEtaBin {
                eta_lo: 0.0,
                eta_hi: 5.0,
                pt_knots: vec![10.0, 20.0],
                values: vec![0.1],
            }])
            .is_err()
        );
    }

    #[test]
    fn test_surface_deserialization_validates() {
        let good = r#"{"bins":[{"eta_lo":0.0,"eta_hi":5.0,"pt_knots":[10.0,100.0],"values":[0.1,0.05]}]}"#;
        let s: JecUncertaintySurface = serde_json::from_str(good).unwrap();
        assert_eq!(s.bins().len(), 1);

        let bad = r#"{"bins":[{"eta_lo":0.0,"eta_hi":5.0,"pt_knots":[100.0,10.0],"values":[0.1,0.05]}]}"#;
        assert!(serde_json::from_str::<JecUncertaintySurface>(bad).is_err());
    }
}
