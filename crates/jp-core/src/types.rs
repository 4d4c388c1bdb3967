//! Kinematic value types for jetprep

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A direction in the detector: pseudorapidity and azimuth.
///
/// `phi` is an angular coordinate with period 2π; distances between
/// directions must canonicalize the azimuthal difference (see
/// `jp_enrich::matching`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    /// Pseudorapidity
    pub eta: f64,
    /// Azimuthal angle (radians)
    pub phi: f64,
}

impl Direction {
    /// Create a direction from (eta, phi)
    pub fn new(eta: f64, phi: f64) -> Self {
        Self { eta, phi }
    }
}

/// A four-momentum in Cartesian components.
///
/// The smearing transform treats four-momenta as a linear space: `Add`,
/// `Sub` and `Mul<f64>` act component-wise on all four components, matching
/// Lorentz-vector arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FourMomentum {
    /// x momentum component
    pub px: f64,
    /// y momentum component
    pub py: f64,
    /// z momentum component
    pub pz: f64,
    /// Energy
    pub e: f64,
}

impl FourMomentum {
    /// Create from Cartesian components
    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Create from collider coordinates (pt, eta, phi, E)
    pub fn from_pt_eta_phi_e(pt: f64, eta: f64, phi: f64, e: f64) -> Self {
        Self { px: pt * phi.cos(), py: pt * phi.sin(), pz: pt * eta.sinh(), e }
    }

    /// Transverse momentum `sqrt(px^2 + py^2)`
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Pseudorapidity `asinh(pz/pt)`.
    ///
    /// A momentum exactly along the beam axis has no finite pseudorapidity;
    /// ±infinity is returned with the sign of `pz` (0.0 for a null vector).
    pub fn eta(&self) -> f64 {
        let pt = self.pt();
        if pt == 0.0 {
            if self.pz == 0.0 {
                return 0.0;
            }
            return if self.pz > 0.0 { f64::INFINITY } else { f64::NEG_INFINITY };
        }
        (self.pz / pt).asinh()
    }

    /// Azimuthal angle `atan2(py, px)` in (−π, π]
    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }

    /// Energy component
    pub fn energy(&self) -> f64 {
        self.e
    }

    /// Direction (eta, phi) of the spatial part
    pub fn direction(&self) -> Direction {
        Direction::new(self.eta(), self.phi())
    }
}

impl Add for FourMomentum {
    type Output = FourMomentum;

    fn add(self, rhs: FourMomentum) -> FourMomentum {
        FourMomentum::new(self.px + rhs.px, self.py + rhs.py, self.pz + rhs.pz, self.e + rhs.e)
    }
}

impl Sub for FourMomentum {
    type Output = FourMomentum;

    fn sub(self, rhs: FourMomentum) -> FourMomentum {
        FourMomentum::new(self.px - rhs.px, self.py - rhs.py, self.pz - rhs.pz, self.e - rhs.e)
    }
}

impl Mul<f64> for FourMomentum {
    type Output = FourMomentum;

    fn mul(self, s: f64) -> FourMomentum {
        FourMomentum::new(self.px * s, self.py * s, self.pz * s, self.e * s)
    }
}
