//! Per-jet output annotations.
//!
//! Internally the enrichment result carries `Option`s; the literal sentinel
//! constants consumers expect (−999 for trigger kinematics, −1 for the match
//! distance and resolution values) are applied only here, when converting to
//! the serialized record. The key strings are part of the output contract
//! and must not change.

use crate::trigger::TriggerLeg;
use jp_calib::Resolution;
use jp_core::FourMomentum;
use serde::{Deserialize, Serialize};

/// Sentinel for trigger-leg kinematics when no leg matched.
pub const TRIGGER_SENTINEL: f64 = -999.0;

/// Sentinel for the match distance and for resolution values outside the
/// table range.
pub const UNAVAILABLE_SENTINEL: f64 = -1.0;

/// The matched trigger leg and its distance to the jet.
#[derive(Debug, Clone, Copy)]
pub struct MatchedLeg {
    /// The leg selected by the matcher
    pub leg: TriggerLeg,
    /// Angular distance between jet and leg
    pub delta_r: f64,
}

/// Enrichment result for one jet, before sentinel conversion.
#[derive(Debug, Clone)]
pub struct Enrichment {
    /// Trigger association, if any leg was within threshold
    pub trigger: Option<MatchedLeg>,
    /// Smeared (or passed-through) four-momentum
    pub smeared: FourMomentum,
    /// JER scale factors at the jet's eta, if covered by the table
    pub resolution: Option<Resolution>,
    /// Relative JEC uncertainty at the jet's (eta, pt)
    pub jec_uncertainty: f64,
    /// Constituent keys, verbatim from the input jet
    pub constituents: Vec<u32>,
}

/// Serialized per-jet annotation record.
///
/// Field names are the exact keys downstream consumers read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JetAnnotation {
    /// Matched trigger-leg eta, or −999
    #[serde(rename = "HLTjetEta")]
    pub hlt_jet_eta: f64,
    /// Matched trigger-leg phi, or −999
    #[serde(rename = "HLTjetPhi")]
    pub hlt_jet_phi: f64,
    /// Matched trigger-leg pt, or −999
    #[serde(rename = "HLTjetPt")]
    pub hlt_jet_pt: f64,
    /// Matched trigger-leg energy, or −999
    #[serde(rename = "HLTjetE")]
    pub hlt_jet_e: f64,
    /// Angular distance to the matched leg, or −1
    #[serde(rename = "HLTjetDeltaR")]
    pub hlt_jet_delta_r: f64,
    /// Smeared-momentum eta
    #[serde(rename = "SmearedPEta")]
    pub smeared_p_eta: f64,
    /// Smeared-momentum phi
    #[serde(rename = "SmearedPhi")]
    pub smeared_phi: f64,
    /// Smeared-momentum pt
    #[serde(rename = "SmearedPt")]
    pub smeared_pt: f64,
    /// Smeared-momentum energy
    #[serde(rename = "SmearedE")]
    pub smeared_e: f64,
    /// Nominal JER scale factor, or −1
    #[serde(rename = "JER")]
    pub jer: f64,
    /// Upward JER variant, or −1
    #[serde(rename = "JERup")]
    pub jer_up: f64,
    /// Downward JER variant, or −1
    #[serde(rename = "JERdown")]
    pub jer_down: f64,
    /// Relative JEC uncertainty
    #[serde(rename = "jecUncertainty")]
    pub jec_uncertainty: f64,
    /// Constituent keys into the external particle collection
    #[serde(rename = "pfKeys")]
    pub pf_keys: Vec<u32>,
}

impl From<Enrichment> for JetAnnotation {
    fn from(r: Enrichment) -> Self {
        let (eta, phi, pt, e, delta_r) = match r.trigger {
            Some(m) => (m.leg.eta, m.leg.phi, m.leg.pt, m.leg.energy, m.delta_r),
            None => (
                TRIGGER_SENTINEL,
                TRIGGER_SENTINEL,
                TRIGGER_SENTINEL,
                TRIGGER_SENTINEL,
                UNAVAILABLE_SENTINEL,
            ),
        };
        let (jer, jer_up, jer_down) = match r.resolution {
            Some(res) => (res.nominal, res.up, res.down),
            None => (UNAVAILABLE_SENTINEL, UNAVAILABLE_SENTINEL, UNAVAILABLE_SENTINEL),
        };
        Self {
            hlt_jet_eta: eta,
            hlt_jet_phi: phi,
            hlt_jet_pt: pt,
            hlt_jet_e: e,
            hlt_jet_delta_r: delta_r,
            smeared_p_eta: r.smeared.eta(),
            smeared_phi: r.smeared.phi(),
            smeared_pt: r.smeared.pt(),
            smeared_e: r.smeared.energy(),
            jer,
            jer_up,
            jer_down,
            jec_uncertainty: r.jec_uncertainty,
            pf_keys: r.constituents,
        }
    }
}

/// An input jet with its annotation attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedJet {
    /// Measured transverse momentum
    pub pt: f64,
    /// Measured pseudorapidity
    pub eta: f64,
    /// Measured azimuthal angle
    pub phi: f64,
    /// Measured energy
    pub e: f64,
    /// Derived annotations
    #[serde(flatten)]
    pub annotation: JetAnnotation,
}

/// One event of the output collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedEvent {
    /// Event number
    pub id: u64,
    /// Annotated jets, same order and count as the input collection
    pub jets: Vec<AnnotatedJet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrichment(trigger: Option<MatchedLeg>, resolution: Option<Resolution>) -> Enrichment {
        Enrichment {
            trigger,
            smeared: FourMomentum::from_pt_eta_phi_e(50.0, 1.0, 0.5, 80.0),
            resolution,
            jec_uncertainty: 0.023,
            constituents: vec![5, 9],
        }
    }

    #[test]
    fn test_unmatched_jet_gets_sentinels() {
        let ann = JetAnnotation::from(enrichment(None, None));
        assert_eq!(ann.hlt_jet_eta, -999.0);
        assert_eq!(ann.hlt_jet_phi, -999.0);
        assert_eq!(ann.hlt_jet_pt, -999.0);
        assert_eq!(ann.hlt_jet_e, -999.0);
        assert_eq!(ann.hlt_jet_delta_r, -1.0);
        assert_eq!(ann.jer, -1.0);
        assert_eq!(ann.jer_up, -1.0);
        assert_eq!(ann.jer_down, -1.0);
    }

    #[test]
    fn test_matched_jet_copies_leg_kinematics() {
        let leg = TriggerLeg { eta: 0.5, phi: 1.0, pt: 330.0, energy: 400.0 };
        let ann = JetAnnotation::from(enrichment(
            Some(MatchedLeg { leg, delta_r: 0.1 }),
            Some(Resolution { nominal: 1.061, up: 1.084, down: 1.038 }),
        ));
        assert_eq!(ann.hlt_jet_eta, 0.5);
        assert_eq!(ann.hlt_jet_phi, 1.0);
        assert_eq!(ann.hlt_jet_pt, 330.0);
        assert_eq!(ann.hlt_jet_e, 400.0);
        assert_eq!(ann.hlt_jet_delta_r, 0.1);
        assert_eq!(ann.jer, 1.061);
    }

    #[test]
    fn test_serialized_keys_are_verbatim() {
        let ann = JetAnnotation::from(enrichment(None, None));
        let value = serde_json::to_value(&ann).unwrap();
        let obj = value.as_object().unwrap();
        let expect = [
            "HLTjetEta",
            "HLTjetPhi",
            "HLTjetPt",
            "HLTjetE",
            "HLTjetDeltaR",
            "SmearedPEta",
            "SmearedPhi",
            "SmearedPt",
            "SmearedE",
            "JER",
            "JERup",
            "JERdown",
            "jecUncertainty",
            "pfKeys",
        ];
        assert_eq!(obj.len(), expect.len());
        for key in expect {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }
}
