//! MC resolution smearing.

use crate::annotation::UNAVAILABLE_SENTINEL;
use jp_calib::ResolutionTable;
use jp_core::FourMomentum;

/// Rescale the measured-minus-true momentum residual by the nominal
/// resolution ratio at the measured jet's eta.
///
/// With no truth information (non-simulated input, or a simulated jet with
/// no generator match) the measured momentum passes through unchanged. The
/// true momentum is the anchor: only the residual is rescaled, not the
/// measured momentum itself.
///
/// When the table has no entry for the jet's eta, the unavailable sentinel
/// is applied as the factor mechanically; the annotation reports the same
/// value in its JER fields so consumers can recognize the result as invalid.
pub fn smear(
    table: &ResolutionTable,
    measured: FourMomentum,
    truth: Option<FourMomentum>,
) -> FourMomentum {
    let Some(truth) = truth else {
        return measured;
    };
    let factor = table.lookup(measured.eta()).map_or(UNAVAILABLE_SENTINEL, |r| r.nominal);
    truth + (measured - truth) * factor
}
