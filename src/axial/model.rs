use serde::{Deserialize, Serialize};

use crate::enums::AxialMethod;

/// One layer slice's contribution to shaft capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerContribution {
    /// Slice top, feet.
    pub z_top: f64,
    /// Slice bottom, feet.
    pub z_bot: f64,
    /// Mid-slice depth used for stresses, feet.
    pub z_mid: f64,
    /// Resolved skin friction method for the slice.
    pub method: AxialMethod,
    /// Unit skin friction, psf.
    pub f_s: f64,
    /// Shaft increment, lb.
    pub delta_q: f64,
}

/// Axial capacity result.
///
/// Forces in lb. Allowable values divide by the caller's factors of
/// safety; factored values apply the LRFD resistance factors by
/// installation method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxialResult {
    pub q_skin: f64,
    pub q_bearing: f64,
    pub q_ult_compression: f64,
    pub q_ult_tension: f64,
    pub q_allow_compression: f64,
    pub q_allow_tension: f64,
    pub q_factored_compression: f64,
    pub q_factored_tension: f64,
    /// End bearing unit resistance, psf.
    pub q_b_unit: f64,
    pub layers: Vec<LayerContribution>,
    pub notes: Vec<String>,
}
