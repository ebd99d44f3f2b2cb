//! Pile tip end bearing: N_c for cohesive soils, interpolated Meyerhof
//! N_q with a limiting resistance for cohesionless soils.

use crate::error::PileResult;
use crate::helper::{Notes, interp1d};
use crate::models::soil_profile::SoilProfile;
use crate::units::{IN_PER_FT, SIGMA_V_FLOOR_PSF};

/// Meyerhof N_q for driven piles, interpolated in φ (degrees).
pub fn meyerhof_nq(phi: f64) -> PileResult<f64> {
    const PHI: [f64; 12] = [
        0.0, 20.0, 25.0, 28.0, 30.0, 32.0, 34.0, 36.0, 38.0, 40.0, 42.0, 45.0,
    ];
    const NQ: [f64; 12] = [
        1.0, 8.0, 12.0, 20.0, 25.0, 35.0, 45.0, 60.0, 80.0, 100.0, 130.0, 180.0,
    ];
    interp1d(&PHI, &NQ, phi)
}

/// Unit end bearing at the pile tip, psf.
///
/// Cohesive: q_b = N_c·c_u with N_c = min(6·(1 + 0.2·D/b), 9).
/// Cohesionless: q_b = min(N_q·σ'_v, 1000·N_q·tanφ).
///
/// # Arguments
/// * `profile` - Soil profile.
/// * `embedment` - Tip depth, feet.
/// * `width` - Pile width b, inches.
/// * `notes` - Analysis note buffer.
pub fn unit_end_bearing(
    profile: &SoilProfile,
    embedment: f64,
    width: f64,
    notes: &mut Notes,
) -> PileResult<f64> {
    let layer_index = profile.get_layer_index(embedment);
    let soil_type = profile.layers[layer_index].soil_type;

    if soil_type.is_cohesive() {
        let cu = profile.cohesion(layer_index);
        let d_over_b = embedment * IN_PER_FT / width;
        let nc = (6.0 * (1.0 + 0.2 * d_over_b)).min(9.0);
        if nc >= 9.0 {
            notes.push_once("End bearing N_c reached the deep-foundation cap of 9.");
        }
        Ok(nc * cu)
    } else {
        let phi = profile.friction_angle(layer_index);
        let sigma = profile
            .calc_effective_stress(embedment)
            .max(SIGMA_V_FLOOR_PSF);
        let nq = meyerhof_nq(phi)?;
        let q_b = nq * sigma;
        let q_b_max = 1000.0 * nq * phi.to_radians().tan();
        if q_b > q_b_max {
            notes.push_once("End bearing capped by the Meyerhof limiting resistance.");
        }
        Ok(q_b.min(q_b_max))
    }
}
