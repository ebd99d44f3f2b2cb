//! Unit skin friction: α (total stress), β (effective stress), and the
//! Meyerhof SPT correlation.

use crate::enums::{AxialMethod, PileType, SoilType};
use crate::helper::Notes;
use crate::models::soil_profile::SoilProfile;
use crate::units::SIGMA_V_FLOOR_PSF;

/// Lateral earth pressure ratio K_s/K₀ by installation method.
fn ks_ratio(pile_type: PileType) -> f64 {
    match pile_type {
        PileType::DrivenSteel => 1.0,
        PileType::Helical => 1.25,
        PileType::Drilled => 0.8,
    }
}

/// API α from the strength ratio ψ = c_u/σ'_v, capped at 1.0.
fn alpha_factor(psi: f64) -> f64 {
    let alpha = if psi <= 1.0 {
        0.5 * psi.powf(-0.5)
    } else {
        0.5 * psi.powf(-0.25)
    };
    alpha.min(1.0)
}

/// Resolves `Auto` per layer: α for cohesive types, β for cohesionless.
pub fn resolve_method(method: AxialMethod, soil_type: SoilType) -> AxialMethod {
    match method {
        AxialMethod::Auto => {
            if soil_type.is_cohesive() {
                AxialMethod::Alpha
            } else {
                AxialMethod::Beta
            }
        }
        other => other,
    }
}

/// Unit skin friction at a mid-slice depth, psf.
///
/// # Arguments
/// * `profile` - Soil profile.
/// * `layer_index` - Layer the slice belongs to.
/// * `z_mid` - Mid-slice depth, feet.
/// * `pile_type` - Installation method (K_s ratio).
/// * `method` - Requested method; `Auto` resolves by soil type.
/// * `notes` - Analysis note buffer (floors and caps are reported once).
///
/// # Returns
/// * `(f_s in psf, method actually used)`
pub fn unit_skin_friction(
    profile: &SoilProfile,
    layer_index: usize,
    z_mid: f64,
    pile_type: PileType,
    method: AxialMethod,
    notes: &mut Notes,
) -> (f64, AxialMethod) {
    let soil_type = profile.layers[layer_index].soil_type;
    let resolved = resolve_method(method, soil_type);

    let f_s = match resolved {
        AxialMethod::Alpha => {
            let cu = profile.cohesion(layer_index);
            if cu <= 0.0 {
                notes.push_once("α method on a layer without cohesion gives zero skin friction.");
                0.0
            } else {
                let mut sigma = profile.calc_effective_stress(z_mid);
                if sigma < SIGMA_V_FLOOR_PSF {
                    sigma = SIGMA_V_FLOOR_PSF;
                    notes.push_once("Effective stress floored at 1 psf near the surface.");
                }
                let alpha = alpha_factor(cu / sigma);
                alpha * cu
            }
        }
        AxialMethod::Beta => {
            let phi = profile.friction_angle(layer_index);
            if phi <= 0.0 {
                notes.push_once("β method on a layer without friction gives zero skin friction.");
                0.0
            } else {
                let sigma = profile.calc_effective_stress(z_mid).max(SIGMA_V_FLOOR_PSF);
                let k0 = 1.0 - phi.to_radians().sin();
                let delta = 0.7 * phi;
                let beta = k0 * ks_ratio(pile_type) * delta.to_radians().tan();
                beta * sigma
            }
        }
        AxialMethod::MeyerhofSpt => {
            let n60 = profile.n60(layer_index);
            match soil_type {
                SoilType::Sand | SoilType::Gravel => {
                    let f = 2.0 * n60;
                    if f > 2000.0 {
                        notes.push_once("Meyerhof skin friction capped at 2000 psf in sand.");
                    }
                    f.min(2000.0)
                }
                SoilType::Silt => {
                    let f = 2.0 * n60;
                    if f > 1200.0 {
                        notes.push_once("Meyerhof skin friction capped at 1200 psf in silt.");
                    }
                    f.min(1200.0)
                }
                SoilType::Clay | SoilType::Organic => {
                    notes.push_once(
                        "Meyerhof SPT skin friction is zero in cohesive layers.",
                    );
                    0.0
                }
            }
        }
        AxialMethod::Auto => unreachable!("resolve_method never returns Auto"),
    };

    (f_s, resolved)
}
