//! Broms (1964) closed-form lateral capacity check using the averaged
//! parameters of the top soil within 10 pile widths.

use serde::{Deserialize, Serialize};

use crate::enums::BendingAxis;
use crate::error::{PileError, PileResult};
use crate::helper::Notes;
use crate::models::section::SteelSection;
use crate::models::soil_profile::SoilProfile;
use crate::units::{IN_PER_FT, PCF_TO_PCI, PSF_TO_PSI};
use crate::validation::validate_field;

/// Failure mode governing the Broms capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BromsMode {
    ShortPile,
    LongPileYield,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BromsResult {
    /// Ultimate lateral capacity, lb.
    pub h_ult: f64,
    /// H_ult / 2.5, lb.
    pub h_allow: f64,
    pub mode: BromsMode,
    /// Whether the cohesive formulation was used.
    pub cohesive: bool,
    /// Short-pile capacity, lb.
    pub h_short: f64,
    /// Long-pile (yield-limited) capacity, lb.
    pub h_long: f64,
    pub notes: Vec<String>,
}

/// Bisection for a monotonically increasing residual.
fn bisect(mut lo: f64, mut hi: f64, residual: impl Fn(f64) -> f64) -> f64 {
    for _ in 0..80 {
        let mid = 0.5 * (lo + hi);
        if residual(mid) < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Broms lateral capacity of a single pile.
///
/// Only the top layer family matters: parameters are averaged over
/// 10 pile widths below grade, and the cohesive or cohesionless
/// formulation is chosen from the surface layer's type.
///
/// # Arguments
/// * `profile` - Soil profile.
/// * `section` - Pile section.
/// * `embedment` - Embedded length, feet.
/// * `axis` - Bending axis (yield moment and facing width).
/// * `lever_arm` - Height of the lateral load above ground, feet.
pub fn calc_broms_lateral(
    profile: &SoilProfile,
    section: &SteelSection,
    embedment: f64,
    axis: BendingAxis,
    lever_arm: f64,
) -> PileResult<BromsResult> {
    profile.validate()?;
    validate_field("embedment", Some(embedment), Some(0.1), None, "broms")?;
    validate_field("lever_arm", Some(lever_arm), Some(0.0), None, "broms")?;

    let mut notes = Notes::new();
    let b = section.width(axis);
    let l = embedment * IN_PER_FT;
    let e = lever_arm * IN_PER_FT;
    let m_y = section.yield_moment(axis);

    // Average the top 10·b of the profile.
    let zone_ft = (10.0 * b / IN_PER_FT).min(profile.total_depth());
    let mut cu_sum = 0.0;
    let mut phi_sum = 0.0;
    let mut gamma_sum = 0.0;
    let mut layer_top = 0.0;
    for (i, layer) in profile.layers.iter().enumerate() {
        if layer_top >= zone_ft {
            break;
        }
        let z_bot = (layer_top + layer.thickness).min(zone_ft);
        let dz = z_bot - layer_top;
        cu_sum += profile.cohesion(i) * dz;
        phi_sum += profile.friction_angle(i) * dz;
        gamma_sum += profile.effective_unit_weight_at(0.5 * (layer_top + z_bot)) * dz;
        layer_top += layer.thickness;
    }
    let cu = cu_sum / zone_ft * PSF_TO_PSI;
    let phi = phi_sum / zone_ft;
    let gamma = gamma_sum / zone_ft * PCF_TO_PCI;

    let cohesive = profile.layers[0].soil_type.is_cohesive();

    let (h_short, h_long) = if cohesive {
        if cu <= 0.0 {
            return Err(PileError::invalid_input(
                "broms.cu_missing",
                "Cohesive Broms check needs a positive undrained strength.",
            ));
        }
        if l <= 1.5 * b {
            notes.push("Embedment shorter than the 1.5·b dead zone; no short-pile capacity.");
            (0.0, 0.0)
        } else {
            // Short: moment balance with the 9·c_u·b resistance below 1.5·b.
            let h_cap = 9.0 * cu * b * (l - 1.5 * b);
            let short = bisect(0.0, h_cap, |h| {
                let f = h / (9.0 * cu * b);
                let g = l - 1.5 * b - f;
                h * (e + 1.5 * b + 0.5 * f) - 2.25 * cu * b * g * g
            });
            // Long: M_max = M_y, closed-form quadratic.
            let a = 1.0 / (18.0 * cu * b);
            let half = e + 1.5 * b;
            let long = (-half + (half * half + 4.0 * a * m_y).sqrt()) / (2.0 * a);
            (short, long)
        }
    } else {
        if phi <= 0.0 {
            return Err(PileError::invalid_input(
                "broms.phi_missing",
                "Cohesionless Broms check needs a positive friction angle.",
            ));
        }
        let kp = (45.0_f64 + phi / 2.0).to_radians().tan().powi(2);
        let short = 0.5 * gamma * b * l.powi(3) * kp / (e + l);
        // Long: M_max(H) = M_y with the max-moment depth f from shear balance.
        let mut hi = m_y / (e + b);
        let residual = |h: f64| {
            let f = (2.0 * h / (3.0 * gamma * b * kp)).sqrt();
            h * (e + 2.0 * f / 3.0) - m_y
        };
        while residual(hi) < 0.0 {
            hi *= 2.0;
        }
        let long = bisect(0.0, hi, residual);
        (short, long)
    };

    let (h_ult, mode) = if h_short <= h_long {
        (h_short, BromsMode::ShortPile)
    } else {
        (h_long, BromsMode::LongPileYield)
    };

    Ok(BromsResult {
        h_ult,
        h_allow: h_ult / 2.5,
        mode,
        cohesive,
        h_short,
        h_long,
        notes: notes.into_vec(),
    })
}
