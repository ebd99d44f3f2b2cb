//! Axial load-transfer springs: t-z shaft friction and q-z tip bearing
//! after API RP2A (1993).

use serde::{Deserialize, Serialize};

use crate::enums::{AxialMethod, PileType};
use crate::error::PileResult;
use crate::helper::Notes;
use crate::models::section::SteelSection;
use crate::models::soil_profile::SoilProfile;
use crate::units::Y_FLOOR_IN;

/// Shaft transfer curve at one node: trilinear to the peak displacement
/// z_c, flat beyond. Odd in displacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TZCurve {
    /// Peak shaft transfer, lb/in of pile length.
    pub t_max: f64,
    /// Displacement at peak, in (≈ 0.01·d).
    pub z_c: f64,
}

impl TZCurve {
    /// Shaft transfer at an axial displacement, lb/in.
    pub fn t(&self, u: f64) -> f64 {
        let sign = if u < 0.0 { -1.0 } else { 1.0 };
        let ua = u.abs();
        let t = if ua <= 0.5 * self.z_c {
            0.75 * self.t_max * ua / (0.5 * self.z_c)
        } else if ua <= self.z_c {
            0.75 * self.t_max + 0.25 * self.t_max * (ua - 0.5 * self.z_c) / (0.5 * self.z_c)
        } else {
            self.t_max
        };
        sign * t
    }

    /// Secant stiffness with the displacement floored, lb/in².
    pub fn secant(&self, u: f64) -> f64 {
        let ua = u.abs().max(Y_FLOOR_IN);
        self.t(ua) / ua
    }
}

/// Tip bearing curve: hyperbolic to 0.9·q_max at 0.1·b, linear to q_max
/// at 0.2·b, flat beyond. No tension resistance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QZCurve {
    /// Peak tip force, lb.
    pub q_max: f64,
    /// Pile width b, in.
    pub b: f64,
}

impl QZCurve {
    /// Tip resistance at a settlement (positive down), lb.
    pub fn q(&self, u: f64) -> f64 {
        if u <= 0.0 {
            return 0.0;
        }
        let u1 = 0.1 * self.b;
        let u2 = 0.2 * self.b;
        if u <= u1 {
            // q_max·u/(a + u) passing through 0.9·q_max at u1.
            let a = u1 / 9.0;
            self.q_max * u / (a + u)
        } else if u <= u2 {
            0.9 * self.q_max + 0.1 * self.q_max * (u - u1) / (u2 - u1)
        } else {
            self.q_max
        }
    }

    /// Secant stiffness, lb/in; zero when the tip is in tension.
    pub fn secant(&self, u: f64) -> f64 {
        if u < -Y_FLOOR_IN {
            return 0.0;
        }
        let ua = u.max(Y_FLOOR_IN);
        self.q(ua) / ua
    }
}

/// Builds the shaft transfer curve at a node from the resolved unit skin
/// friction (α in cohesive layers, β in cohesionless).
pub fn build_tz(
    profile: &SoilProfile,
    z_ft: f64,
    section: &SteelSection,
    pile_type: PileType,
    notes: &mut Notes,
) -> TZCurve {
    let layer_index = profile.get_layer_index_upper(z_ft);
    let (f_s, _) = crate::axial::skin_friction::unit_skin_friction(
        profile,
        layer_index,
        z_ft,
        pile_type,
        AxialMethod::Auto,
        notes,
    );
    TZCurve {
        // psf → psi, times the box perimeter.
        t_max: f_s / 144.0 * section.perimeter(),
        z_c: 0.01 * section.d,
    }
}

/// Builds the tip bearing curve at the embedment depth.
pub fn build_qz(
    profile: &SoilProfile,
    embedment: f64,
    section: &SteelSection,
    notes: &mut Notes,
) -> PileResult<QZCurve> {
    let q_b = crate::axial::end_bearing::unit_end_bearing(profile, embedment, section.bf, notes)?;
    Ok(QZCurve {
        q_max: q_b * section.tip_area() / 144.0,
        b: section.bf,
    })
}
