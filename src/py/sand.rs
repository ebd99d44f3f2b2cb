//! Cohesionless p-y models: Reese sand, API sand, small-strain overlay,
//! cemented c-φ silt.

use std::f64::consts::PI;

use super::model::PYCurve;
use super::{SiteCtx, api_sand_k, reese_sand_k, stiff_clay_k};
use crate::error::{PileError, PileResult};
use crate::helper::{Notes, interp1d};
use crate::units::PSF_TO_PSI;

fn require_phi(ctx: &SiteCtx, model: &str) -> PileResult<f64> {
    if ctx.phi_deg <= 0.0 {
        return Err(PileError::invalid_input(
            format!("py.{}.phi_missing", model),
            "Cohesionless p-y model needs a positive friction angle.",
        ));
    }
    Ok(ctx.phi_deg)
}

/// Reese sand ultimate: minimum of the shallow wedge and deep flow-around
/// expressions, lb/in.
pub(crate) fn reese_sand_p_ult(ctx: &SiteCtx, phi_deg: f64) -> f64 {
    let phi = phi_deg.to_radians();
    let alpha = phi / 2.0;
    let beta = PI / 4.0 + phi / 2.0;
    let k0 = 0.4;
    let ka = (PI / 4.0 - phi / 2.0).tan().powi(2);

    let (z, b, gamma) = (ctx.z_in, ctx.b, ctx.gamma_avg_pci);
    let tan_phi = phi.tan();
    let tan_beta = beta.tan();
    let tan_bp = (beta - phi).tan();

    let p_wedge = gamma
        * z
        * (k0 * z * tan_phi * beta.sin() / (tan_bp * alpha.cos())
            + (tan_beta / tan_bp) * (b + z * tan_beta * alpha.tan())
            + k0 * z * tan_beta * (tan_phi * beta.sin() - alpha.tan())
            - ka * b);
    let p_flow =
        ka * b * gamma * z * (tan_beta.powi(8) - 1.0) + k0 * b * gamma * z * tan_phi * tan_beta.powi(4);

    p_wedge.min(p_flow).max(0.0)
}

/// Assembles the tangent-matched line/parabola/line/flat sand shape.
fn sand_piecewise(kz: f64, b: f64, p_ult: f64) -> PYCurve {
    let y_u = 3.0 * b / 80.0;
    let y_m = b / 60.0;
    if p_ult <= 0.0 {
        return PYCurve::SandPiecewise {
            kz,
            c: 0.0,
            exponent: 1.0,
            y_m,
            p_m: 0.0,
            slope_m: 0.0,
            y_u,
            p_ult: 0.0,
        };
    }
    let p_m = 0.5 * p_ult;
    let slope_m = (p_ult - p_m) / (y_u - y_m);
    let exponent = slope_m * y_m / p_m;
    let c = p_m / y_m.powf(exponent);
    PYCurve::SandPiecewise {
        kz,
        c,
        exponent,
        y_m,
        p_m,
        slope_m,
        y_u,
        p_ult,
    }
}

/// Reese sand (model 6).
pub(crate) fn reese(ctx: &SiteCtx, notes: &mut Notes) -> PileResult<PYCurve> {
    let phi = require_phi(ctx, "reese_sand")?;
    let k = ctx
        .params
        .k_initial
        .unwrap_or_else(|| reese_sand_k(phi, ctx.submerged));
    let p_ult = reese_sand_p_ult(ctx, phi);
    if p_ult <= 0.0 {
        notes.push_once("Reese sand ultimate is zero at the ground surface node.");
    }
    Ok(sand_piecewise(k * ctx.z_in, ctx.b, p_ult))
}

/// API sand C1/C2/C3 coefficients, interpolated in φ.
fn api_coefficients(phi: f64) -> PileResult<(f64, f64, f64)> {
    const PHI: [f64; 5] = [20.0, 25.0, 30.0, 35.0, 40.0];
    const C1: [f64; 5] = [0.74, 1.21, 1.90, 3.00, 4.60];
    const C2: [f64; 5] = [1.60, 2.05, 2.65, 3.45, 4.30];
    const C3: [f64; 5] = [8.5, 15.0, 28.0, 55.0, 110.0];
    Ok((
        interp1d(&PHI, &C1, phi)?,
        interp1d(&PHI, &C2, phi)?,
        interp1d(&PHI, &C3, phi)?,
    ))
}

fn api_parts(ctx: &SiteCtx, phi: f64) -> PileResult<(f64, f64)> {
    let (c1, c2, c3) = api_coefficients(phi)?;
    let (z, b, gamma) = (ctx.z_in, ctx.b, ctx.gamma_avg_pci);
    let p_ult = ((c1 * z + c2 * b) * gamma * z).min(c3 * b * gamma * z);

    let a = if ctx.cyclic {
        0.9
    } else {
        (3.0 - 0.8 * z / b).max(0.9)
    };
    let k = match ctx.params.k_initial {
        Some(k) => k,
        None => api_sand_k(phi, ctx.submerged)?,
    };
    Ok((a * p_ult, k * z))
}

/// API sand (model 7): p = A·p_ult·tanh(k·z·y/(A·p_ult)).
pub(crate) fn api(ctx: &SiteCtx, _notes: &mut Notes) -> PileResult<PYCurve> {
    let phi = require_phi(ctx, "api_sand")?;
    let (a_pu, kz) = api_parts(ctx, phi)?;
    Ok(PYCurve::ApiSand { a_pu, kz })
}

/// Small-strain sand (model 8): Hardin-Drnevich hyperbolic overlay on the
/// API backbone, capped at A·p_ult.
pub(crate) fn small_strain(ctx: &SiteCtx, notes: &mut Notes) -> PileResult<PYCurve> {
    let phi = require_phi(ctx, "small_strain_sand")?;
    let (a_pu, kz) = api_parts(ctx, phi)?;

    let g_max = match ctx.params.g_max {
        Some(g) if g > 0.0 => g,
        _ => {
            // G_max = 1000·K₂·√σ'_m psi with K₂ = 30 + 2(φ−25),
            // σ'_m from K₀ = 0.4.
            let k2 = 30.0 + 2.0 * (phi - 25.0);
            let sigma_m = (0.6 * ctx.sigma_v_eff_psi).max(0.1);
            let derived = 1000.0 * k2 * sigma_m.sqrt();
            notes.push_once("G_max derived from K2·sqrt(sigma_m); supply g_max to override.");
            derived
        }
    };
    let y_r = if g_max > 0.0 && a_pu > 0.0 {
        a_pu / (4.0 * g_max)
    } else {
        1.0
    };

    Ok(PYCurve::SmallStrainSand {
        a_pu,
        kz,
        g_max,
        y_r,
    })
}

/// Cemented c-φ silt (model 16): frictional ultimate from the Reese sand
/// wedge plus the Matlock cohesive term; combined initial modulus when
/// cementation is present.
pub(crate) fn cemented_silt(ctx: &SiteCtx, notes: &mut Notes) -> PileResult<PYCurve> {
    let phi = require_phi(ctx, "cemented_silt")?;
    let p_u_phi = reese_sand_p_ult(ctx, phi);

    let (p_c, k_c) = if ctx.cu_psi > 0.0 {
        let np = (3.0 + ctx.gamma_avg_pci * ctx.z_in / ctx.cu_psi + 0.5 * ctx.z_in / ctx.b).min(9.0);
        (
            np * ctx.cu_psi * ctx.b,
            stiff_clay_k(ctx.cu_psi / PSF_TO_PSI, ctx.cyclic),
        )
    } else {
        notes.push_once("Cemented silt has no cohesion; frictional resistance only.");
        (0.0, 0.0)
    };

    let k_phi = ctx
        .params
        .k_initial
        .unwrap_or_else(|| reese_sand_k(phi, ctx.submerged));

    Ok(sand_piecewise(
        (k_phi + k_c) * ctx.z_in,
        ctx.b,
        p_u_phi + p_c,
    ))
}
