//! Cohesive p-y models: Matlock soft clay, Reese stiff clay with free
//! water, Welch-Reese, Brown modified, Piedmont residual.

use super::model::{ClaySoftening, PYCurve};
use super::{SiteCtx, default_eps50, stiff_clay_as, stiff_clay_k};
use crate::error::{PileError, PileResult};
use crate::helper::Notes;
use crate::units::PSF_TO_PSI;
use crate::validation::validate_field;

fn require_cu(ctx: &SiteCtx, model: &str) -> PileResult<f64> {
    if ctx.cu_psi <= 0.0 {
        return Err(PileError::invalid_input(
            format!("py.{}.cu_missing", model),
            "Cohesive p-y model needs a positive undrained strength.",
        ));
    }
    Ok(ctx.cu_psi)
}

fn resolve_eps50(ctx: &SiteCtx, fallback: Option<f64>) -> PileResult<f64> {
    match ctx.params.eps50 {
        Some(e) => {
            validate_field("eps50", Some(e), Some(1e-5), Some(0.1), "py")?;
            Ok(e)
        }
        None => Ok(fallback.unwrap_or_else(|| default_eps50(ctx.cu_psi / PSF_TO_PSI))),
    }
}

/// Matlock soft-clay ultimate: N_p·c_u·b with N_p = 3 + γ'z/c_u + Jz/b
/// capped at 9.
fn matlock_p_ult(ctx: &SiteCtx, cu: f64, j: f64, notes: &mut Notes) -> f64 {
    let np = 3.0 + ctx.gamma_avg_pci * ctx.z_in / cu + j * ctx.z_in / ctx.b;
    if np >= 9.0 {
        notes.push_once("Matlock N_p reached the flow-around cap of 9.");
    }
    np.min(9.0) * cu * ctx.b
}

/// Matlock soft clay (model 1) and API soft clay with user J (model 2).
///
/// Static: p = 0.5·p_ult·(y/y50)^(1/3), flat past 8·y50. Cyclic: capped
/// at 0.72·p_ult, degrading above 3·y50 when shallower than the
/// transition depth z_r = 6b/(γ'b/c_u + J).
pub(crate) fn matlock(
    ctx: &SiteCtx,
    j_override: Option<f64>,
    notes: &mut Notes,
) -> PileResult<PYCurve> {
    let cu = require_cu(ctx, "matlock")?;
    let j = j_override.unwrap_or(0.5);
    validate_field("j_factor", Some(j), Some(0.0), Some(3.0), "py")?;
    let eps50 = resolve_eps50(ctx, None)?;

    let p_ult = matlock_p_ult(ctx, cu, j, notes);
    let y50 = 2.5 * eps50 * ctx.b;

    let softening = if ctx.cyclic {
        let denom = ctx.gamma_avg_pci * ctx.b / cu + j;
        let z_r = 6.0 * ctx.b / denom;
        Some(ClaySoftening {
            z_over_zr: (ctx.z_in / z_r).min(1.0),
        })
    } else {
        None
    };

    Ok(PYCurve::PowerClay {
        p_ult,
        y50,
        exponent: 1.0 / 3.0,
        cap_mult: 8.0,
        softening,
    })
}

/// Welch-Reese stiff clay without free water (model 4) and the Piedmont
/// residual variant (model 14, 0.85 on p_ult, ε₅₀ = 0.007).
pub(crate) fn welch(
    ctx: &SiteCtx,
    p_mult: f64,
    eps50_default: Option<f64>,
    notes: &mut Notes,
) -> PileResult<PYCurve> {
    let cu = require_cu(ctx, "welch")?;
    let eps50 = resolve_eps50(ctx, eps50_default)?;

    let p_ult = p_mult * matlock_p_ult(ctx, cu, 0.5, notes);
    Ok(PYCurve::PowerClay {
        p_ult,
        y50: 2.5 * eps50 * ctx.b,
        exponent: 0.25,
        cap_mult: 16.0,
        softening: None,
    })
}

/// Brown modified stiff clay (model 5): initial subgrade line up to the
/// intersection with the 0.25-power shape.
pub(crate) fn brown(ctx: &SiteCtx, notes: &mut Notes) -> PileResult<PYCurve> {
    let cu = require_cu(ctx, "brown")?;
    let eps50 = resolve_eps50(ctx, None)?;

    let k = ctx
        .params
        .k_initial
        .unwrap_or_else(|| stiff_clay_k(cu / PSF_TO_PSI, ctx.cyclic));
    let p_ult = matlock_p_ult(ctx, cu, 0.5, notes);

    Ok(PYCurve::BrownClay {
        kz: k * ctx.z_in,
        p_ult,
        y50: 2.5 * eps50 * ctx.b,
    })
}

/// Reese stiff clay below free water (model 3): initial line, parabola to
/// the A_s peak, linear unloading, residual floor.
pub(crate) fn reese_stiff_water(ctx: &SiteCtx, notes: &mut Notes) -> PileResult<PYCurve> {
    let cu = require_cu(ctx, "reese_stiff")?;
    let eps50 = resolve_eps50(ctx, None)?;

    let p_ca = (2.0 * cu + ctx.gamma_avg_pci * ctx.z_in + 2.83 * cu * ctx.z_in / ctx.b) * ctx.b;
    let p_cb = 11.0 * cu * ctx.b;
    let p_c = p_ca.min(p_cb);
    if p_cb < p_ca {
        notes.push_once("Stiff clay flow-around (11·c_u·b) governs p_c.");
    }

    let k = ctx
        .params
        .k_initial
        .unwrap_or_else(|| stiff_clay_k(cu / PSF_TO_PSI, ctx.cyclic));
    let y50 = eps50 * ctx.b;
    let z_over_b = ctx.z_in / ctx.b;
    let a_s = stiff_clay_as(z_over_b, ctx.cyclic)?;

    let y_peak = 6.0 * a_s * y50;
    let p_peak = 0.5 * p_c * (6.0 * a_s).sqrt();
    let p_res = (0.5 * p_c * (1.225 - 0.75 * z_over_b).max(0.225)).min(p_peak);

    Ok(PYCurve::StiffClayWater {
        kz: k * ctx.z_in,
        p_c,
        y50,
        y_peak,
        p_peak,
        unload_slope: 0.0625 * p_c / y50,
        p_res,
    })
}
