//! Special-case p-y models: liquefied sand (Rollins and hybrid), loess,
//! elastic subgrade, user-defined tables.

use super::model::{PYCurve, PYParams};
use super::{SiteCtx, clay};
use crate::error::{PileError, PileResult};
use crate::helper::Notes;
use crate::units::{M_PER_FT, PSF_TO_PSI};

/// Rollins 2005 liquefied sand (model 9). Depth and displacement go
/// metric internally; the diameter factor P_d is clamped to the tested
/// 0.3-2.6 m width range.
pub(crate) fn rollins(ctx: &SiteCtx) -> PYCurve {
    let b_m = (ctx.b / 12.0 * M_PER_FT).clamp(0.3, 2.6);
    let pd = 3.81 * b_m.ln() + 5.6;
    PYCurve::Liquefied {
        z_m: ctx.z_in / 12.0 * M_PER_FT,
        pd,
    }
}

/// Liquefied hybrid (model 10): pointwise minimum of the Rollins curve
/// and a cyclic Matlock curve at residual strength (default 100 psf).
pub(crate) fn hybrid(ctx: &SiteCtx, notes: &mut Notes) -> PileResult<PYCurve> {
    let residual_cu_psf = ctx.params.residual_cu.unwrap_or(100.0);
    if residual_cu_psf <= 0.0 {
        return Err(PileError::invalid_input(
            "py.liquefied_hybrid.residual_cu",
            "Residual undrained strength must be positive.",
        ));
    }

    let params = PYParams {
        eps50: Some(0.02),
        ..ctx.params.clone()
    };
    let residual_ctx = SiteCtx {
        z_in: ctx.z_in,
        b: ctx.b,
        gamma_avg_pci: ctx.gamma_avg_pci,
        sigma_v_eff_psi: ctx.sigma_v_eff_psi,
        cu_psi: residual_cu_psf * PSF_TO_PSI,
        phi_deg: ctx.phi_deg,
        submerged: ctx.submerged,
        cyclic: true,
        params: &params,
    };
    let matlock = clay::matlock(&residual_ctx, None, notes)?;

    Ok(PYCurve::Min(
        Box::new(rollins(ctx)),
        Box::new(matlock),
    ))
}

/// Loess (model 15): CPT-based ultimate with cyclic degradation and a
/// hyperbolic secant-modulus decay; 50% surface reduction tapering out at
/// z = 2b.
pub(crate) fn loess(ctx: &SiteCtx) -> PileResult<PYCurve> {
    let q_c = match ctx.params.q_c {
        Some(q) if q > 0.0 => q,
        _ => {
            return Err(PileError::invalid_input(
                "py.loess.q_c_missing",
                "Loess p-y model needs the CPT tip resistance q_c (psi).",
            ));
        }
    };
    const N_CPT: f64 = 0.409;
    const C_N: f64 = 0.24;
    let n_cyc = ctx.params.n_cyc.unwrap_or(1.0).max(1.0);

    let surface = (0.5 + 0.25 * ctx.z_in / ctx.b).min(1.0);
    let p_u = surface * N_CPT * q_c * ctx.b / (1.0 + C_N * n_cyc.log10());

    Ok(PYCurve::Hyperbolic {
        k_i: 10.0 * p_u / ctx.b,
        p_u,
    })
}

/// Elastic subgrade (model 17): p = k·z·y, unbounded.
pub(crate) fn elastic(ctx: &SiteCtx) -> PileResult<PYCurve> {
    let k = match ctx.params.k_initial {
        Some(k) if k > 0.0 => k,
        _ => {
            return Err(PileError::invalid_input(
                "py.elastic.k_missing",
                "Elastic subgrade model needs the modulus k (lb/in³).",
            ));
        }
    };
    Ok(PYCurve::Elastic { kz: k * ctx.z_in })
}

/// User-defined table (model 18): piecewise linear through the supplied
/// (y, p) pairs, flat beyond the last point.
pub(crate) fn user(ctx: &SiteCtx) -> PileResult<PYCurve> {
    let points = match &ctx.params.user_curve {
        Some(pts) if !pts.is_empty() => pts.clone(),
        _ => {
            return Err(PileError::invalid_input(
                "py.user.table_missing",
                "User-defined p-y model needs at least one (y, p) pair.",
            ));
        }
    };

    let mut prev = (0.0_f64, 0.0_f64);
    for &(y, p) in &points {
        if y < prev.0 || (y - prev.0).abs() < f64::EPSILON && y != 0.0 {
            return Err(PileError::invalid_input(
                "py.user.not_sorted",
                "User p-y table must have strictly increasing displacements.",
            ));
        }
        if p < prev.1 {
            return Err(PileError::invalid_input(
                "py.user.not_monotone",
                "User p-y table must have nondecreasing resistance.",
            ));
        }
        if y < 0.0 || p < 0.0 {
            return Err(PileError::invalid_input(
                "py.user.negative",
                "User p-y table values must be non-negative.",
            ));
        }
        prev = (y, p);
    }

    Ok(PYCurve::Table { points })
}
