//! Rock p-y models: Reese weak rock, vuggy strong rock, Liang massive
//! rock with Hoek-Brown strength.

use super::model::PYCurve;
use super::{SiteCtx, sand};
use crate::error::{PileError, PileResult};
use crate::helper::Notes;
use crate::validation::validate_field;

fn require_qur(ctx: &SiteCtx, model: &str) -> PileResult<f64> {
    match ctx.params.q_ur {
        Some(q) if q > 0.0 => Ok(q),
        _ => Err(PileError::invalid_input(
            format!("py.{}.q_ur_missing", model),
            "Rock p-y model needs the unconfined compressive strength q_ur (psi).",
        )),
    }
}

/// Reese 1997 weak rock (model 11).
///
/// Initial slope M_ir = k_ir·E_ir with k_ir = 100 + 400·x/(3b) capped at
/// 500; power branch 0.5·p_ur·(y/y_rm)^0.25 capped at p_ur.
pub(crate) fn weak(ctx: &SiteCtx, notes: &mut Notes) -> PileResult<PYCurve> {
    let q_ur = require_qur(ctx, "weak_rock")?;
    let rqd = ctx.params.rqd.unwrap_or(50.0);
    validate_field("rqd", Some(rqd), Some(0.0), Some(100.0), "py")?;
    let krm = ctx.params.krm.unwrap_or(5e-4);
    validate_field("krm", Some(krm), Some(1e-6), Some(0.1), "py")?;
    let e_ir = match ctx.params.e_ir {
        Some(e) if e > 0.0 => e,
        _ => {
            notes.push_once("Weak rock E_ir defaulted to 100·q_ur.");
            100.0 * q_ur
        }
    };

    let (x, b) = (ctx.z_in, ctx.b);
    let alpha_r = 1.0 - (2.0 / 3.0) * rqd / 100.0;
    let p_ur = if x <= 3.0 * b {
        alpha_r * q_ur * b * (1.0 + 1.4 * x / b)
    } else {
        5.2 * alpha_r * q_ur * b
    };

    let k_ir = (100.0 + 400.0 * x / (3.0 * b)).min(500.0);
    let m_ir = k_ir * e_ir;
    let y_rm = krm * b;
    let y_a = (p_ur / (2.0 * y_rm.powf(0.25) * m_ir)).powf(4.0 / 3.0);

    Ok(PYCurve::WeakRock {
        m_ir,
        y_a,
        y_rm,
        p_ur,
    })
}

/// Vuggy strong rock (model 12): bilinear with s_u = q_ur/2.
pub(crate) fn strong(ctx: &SiteCtx) -> PileResult<PYCurve> {
    let q_ur = require_qur(ctx, "strong_rock")?;
    let s_u = q_ur / 2.0;
    Ok(PYCurve::StrongRock {
        k1: 2000.0 * s_u,
        y1: 0.0004 * ctx.b,
        k2: 100.0 * s_u,
        p_u: ctx.b * s_u,
    })
}

/// Hoek-Brown equivalent Mohr-Coulomb strength (c' psi, φ' deg) at the
/// node's confinement level.
fn hoek_brown_equivalent(sigma_ci: f64, m_i: f64, gsi: f64, sigma_v_psi: f64) -> (f64, f64) {
    let m_b = m_i * ((gsi - 100.0) / 28.0).exp();
    let s = ((gsi - 100.0) / 9.0).exp();
    let a = 0.5 + ((-gsi / 15.0).exp() - (-20.0_f64 / 3.0).exp()) / 6.0;

    let sigma_3n = (sigma_v_psi.max(1.0) / sigma_ci).min(0.25);
    let term = (s + m_b * sigma_3n).powf(a - 1.0);
    let numer = 6.0 * a * m_b * term;
    let denom = 2.0 * (1.0 + a) * (2.0 + a) + numer;
    let phi = (numer / denom).asin().to_degrees();

    let c = sigma_ci * ((1.0 + 2.0 * a) * s + (1.0 - a) * m_b * sigma_3n) * term
        / ((1.0 + a) * (2.0 + a) * (1.0 + numer / ((1.0 + a) * (2.0 + a))).sqrt());

    (c, phi)
}

/// Liang massive rock (model 13): hyperbolic p-y with the frictional plus
/// cohesive ultimate built from Hoek-Brown equivalent c', φ'.
pub(crate) fn massive(ctx: &SiteCtx, notes: &mut Notes) -> PileResult<PYCurve> {
    let sigma_ci = match ctx.params.sigma_ci {
        Some(v) if v > 0.0 => v,
        _ => {
            return Err(PileError::invalid_input(
                "py.massive_rock.sigma_ci_missing",
                "Massive rock needs the intact strength sigma_ci (psi).",
            ));
        }
    };
    let m_i = ctx.params.m_i.unwrap_or(10.0);
    let gsi = ctx.params.gsi.unwrap_or(50.0);
    validate_field("gsi", Some(gsi), Some(5.0), Some(100.0), "py")?;
    let nu = ctx.params.nu.unwrap_or(0.25);
    let e_rock = match ctx.params.e_rock {
        Some(e) if e > 0.0 => e,
        _ => {
            notes.push_once("Massive rock E defaulted to 250·sigma_ci.");
            250.0 * sigma_ci
        }
    };

    let (c_eq, phi_eq) = hoek_brown_equivalent(sigma_ci, m_i, gsi, ctx.sigma_v_eff_psi);

    // Frictional wedge with φ' plus the cohesive flow term with c',
    // composed the same way as the cemented silt model.
    let p_u_phi = if phi_eq > 0.0 {
        sand::reese_sand_p_ult(ctx, phi_eq)
    } else {
        0.0
    };
    let np = (3.0 + ctx.gamma_avg_pci * ctx.z_in / c_eq.max(1e-6) + 0.5 * ctx.z_in / ctx.b).min(9.0);
    let p_u = p_u_phi + np * c_eq * ctx.b;

    let k_i = 0.65 * e_rock / (1.0 - nu * nu);

    Ok(PYCurve::Hyperbolic { k_i, p_u })
}
