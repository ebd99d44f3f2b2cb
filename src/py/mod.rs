//! Nonlinear lateral soil-response (p-y) curve library.
//!
//! Eighteen models share one contract: a precomputed [`PYCurve`] built
//! once per node, evaluating resistance p (lb/in) and tangent slope for
//! any displacement y (in). Constants are resolved at build time so the
//! solver inner loop stays arithmetic-only.

pub mod clay;
pub mod model;
pub mod rock;
pub mod sand;
pub mod special;

pub use model::{PYCurve, PYModel, PYParams};

use crate::enums::SoilType;
use crate::error::PileResult;
use crate::helper::{Notes, interp1d};
use crate::models::soil_profile::SoilProfile;
use crate::units::{IN_PER_FT, PCF_TO_PCI, PSF_TO_PSI};

/// Per-node site context handed to the curve builders.
///
/// All fields are in inch-pound units: depths/widths in inches, stresses
/// in psi, unit weights in lb/in³.
pub(crate) struct SiteCtx<'a> {
    pub z_in: f64,
    pub b: f64,
    /// Average effective unit weight above the node, lb/in³.
    pub gamma_avg_pci: f64,
    pub sigma_v_eff_psi: f64,
    pub cu_psi: f64,
    pub phi_deg: f64,
    pub submerged: bool,
    pub cyclic: bool,
    pub params: &'a PYParams,
}

/// Resolves `Auto` to the concrete model for a soil type.
pub fn resolve_model(model: PYModel, soil_type: SoilType) -> PYModel {
    match model {
        PYModel::Auto => {
            if soil_type.is_cohesive() {
                PYModel::MatlockSoftClay
            } else {
                PYModel::ApiSand
            }
        }
        other => other,
    }
}

/// Default ε₅₀ from undrained strength, after the consistency table
/// (soft 0.02 through hard 0.004).
pub fn default_eps50(cu_psf: f64) -> f64 {
    if cu_psf < 500.0 {
        0.02
    } else if cu_psf < 1000.0 {
        0.01
    } else if cu_psf < 2000.0 {
        0.007
    } else if cu_psf < 4000.0 {
        0.005
    } else {
        0.004
    }
}

/// Initial subgrade modulus for Reese sand, lb/in³.
pub(crate) fn reese_sand_k(phi: f64, submerged: bool) -> f64 {
    if submerged {
        if phi < 30.0 {
            20.0
        } else if phi <= 36.0 {
            60.0
        } else {
            125.0
        }
    } else if phi < 30.0 {
        25.0
    } else if phi <= 36.0 {
        90.0
    } else {
        225.0
    }
}

/// Initial subgrade modulus for the API sand tanh shape, lb/in³,
/// interpolated from the RP2A chart.
pub(crate) fn api_sand_k(phi: f64, submerged: bool) -> PileResult<f64> {
    const PHI: [f64; 5] = [25.0, 30.0, 33.0, 36.0, 40.0];
    const SUB: [f64; 5] = [20.0, 45.0, 80.0, 120.0, 200.0];
    const DRY: [f64; 5] = [25.0, 65.0, 115.0, 175.0, 275.0];
    interp1d(&PHI, if submerged { &SUB } else { &DRY }, phi)
}

/// Initial subgrade modulus for stiff clay, lb/in³, keyed by average
/// undrained strength; cyclic loading uses the reduced column.
pub(crate) fn stiff_clay_k(cu_psf: f64, cyclic: bool) -> f64 {
    let k_static = if cu_psf < 500.0 {
        30.0
    } else if cu_psf < 1000.0 {
        100.0
    } else if cu_psf < 2000.0 {
        500.0
    } else if cu_psf < 4000.0 {
        1000.0
    } else {
        2000.0
    };
    if cyclic { 0.4 * k_static } else { k_static }
}

/// Reese A_s coefficient for stiff clay below free water, by z/b.
pub(crate) fn stiff_clay_as(z_over_b: f64, cyclic: bool) -> PileResult<f64> {
    const ZB: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 4.0, 6.0];
    const STATIC: [f64; 6] = [0.20, 0.33, 0.43, 0.50, 0.55, 0.60];
    const CYCLIC: [f64; 6] = [0.20, 0.24, 0.28, 0.31, 0.33, 0.35];
    interp1d(&ZB, if cyclic { &CYCLIC } else { &STATIC }, z_over_b)
}

/// Builds the p-y curve for a node.
///
/// # Arguments
/// * `profile` - Soil profile (provides the layer and stress state).
/// * `z_ft` - Node depth below ground, feet. Nodes landing exactly on a
///   layer boundary use the upper layer.
/// * `width` - Pile width facing the load, inches.
/// * `cyclic` - Cyclic loading flag, forwarded to every model that
///   distinguishes it.
/// * `notes` - Analysis note buffer.
///
/// # Returns
/// * The precomputed curve, or `InvalidInput` when the resolved model is
///   missing a required parameter.
pub fn build_curve(
    profile: &SoilProfile,
    z_ft: f64,
    width: f64,
    cyclic: bool,
    notes: &mut Notes,
) -> PileResult<PYCurve> {
    let layer_index = profile.get_layer_index_upper(z_ft);
    let layer = &profile.layers[layer_index];
    let model = resolve_model(layer.py_model, layer.soil_type);

    let z_in = z_ft * IN_PER_FT;
    let sigma_v_eff_psi = profile.calc_effective_stress(z_ft) * PSF_TO_PSI;
    let gamma_pci = profile.effective_unit_weight_at(z_ft) * PCF_TO_PCI;
    let gamma_avg_pci = if z_in > 0.0 {
        sigma_v_eff_psi / z_in
    } else {
        gamma_pci
    };

    let ctx = SiteCtx {
        z_in,
        b: width,
        gamma_avg_pci,
        sigma_v_eff_psi,
        cu_psi: profile.cohesion(layer_index) * PSF_TO_PSI,
        phi_deg: profile.friction_angle(layer_index),
        submerged: profile.is_submerged(z_ft),
        cyclic,
        params: &layer.py_params,
    };

    match model {
        PYModel::Auto => unreachable!("resolve_model never returns Auto"),
        PYModel::MatlockSoftClay => clay::matlock(&ctx, None, notes),
        PYModel::ApiSoftClay => clay::matlock(&ctx, ctx.params.j_factor, notes),
        PYModel::ReeseStiffClayWater => clay::reese_stiff_water(&ctx, notes),
        PYModel::WelchReeseStiffClay => clay::welch(&ctx, 1.0, None, notes),
        PYModel::BrownModifiedStiffClay => clay::brown(&ctx, notes),
        PYModel::PiedmontResidual => clay::welch(&ctx, 0.85, Some(0.007), notes),
        PYModel::ReeseSand => sand::reese(&ctx, notes),
        PYModel::ApiSand => sand::api(&ctx, notes),
        PYModel::SmallStrainSand => sand::small_strain(&ctx, notes),
        PYModel::CementedSilt => sand::cemented_silt(&ctx, notes),
        PYModel::WeakRock => rock::weak(&ctx, notes),
        PYModel::StrongRock => rock::strong(&ctx),
        PYModel::MassiveRock => rock::massive(&ctx, notes),
        PYModel::LiquefiedSandRollins => Ok(special::rollins(&ctx)),
        PYModel::LiquefiedSandHybrid => special::hybrid(&ctx, notes),
        PYModel::Loess => special::loess(&ctx),
        PYModel::ElasticSubgrade => special::elastic(&ctx),
        PYModel::UserDefined => special::user(&ctx),
    }
}

/// Samples a curve into (y, p) pairs for reporting.
pub fn sample_curve(curve: &PYCurve, b: f64, n_points: usize) -> Vec<(f64, f64)> {
    let y_max = 0.25 * b;
    (0..n_points)
        .map(|i| {
            let y = y_max * i as f64 / (n_points - 1).max(1) as f64;
            (y, curve.p(y))
        })
        .collect()
}
