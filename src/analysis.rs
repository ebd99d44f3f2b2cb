//! Top-level analysis entry points composing the soil model, spring
//! libraries and solvers. This is the sole boundary the surrounding
//! presentation layers call.

use crate::axial::{self, AxialResult};
use crate::bnwf::{self, BNWFResult, BnwfRequest};
use crate::broms::{self, BromsResult};
use crate::enums::{AxialMethod, BendingAxis, CombinationMethod, HeadCondition, PileType};
use crate::error::{PileError, PileResult};
use crate::group::{self, GroupResult};
use crate::helper::CancelFlag;
use crate::lateral::{self, LateralResult};
use crate::load_combinations::{self, CombinationSet};
use crate::models::loads::LoadInput;
use crate::models::section::SteelSection;
use crate::models::soil_profile::SoilProfile;

/// Ultimate and design axial capacity of a single pile.
pub fn axial_capacity(
    profile: &SoilProfile,
    section: &SteelSection,
    embedment: f64,
    pile_type: PileType,
    method: AxialMethod,
    fs_compression: f64,
    fs_tension: f64,
) -> PileResult<AxialResult> {
    axial::calc_axial_capacity(
        profile,
        section,
        embedment,
        pile_type,
        method,
        fs_compression,
        fs_tension,
    )
}

/// Nonlinear lateral pile response under a ground-line shear and moment.
#[allow(clippy::too_many_arguments)]
pub fn lateral_analysis(
    profile: &SoilProfile,
    section: &SteelSection,
    embedment: f64,
    axis: BendingAxis,
    shear: f64,
    moment_ground: f64,
    head: HeadCondition,
    cyclic: bool,
    cancel: Option<&CancelFlag>,
) -> PileResult<LateralResult> {
    lateral::calc_lateral_analysis(
        profile,
        section,
        embedment,
        axis,
        shear,
        moment_ground,
        head,
        cyclic,
        cancel,
    )
}

/// Group reduction of a single-pile capacity.
#[allow(clippy::too_many_arguments)]
pub fn group_analysis(
    profile: &SoilProfile,
    section: &SteelSection,
    embedment: f64,
    n_rows: usize,
    n_cols: usize,
    spacing: f64,
    q_single: f64,
) -> PileResult<GroupResult> {
    group::calc_group_analysis(
        profile, section, embedment, n_rows, n_cols, spacing, q_single,
    )
}

/// Combined axial/lateral BNWF analysis (static, pushover, optional P-Δ).
pub fn bnwf_analysis(
    profile: &SoilProfile,
    section: &SteelSection,
    request: &BnwfRequest,
    cancel: Option<&CancelFlag>,
) -> PileResult<BNWFResult> {
    bnwf::calc_bnwf_analysis(profile, section, request, cancel)
}

/// ASCE 7-22 load combination families from unfactored components.
pub fn load_combinations(
    loads: &LoadInput,
    method: CombinationMethod,
) -> PileResult<CombinationSet> {
    load_combinations::generate_combinations(loads, method)
}

/// Broms closed-form lateral capacity check.
pub fn broms_lateral(
    profile: &SoilProfile,
    section: &SteelSection,
    embedment: f64,
    axis: BendingAxis,
    lever_arm: f64,
) -> PileResult<BromsResult> {
    broms::calc_broms_lateral(profile, section, embedment, axis, lever_arm)
}

/// Smallest embedment whose allowable capacities meet the demands.
///
/// Marches in half-foot steps, then refines by bisection to 0.01 ft.
///
/// # Arguments
/// * `demand_compression` - Required allowable compression, lb.
/// * `demand_tension` - Required allowable tension, lb.
/// * `max_embedment` - Search ceiling, feet (clamped to the profile depth).
///
/// # Returns
/// * The sized embedment and its axial result, or `InvalidInput` when the
///   demand cannot be met within the ceiling.
#[allow(clippy::too_many_arguments)]
pub fn required_embedment(
    profile: &SoilProfile,
    section: &SteelSection,
    pile_type: PileType,
    method: AxialMethod,
    fs_compression: f64,
    fs_tension: f64,
    demand_compression: f64,
    demand_tension: f64,
    max_embedment: f64,
) -> PileResult<(f64, AxialResult)> {
    let ceiling = max_embedment.min(profile.total_depth());
    let meets = |embed: f64| -> PileResult<bool> {
        let r = axial::calc_axial_capacity(
            profile,
            section,
            embed,
            pile_type,
            method,
            fs_compression,
            fs_tension,
        )?;
        Ok(r.q_allow_compression >= demand_compression && r.q_allow_tension >= demand_tension)
    };

    let mut lo = 1.0_f64.min(ceiling);
    let mut hi = lo;
    while !meets(hi)? {
        if hi >= ceiling {
            return Err(PileError::invalid_input(
                "sizing.unachievable",
                format!(
                    "Axial demand not met at the {:.1} ft embedment ceiling.",
                    ceiling
                ),
            ));
        }
        lo = hi;
        hi = (hi + 0.5).min(ceiling);
    }

    while hi - lo > 0.01 {
        let mid = 0.5 * (lo + hi);
        if meets(mid)? {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    let result = axial::calc_axial_capacity(
        profile,
        section,
        hi,
        pile_type,
        method,
        fs_compression,
        fs_tension,
    )?;
    Ok((hi, result))
}
