//! Lateral pile analysis: nonlinear Winkler finite-difference solver with
//! p-y springs from the curve library.

pub mod fdm;
pub mod model;

pub use model::{LateralResult, SampledPYCurve};

use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

use crate::enums::{BendingAxis, HeadCondition};
use crate::error::{PileError, PileResult};
use crate::helper::{CancelFlag, Notes};
use crate::models::section::SteelSection;
use crate::models::soil_profile::SoilProfile;
use crate::py::{self, PYCurve};
use crate::units::{DEFAULT_NODE_COUNT, IN_PER_FT, MAX_ITERATIONS};
use crate::validation::validate_field;
use fdm::{HeadBc, ToeBc};

/// Builds one p-y curve per node over the embedded length.
pub(crate) fn build_node_curves(
    profile: &SoilProfile,
    embedment: f64,
    width: f64,
    cyclic: bool,
    n_nodes: usize,
    notes: &mut Notes,
) -> PileResult<Vec<PYCurve>> {
    (0..n_nodes)
        .map(|i| {
            let z_ft = embedment * i as f64 / (n_nodes - 1) as f64;
            py::build_curve(profile, z_ft, width, cyclic, notes)
        })
        .collect()
}

/// Derived node profiles from a converged displacement vector.
pub(crate) struct BeamProfiles {
    pub slope: Vec<f64>,
    pub moment: Vec<f64>,
    pub shear: Vec<f64>,
}

/// Recovers slope, moment and shear by central differences over a
/// ghost-extended displacement vector.
pub(crate) fn recover_profiles(
    y: &[f64],
    ei: f64,
    h: f64,
    head: HeadBc,
    toe: ToeBc,
) -> BeamProfiles {
    let n = y.len();
    // ext[i + 2] = y_i, with two ghost values at each end.
    let mut ext = vec![0.0; n + 4];
    ext[2..n + 2].copy_from_slice(y);

    match head {
        HeadBc::Free { shear, moment } => {
            let a = moment * h * h / ei;
            let c = 2.0 * shear * h.powi(3) / ei;
            ext[1] = 2.0 * y[0] - y[1] + a;
            ext[0] = 4.0 * y[0] - 4.0 * y[1] + y[2] + 2.0 * a - c;
        }
        HeadBc::FixedRotation { shear } => {
            let c = 2.0 * shear * h.powi(3) / ei;
            ext[1] = y[1];
            ext[0] = y[2] - c;
        }
    }
    match toe {
        ToeBc::Free => {
            ext[n + 2] = 2.0 * y[n - 1] - y[n - 2];
            ext[n + 3] = y[n - 3] + 2.0 * ext[n + 2] - 2.0 * y[n - 2];
        }
        ToeBc::Clamped => {
            ext[n + 2] = y[n - 2];
            ext[n + 3] = y[n - 3];
        }
    }

    let mut slope = vec![0.0; n];
    let mut moment = vec![0.0; n];
    let mut shear = vec![0.0; n];
    for i in 0..n {
        let e = &ext[i..i + 5]; // e[2] == y_i
        slope[i] = (e[3] - e[1]) / (2.0 * h);
        moment[i] = ei * (e[1] - 2.0 * e[2] + e[3]) / (h * h);
        shear[i] = ei * ((e[4] - e[0]) - 2.0 * (e[3] - e[1])) / (2.0 * h.powi(3));
    }
    BeamProfiles {
        slope,
        moment,
        shear,
    }
}

/// Shallowest zero crossing of the deflected shape below the head, feet.
pub(crate) fn zero_crossing_depth(y: &[f64], h_ft: f64) -> Option<f64> {
    let head_sign = y.iter().find(|v| v.abs() > 0.0)?.signum();
    for i in 1..y.len() {
        if y[i].signum() != head_sign && y[i - 1].signum() == head_sign {
            let frac = y[i - 1] / (y[i - 1] - y[i]);
            return Some(h_ft * (i as f64 - 1.0 + frac));
        }
    }
    None
}

/// Nonlinear lateral pile analysis.
///
/// # Arguments
/// * `profile` - Soil profile.
/// * `section` - Pile section.
/// * `embedment` - Embedded length, feet.
/// * `axis` - Bending axis (selects EI and the load-facing width).
/// * `shear` - Applied lateral load at the ground line, lb.
/// * `moment_ground` - Applied moment at the ground line, ft·lb.
/// * `head` - Free or rotation-fixed head.
/// * `cyclic` - Cyclic loading flag, forwarded to every p-y model.
/// * `cancel` - Optional cancellation flag.
///
/// # Returns
/// * `LateralResult`; non-convergence is reported in the record, never as
///   an error.
#[allow(clippy::too_many_arguments)]
pub fn calc_lateral_analysis(
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
    profile.validate()?;
    validate_field("embedment", Some(embedment), Some(0.1), None, "lateral")?;
    if embedment > profile.total_depth() {
        return Err(PileError::invalid_input(
            "lateral.embedment.exceeds_profile",
            format!(
                "Embedment {:.1} ft exceeds the {:.1} ft soil profile.",
                embedment,
                profile.total_depth()
            ),
        ));
    }

    let mut notes = Notes::new();
    for line in profile.derive_report() {
        notes.push(line);
    }

    let ei = section.ei(axis);
    let width = section.width(axis);
    let n_nodes = DEFAULT_NODE_COUNT + 1;
    let length_in = embedment * IN_PER_FT;
    let h = length_in / DEFAULT_NODE_COUNT as f64;
    if h <= 0.0 {
        return Err(PileError::degenerate(
            "embedment shorter than one finite-difference element",
        ));
    }

    let moment_in_lb = moment_ground * IN_PER_FT;
    let head_bc = match head {
        HeadCondition::Free => HeadBc::Free {
            shear,
            moment: moment_in_lb,
        },
        HeadCondition::Fixed => {
            if moment_ground != 0.0 {
                notes.push(
                    "Fixed head: the applied ground moment is absorbed by the rotational restraint.",
                );
            }
            HeadBc::FixedRotation { shear }
        }
    };

    let curves = build_node_curves(profile, embedment, width, cyclic, n_nodes, &mut notes)?;

    let solution = fdm::solve_winkler(
        ei,
        h,
        &curves,
        head_bc,
        ToeBc::Free,
        None,
        None,
        MAX_ITERATIONS,
        cancel,
    )?;
    if solution.cancelled {
        notes.push("Analysis cancelled by the caller; best iterate returned.");
    } else if !solution.converged {
        notes.push(format!(
            "Lateral solver hit the {} iteration budget without converging.",
            MAX_ITERATIONS
        ));
    }
    if solution.floor_hit {
        notes.push_once("Secant stiffness displacement floored at 1e-6 in.");
    }

    assemble_result(
        profile, section, embedment, axis, cyclic, &curves, solution, head_bc, ToeBc::Free, h,
        notes,
    )
}

/// Builds the result record shared by the FDM and BNWF lateral blocks.
#[allow(clippy::too_many_arguments)]
pub(crate) fn assemble_result(
    profile: &SoilProfile,
    section: &SteelSection,
    embedment: f64,
    axis: BendingAxis,
    cyclic: bool,
    curves: &[PYCurve],
    solution: fdm::WinklerSolution,
    head_bc: HeadBc,
    toe_bc: ToeBc,
    h: f64,
    mut notes: Notes,
) -> PileResult<LateralResult> {
    let ei = section.ei(axis);
    let width = section.width(axis);
    let n_nodes = curves.len();
    let y = &solution.y;

    let profiles = recover_profiles(y, ei, h, head_bc, toe_bc);
    let h_ft = h / IN_PER_FT;
    let depth: Vec<f64> = (0..n_nodes).map(|i| h_ft * i as f64).collect();
    let soil_reaction: Vec<f64> = y.iter().zip(curves).map(|(&yi, c)| c.p(yi)).collect();

    let (mut m_max, mut i_max) = (0.0_f64, 0usize);
    for (i, &m) in profiles.moment.iter().enumerate() {
        if m.abs() > m_max {
            m_max = m.abs();
            i_max = i;
        }
    }

    // Representative curves at the quarter points plus every layer
    // boundary inside the embedment; the depth map collapses coincident
    // depths and keeps the samples ordered.
    let mut depth_map: BTreeMap<OrderedFloat<f64>, SampledPYCurve> = BTreeMap::new();
    let quarter_points = [0.0, 0.25, 0.5, 0.75, 1.0].map(|f| f * embedment);
    let boundaries = profile
        .layers
        .iter()
        .filter_map(|layer| layer.depth)
        .filter(|&d| d < embedment);
    for z in quarter_points.into_iter().chain(boundaries) {
        if depth_map.contains_key(&OrderedFloat(z)) {
            continue;
        }
        let curve = crate::py::build_curve(profile, z, width, cyclic, &mut notes)?;
        depth_map.insert(
            OrderedFloat(z),
            SampledPYCurve {
                depth: z,
                points: crate::py::sample_curve(&curve, width, 25),
            },
        );
    }
    let py_curves: Vec<SampledPYCurve> = depth_map.into_values().collect();

    let m_y = section.yield_moment(axis);
    let result = LateralResult {
        y_ground: y[0],
        depth_zero_deflection: zero_crossing_depth(y, h_ft),
        depth,
        deflection: y.clone(),
        slope: profiles.slope,
        moment: profiles.moment,
        shear: profiles.shear,
        soil_reaction,
        m_max,
        depth_m_max: h_ft * i_max as f64,
        iterations: solution.iterations,
        converged: solution.converged,
        dcr: if m_y > 0.0 { m_max / m_y } else { 0.0 },
        py_curves,
        notes: notes.into_vec(),
    };

    for v in result
        .deflection
        .iter()
        .chain(&result.moment)
        .chain(&result.shear)
    {
        if !v.is_finite() {
            return Err(PileError::singular("non-finite value in solver output"));
        }
    }

    Ok(result)
}
