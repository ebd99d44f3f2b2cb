//! Beam on nonlinear Winkler foundation: combined axial/lateral pile
//! model with p-y, t-z and q-z springs, optional P-Δ, static and pushover
//! modes.

pub mod model;
pub mod solver;
pub mod springs;

pub use model::{BNWFResult, BnwfRequest, PushoverPoint};
pub use springs::{QZCurve, TZCurve};

use crate::enums::{BnwfMode, HeadCondition};
use crate::error::{PileError, PileResult};
use crate::helper::{CancelFlag, Notes};
use crate::lateral::fdm::{self, HeadBc, ToeBc};
use crate::models::section::SteelSection;
use crate::models::soil_profile::SoilProfile;
use crate::py::PYCurve;
use crate::units::{DEFAULT_NODE_COUNT, IN_PER_FT, MAX_ITERATIONS, PCF_TO_PCI};
use crate::validation::validate_field;

/// Gravitational acceleration, in/s².
const GRAVITY_IN_S2: f64 = 386.4;

/// Upper bound on the buckling bisection multiplier.
const BUCKLING_MULT_CAP: f64 = 65_536.0;

struct Mesh {
    h: f64,
    n_nodes: usize,
    ei: f64,
    ea: f64,
    width: f64,
}

/// Whether the axial spring set carries any resistance at all.
fn axial_springs_trivial(tz: &[TZCurve], qz: &QZCurve) -> bool {
    tz.iter().all(|t| t.t_max <= 0.0) && qz.q_max <= 0.0
}

/// Axial solve with the zero-resistance special case: no springs and no
/// load is the trivial solution; no springs under load cannot equilibrate.
fn axial_state(
    mesh: &Mesh,
    tz: &[TZCurve],
    qz: &QZCurve,
    v_head: f64,
    seed: Option<&[f64]>,
    cancel: Option<&CancelFlag>,
) -> PileResult<solver::AxialSolution> {
    if axial_springs_trivial(tz, qz) {
        if v_head.abs() < 1e-9 {
            return Ok(solver::AxialSolution {
                u: vec![0.0; mesh.n_nodes],
                force: vec![0.0; mesh.n_nodes],
                iterations: 0,
                converged: true,
            });
        }
        return Err(PileError::singular(
            "no shaft or tip resistance to carry the axial load",
        ));
    }
    solver::solve_axial(
        mesh.ea,
        mesh.h,
        tz,
        qz,
        v_head,
        seed,
        MAX_ITERATIONS,
        cancel,
    )
}

/// Head flexibility → stiffness about {axial, lateral, rotation} at the
/// converged secant state. Unit-load solves use the free-head boundary so
/// the matrix describes the pile-soil system, not the loading restraint.
fn head_stiffness(
    mesh: &Mesh,
    curves: &[PYCurve],
    y_state: &[f64],
    axial_force: Option<&[f64]>,
    tz: &[TZCurve],
    qz: &QZCurve,
    u_state: &[f64],
) -> PileResult<[[f64; 3]; 3]> {
    let mut k = [[0.0; 3]; 3];

    // Axial term.
    if !axial_springs_trivial(tz, qz) {
        let sys = solver::assemble_axial(mesh.ea, mesh.h, u_state, tz, qz, 1.0);
        let u = sys.solve()?;
        if u[0].abs() > 1e-300 {
            k[0][0] = 1.0 / u[0];
        }
    }

    // Lateral 2x2 from unit shear and unit moment.
    let springs = fdm::secant_springs(curves, y_state);
    let mut flex = [[0.0_f64; 2]; 2];
    for (col, (shear, moment)) in [(1.0, 0.0), (0.0, 1.0)].iter().enumerate() {
        let bc = HeadBc::Free {
            shear: *shear,
            moment: *moment,
        };
        let sys = fdm::assemble(mesh.ei, mesh.h, &springs, bc, ToeBc::Clamped, axial_force);
        let y = sys.solve()?;
        let profiles = crate::lateral::recover_profiles(&y, mesh.ei, mesh.h, bc, ToeBc::Clamped);
        flex[0][col] = y[0];
        // Head rotation conjugate to the applied moment is -dy/dz with z
        // downward; this keeps the flexibility symmetric positive definite.
        flex[1][col] = -profiles.slope[0];
    }
    let det = flex[0][0] * flex[1][1] - flex[0][1] * flex[1][0];
    if det.abs() > 1e-300 {
        k[1][1] = flex[1][1] / det;
        k[1][2] = -flex[0][1] / det;
        k[2][1] = -flex[1][0] / det;
        k[2][2] = flex[0][0] / det;
    }

    Ok(k)
}

/// Lumped mass: pile weight plus the tributary soil prism wherever the
/// p-y spring engages.
fn mass_vector(
    profile: &SoilProfile,
    section: &SteelSection,
    curves: &[PYCurve],
    mesh: &Mesh,
    embedment: f64,
) -> Vec<f64> {
    let m_pile = section.weight_plf / 12.0 * mesh.h / GRAVITY_IN_S2;
    (0..mesh.n_nodes)
        .map(|i| {
            let z_ft = embedment * i as f64 / (mesh.n_nodes - 1) as f64;
            let engaged = curves[i].secant_stiffness(0.0, 1e-6) > 0.0;
            let m_soil = if engaged {
                let idx = profile.get_layer_index_upper(z_ft);
                let gamma = profile.unit_weight(idx, profile.is_submerged(z_ft)) * PCF_TO_PCI;
                gamma * mesh.width * mesh.width * mesh.h / GRAVITY_IN_S2
            } else {
                0.0
            };
            let end = i == 0 || i == mesh.n_nodes - 1;
            (m_pile + m_soil) * if end { 0.5 } else { 1.0 }
        })
        .collect()
}

/// Bisection on the axial multiplier until the lateral tangent system
/// loses positive definiteness.
fn critical_load(
    mesh: &Mesh,
    curves: &[PYCurve],
    y_state: &[f64],
    head_bc: HeadBc,
    tz: &[TZCurve],
    qz: &QZCurve,
    v_ref: f64,
    cancel: Option<&CancelFlag>,
) -> PileResult<Option<f64>> {
    let tangent = fdm::tangent_springs(curves, y_state);

    let force_at = |mult: f64| -> Vec<f64> {
        match axial_state(mesh, tz, qz, mult * v_ref, None, cancel) {
            Ok(sol) => sol.force,
            // No shaft shedding available: constant force profile.
            Err(_) => vec![mult * v_ref; mesh.n_nodes],
        }
    };
    let stable = |mult: f64| -> PileResult<bool> {
        let force = force_at(mult);
        let sys = fdm::assemble(
            mesh.ei,
            mesh.h,
            &tangent,
            head_bc,
            ToeBc::Clamped,
            Some(&force),
        );
        match sys.det_sign() {
            Ok(sign) => Ok(sign > 0),
            Err(PileError::Singular { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    };

    let mut hi = 1.0;
    while stable(hi)? {
        hi *= 2.0;
        if hi > BUCKLING_MULT_CAP {
            return Ok(None);
        }
    }
    let mut lo = if hi > 1.0 { hi / 2.0 } else { 0.0 };
    for _ in 0..50 {
        let mid = 0.5 * (lo + hi);
        if stable(mid)? {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(Some(0.5 * (lo + hi) * v_ref))
}

/// Combined axial/lateral BNWF analysis.
///
/// # Arguments
/// * `profile` - Soil profile.
/// * `section` - Pile section.
/// * `req` - Analysis request (loads, mode, options).
/// * `cancel` - Optional cancellation flag.
///
/// # Returns
/// * `BNWFResult`; non-convergence is reported in the record, never as an
///   error.
pub fn calc_bnwf_analysis(
    profile: &SoilProfile,
    section: &SteelSection,
    req: &BnwfRequest,
    cancel: Option<&CancelFlag>,
) -> PileResult<BNWFResult> {
    profile.validate()?;
    validate_field("embedment", Some(req.embedment), Some(0.1), None, "bnwf")?;
    if req.embedment > profile.total_depth() {
        return Err(PileError::invalid_input(
            "bnwf.embedment.exceeds_profile",
            format!(
                "Embedment {:.1} ft exceeds the {:.1} ft soil profile.",
                req.embedment,
                profile.total_depth()
            ),
        ));
    }
    if req.mode != BnwfMode::Static {
        validate_field(
            "pushover_steps",
            Some(req.pushover_steps as f64),
            Some(1.0),
            Some(10_000.0),
            "bnwf",
        )?;
        validate_field(
            "pushover_max_mult",
            Some(req.pushover_max_mult),
            Some(1e-6),
            None,
            "bnwf",
        )?;
    }

    let mut notes = Notes::new();
    for line in profile.derive_report() {
        notes.push(line);
    }

    let mesh = Mesh {
        h: req.embedment * IN_PER_FT / DEFAULT_NODE_COUNT as f64,
        n_nodes: DEFAULT_NODE_COUNT + 1,
        ei: section.ei(req.axis),
        ea: section.ea(),
        width: section.width(req.axis),
    };

    let curves = crate::lateral::build_node_curves(
        profile,
        req.embedment,
        mesh.width,
        req.cyclic,
        mesh.n_nodes,
        &mut notes,
    )?;
    let tz: Vec<TZCurve> = (0..mesh.n_nodes)
        .map(|i| {
            let z_ft = req.embedment * i as f64 / (mesh.n_nodes - 1) as f64;
            springs::build_tz(profile, z_ft, section, req.pile_type, &mut notes)
        })
        .collect();
    let qz = springs::build_qz(profile, req.embedment, section, &mut notes)?;

    // Axial block first: the force profile feeds the geometric stiffness.
    let axial = axial_state(&mesh, &tz, &qz, req.v_axial, None, cancel)?;
    if !axial.converged {
        notes.push(format!(
            "Axial solver hit the {} iteration budget without converging.",
            MAX_ITERATIONS
        ));
    }
    let geo = if req.include_p_delta {
        Some(axial.force.as_slice())
    } else {
        None
    };

    let moment_in_lb = req.m_ground * IN_PER_FT;
    let head_bc = match req.head {
        HeadCondition::Free => HeadBc::Free {
            shear: req.h_lateral,
            moment: moment_in_lb,
        },
        HeadCondition::Fixed => {
            if req.m_ground != 0.0 {
                notes.push(
                    "Fixed head: the applied ground moment is absorbed by the rotational restraint.",
                );
            }
            HeadBc::FixedRotation {
                shear: req.h_lateral,
            }
        }
    };

    let lat = fdm::solve_winkler(
        mesh.ei,
        mesh.h,
        &curves,
        head_bc,
        ToeBc::Clamped,
        geo,
        None,
        MAX_ITERATIONS,
        cancel,
    )?;
    if lat.cancelled {
        notes.push("Analysis cancelled by the caller; best iterate returned.");
    } else if !lat.converged {
        notes.push(format!(
            "Lateral solver hit the {} iteration budget without converging.",
            MAX_ITERATIONS
        ));
    }
    if lat.floor_hit {
        notes.push_once("Secant stiffness displacement floored at 1e-6 in.");
    }

    let k_head = head_stiffness(&mesh, &curves, &lat.y, geo, &tz, &qz, &axial.u)?;

    // Pushover sweep in the requested direction.
    let pushover = match req.mode {
        BnwfMode::Static => None,
        BnwfMode::PushoverLateral => {
            let mut points = Vec::with_capacity(req.pushover_steps);
            let mut seed = lat.y.clone();
            for s in 1..=req.pushover_steps {
                let f = req.pushover_max_mult * s as f64 / req.pushover_steps as f64;
                let bc = match head_bc {
                    HeadBc::Free { .. } => HeadBc::Free {
                        shear: f * req.h_lateral,
                        moment: f * moment_in_lb,
                    },
                    HeadBc::FixedRotation { .. } => HeadBc::FixedRotation {
                        shear: f * req.h_lateral,
                    },
                };
                let step = fdm::solve_winkler(
                    mesh.ei,
                    mesh.h,
                    &curves,
                    bc,
                    ToeBc::Clamped,
                    geo,
                    Some(&seed),
                    MAX_ITERATIONS,
                    cancel,
                )?;
                if !step.converged {
                    notes.push(format!("Pushover step {} did not converge.", s));
                }
                points.push(PushoverPoint {
                    displacement: step.y[0],
                    load: f * req.h_lateral,
                });
                seed = step.y;
            }
            Some(points)
        }
        BnwfMode::PushoverAxial => {
            let mut points = Vec::with_capacity(req.pushover_steps);
            let mut seed = axial.u.clone();
            for s in 1..=req.pushover_steps {
                let f = req.pushover_max_mult * s as f64 / req.pushover_steps as f64;
                let step = axial_state(&mesh, &tz, &qz, f * req.v_axial, Some(&seed), cancel)?;
                if !step.converged {
                    notes.push(format!("Pushover step {} did not converge.", s));
                }
                points.push(PushoverPoint {
                    displacement: step.u[0],
                    load: f * req.v_axial,
                });
                seed = step.u;
            }
            Some(points)
        }
    };

    let eigenvalues = if req.n_eigen > 0 {
        let mass = mass_vector(profile, section, &curves, &mesh, req.embedment);
        let springs_vec = fdm::secant_springs(&curves, &lat.y);
        let assemble_k =
            || fdm::assemble(mesh.ei, mesh.h, &springs_vec, head_bc, ToeBc::Clamped, geo);
        Some(solver::lateral_eigenvalues(
            &assemble_k,
            &mass,
            req.n_eigen,
        )?)
    } else {
        None
    };

    let p_critical = if req.include_p_delta {
        let v_ref = req.v_axial.max(1000.0);
        let found = critical_load(
            &mesh, &curves, &lat.y, head_bc, &tz, &qz, v_ref, cancel,
        )?;
        if found.is_none() {
            notes.push("No buckling load found below the search cap.");
        }
        found
    } else {
        None
    };

    let axial_displacement = axial.u[0];
    let axial_settlement = axial.u;
    let axial_force = axial.force;

    let lateral = crate::lateral::assemble_result(
        profile,
        section,
        req.embedment,
        req.axis,
        req.cyclic,
        &curves,
        lat,
        head_bc,
        ToeBc::Clamped,
        mesh.h,
        notes,
    )?;

    Ok(BNWFResult {
        lateral,
        axial_displacement,
        axial_settlement,
        axial_force,
        k_head,
        pushover,
        eigenvalues,
        p_critical,
    })
}
