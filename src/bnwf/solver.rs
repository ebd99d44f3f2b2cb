//! Axial rod solver and the eigen/buckling helpers for the BNWF model.

use tracing::{debug, trace};

use crate::error::{PileError, PileResult};
use crate::helper::CancelFlag;
use crate::lateral::fdm::Penta;
use crate::units::{CONVERGENCE_TOL, Y_FLOOR_IN, Y_REF_IN};

use super::springs::{QZCurve, TZCurve};

pub(crate) struct AxialSolution {
    /// Settlement per node, in, positive down.
    pub u: Vec<f64>,
    /// Axial force per node, lb, positive compression.
    pub force: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

/// Assembles the tridiagonal rod system EA·u'' = t(u) at a displacement
/// state, with the head load and tip spring in the boundary rows.
pub(crate) fn assemble_axial(
    ea: f64,
    h: f64,
    u_state: &[f64],
    tz: &[TZCurve],
    qz: &QZCurve,
    v_head: f64,
) -> Penta {
    let n = u_state.len();
    let c = ea / (h * h);
    let mut sys = Penta::new(n);

    sys.add(0, 0, 2.0 * c + tz[0].secant(u_state[0]));
    sys.add(0, 1, -2.0 * c);
    sys.rhs[0] = 2.0 * v_head / h;

    for i in 1..n - 1 {
        let i_ = i as isize;
        sys.add(i, i_ - 1, -c);
        sys.add(i, i_, 2.0 * c + tz[i].secant(u_state[i]));
        sys.add(i, i_ + 1, -c);
    }

    let m = n - 1;
    sys.add(m, m as isize - 1, -2.0 * c);
    sys.add(
        m,
        m as isize,
        2.0 * c + tz[m].secant(u_state[m]) + (2.0 / h) * qz.secant(u_state[m]),
    );

    sys
}

/// Damped Picard iteration over the axial rod with t-z and q-z springs.
pub(crate) fn solve_axial(
    ea: f64,
    h: f64,
    tz: &[TZCurve],
    qz: &QZCurve,
    v_head: f64,
    seed: Option<&[f64]>,
    max_iterations: usize,
    cancel: Option<&CancelFlag>,
) -> PileResult<AxialSolution> {
    let n = tz.len();
    if n < 3 {
        return Err(PileError::degenerate("too few nodes for the axial rod"));
    }
    if ea <= 0.0 {
        return Err(PileError::singular("EA must be positive"));
    }

    let mut u: Vec<f64> = match seed {
        Some(s) => s.to_vec(),
        None => vec![0.0; n],
    };
    let mut converged = false;
    let mut iterations = 0;
    let mut prev_residual = f64::INFINITY;

    for it in 1..=max_iterations {
        iterations = it;
        let sys = assemble_axial(ea, h, &u, tz, qz, v_head);
        let u_new = sys.solve()?;

        let u_max = u_new.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let diff = u_new
            .iter()
            .zip(&u)
            .fold(0.0_f64, |acc, (a, b)| acc.max((a - b).abs()));
        let residual = diff / u_max.max(Y_REF_IN);

        let omega = if residual > prev_residual { 0.5 } else { 1.0 };
        for (ui, &un) in u.iter_mut().zip(&u_new) {
            *ui = omega * un + (1.0 - omega) * *ui;
        }
        prev_residual = residual;
        trace!(iteration = it, residual, "axial iteration");

        if residual < CONVERGENCE_TOL {
            converged = true;
            break;
        }
        if let Some(flag) = cancel {
            if flag.is_cancelled() {
                break;
            }
        }
    }
    debug!(iterations, converged, "axial solve finished");

    // N = -EA·u', head value exact, tip from the spring.
    let mut force = vec![0.0; n];
    force[0] = v_head;
    for i in 1..n - 1 {
        force[i] = -ea * (u[i + 1] - u[i - 1]) / (2.0 * h);
    }
    force[n - 1] = qz.q(u[n - 1]);

    Ok(AxialSolution {
        u,
        force,
        iterations,
        converged,
    })
}

/// First `k` generalized eigenvalues of K·x = λ·M·x by inverse iteration
/// with M-orthogonal deflation. `assemble_k` must build a fresh system
/// each call (the banded factorization is destructive).
pub(crate) fn lateral_eigenvalues(
    assemble_k: &dyn Fn() -> Penta,
    mass: &[f64],
    k_modes: usize,
) -> PileResult<Vec<f64>> {
    let n = mass.len();
    let mut modes: Vec<Vec<f64>> = Vec::new();
    let mut lambdas = Vec::new();

    let m_dot = |a: &[f64], b: &[f64]| -> f64 {
        a.iter()
            .zip(b)
            .zip(mass)
            .map(|((x, y), m)| x * y * m)
            .sum()
    };

    for mode in 0..k_modes {
        // Deterministic start vector varied per mode.
        let mut x: Vec<f64> = (0..n)
            .map(|i| 1.0 + ((mode + 1) * (i + 1)) as f64 * 1e-3)
            .collect();
        let mut lambda = 0.0;
        let mut lambda_prev = f64::INFINITY;

        for _ in 0..80 {
            // Deflate against converged modes.
            for v in &modes {
                let proj = m_dot(&x, v);
                for (xi, vi) in x.iter_mut().zip(v) {
                    *xi -= proj * vi;
                }
            }
            let mut sys = assemble_k();
            for (i, (xi, m)) in x.iter().zip(mass).enumerate() {
                sys.rhs[i] = xi * m;
            }
            let y = sys.solve()?;

            let num = m_dot(&x, &x);
            let den = m_dot(&y, &x);
            if den.abs() < 1e-300 {
                return Err(PileError::singular("eigen iteration degenerated"));
            }
            lambda = num / den;

            let norm = m_dot(&y, &y).sqrt().max(1e-300);
            x = y.iter().map(|v| v / norm).collect();

            if (lambda - lambda_prev).abs() <= 1e-8 * lambda.abs().max(Y_FLOOR_IN) {
                break;
            }
            lambda_prev = lambda;
        }

        lambdas.push(lambda);
        modes.push(x);
    }

    Ok(lambdas)
}
