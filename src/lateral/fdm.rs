//! Finite-difference beam on nonlinear Winkler springs.
//!
//! The fourth-order beam equation EI·y'''' + p(y, z) = 0 is discretised
//! on a uniform grid with the five-point stencil; ghost nodes are
//! eliminated through the boundary conditions. Springs enter as secant
//! stiffnesses updated by a damped Picard iteration.

use ndarray::Array2;
use tracing::{debug, trace};

use crate::error::{PileError, PileResult};
use crate::helper::CancelFlag;
use crate::py::PYCurve;
use crate::units::{CONVERGENCE_TOL, Y_FLOOR_IN, Y_REF_IN};

/// Head boundary for the solver core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum HeadBc {
    /// Applied shear and moment at node 0.
    Free { shear: f64, moment: f64 },
    /// Zero rotation at node 0 with applied shear.
    FixedRotation { shear: f64 },
}

/// Toe boundary for the solver core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ToeBc {
    /// Zero moment and shear (lateral FDM).
    Free,
    /// Zero displacement and rotation (BNWF tip idealisation).
    Clamped,
}

pub(crate) struct WinklerSolution {
    /// Node displacements, in.
    pub y: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub cancelled: bool,
    pub floor_hit: bool,
}

/// Pentadiagonal system stored as rows of coefficients for columns
/// i-2..=i+2. Unpivoted banded elimination; the assembled beam systems
/// keep their dominant pivot on the diagonal.
pub(crate) struct Penta {
    pub n: usize,
    /// bands[(i, k)] is the coefficient of y_{i-2+k} in row i.
    pub bands: Array2<f64>,
    pub rhs: Vec<f64>,
}

impl Penta {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            bands: Array2::zeros((n, 5)),
            rhs: vec![0.0; n],
        }
    }

    pub fn add(&mut self, row: usize, col: isize, value: f64) {
        let k = col - row as isize + 2;
        debug_assert!((0..5).contains(&k), "coefficient outside the band");
        self.bands[(row, k as usize)] += value;
    }

    /// Solves the system, consuming the assembled coefficients.
    ///
    /// # Returns
    /// * The solution vector, or `Singular` on a vanishing pivot.
    pub fn solve(mut self) -> PileResult<Vec<f64>> {
        let (sign, y) = self.eliminate()?;
        let _ = sign;
        Ok(y)
    }

    /// Sign of the determinant via the pivot product. Used by the
    /// buckling bisection to detect loss of positive definiteness.
    pub fn det_sign(mut self) -> PileResult<i8> {
        let (sign, _) = self.eliminate()?;
        Ok(sign)
    }

    fn eliminate(&mut self) -> PileResult<(i8, Vec<f64>)> {
        let n = self.n;
        let scale = self
            .bands
            .iter()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()))
            .max(1e-30);
        let tol = 1e-14 * scale;

        let mut sign: i8 = 1;
        for i in 0..n {
            let pivot = self.bands[(i, 2)];
            if pivot.abs() < tol {
                return Err(PileError::singular(format!(
                    "zero pivot at node {} of the banded system",
                    i
                )));
            }
            if pivot < 0.0 {
                sign = -sign;
            }
            for r in 1..=2usize {
                if i + r >= n {
                    break;
                }
                let lead = self.bands[(i + r, 2 - r)];
                if lead == 0.0 {
                    continue;
                }
                let factor = lead / pivot;
                for c in 0..=2usize {
                    let val = factor * self.bands[(i, 2 + c)];
                    self.bands[(i + r, 2 - r + c)] -= val;
                }
                self.rhs[i + r] -= factor * self.rhs[i];
            }
        }

        let mut y = vec![0.0; n];
        for i in (0..n).rev() {
            let mut acc = self.rhs[i];
            if i + 1 < n {
                acc -= self.bands[(i, 3)] * y[i + 1];
            }
            if i + 2 < n {
                acc -= self.bands[(i, 4)] * y[i + 2];
            }
            y[i] = acc / self.bands[(i, 2)];
        }
        Ok((sign, y))
    }
}

/// Secant spring stiffness per node at a displacement state, lb/in².
pub(crate) fn secant_springs(curves: &[PYCurve], y: &[f64]) -> Vec<f64> {
    curves
        .iter()
        .zip(y)
        .map(|(c, &yi)| c.secant_stiffness(yi, Y_FLOOR_IN))
        .collect()
}

/// Tangent spring stiffness per node, floored at zero (softening branches
/// do not destabilise the buckling check).
pub(crate) fn tangent_springs(curves: &[PYCurve], y: &[f64]) -> Vec<f64> {
    curves
        .iter()
        .zip(y)
        .map(|(c, &yi)| c.dp_dy(yi).max(0.0))
        .collect()
}

/// Assembles the beam + spring system for a given per-node spring
/// stiffness vector.
///
/// `axial_force` adds the P-Δ geometric term N·y'' on interior rows,
/// positive in compression.
pub(crate) fn assemble(
    ei: f64,
    h: f64,
    springs: &[f64],
    head: HeadBc,
    toe: ToeBc,
    axial_force: Option<&[f64]>,
) -> Penta {
    let n = springs.len();
    let a = ei / h.powi(4);
    let mut sys = Penta::new(n);

    let spring = |i: usize| springs[i];

    // Interior five-point rows.
    for i in 2..n - 2 {
        let i_ = i as isize;
        sys.add(i, i_ - 2, a);
        sys.add(i, i_ - 1, -4.0 * a);
        sys.add(i, i_, 6.0 * a + spring(i));
        sys.add(i, i_ + 1, -4.0 * a);
        sys.add(i, i_ + 2, a);
    }

    // Head rows with ghost nodes eliminated.
    match head {
        HeadBc::Free { shear, moment } => {
            sys.add(0, 0, 2.0 * a + spring(0));
            sys.add(0, 1, -4.0 * a);
            sys.add(0, 2, 2.0 * a);
            sys.rhs[0] = 2.0 * moment / h.powi(2) + 2.0 * shear / h;

            sys.add(1, 0, -2.0 * a);
            sys.add(1, 1, 5.0 * a + spring(1));
            sys.add(1, 2, -4.0 * a);
            sys.add(1, 3, a);
            sys.rhs[1] = -moment / h.powi(2);
        }
        HeadBc::FixedRotation { shear } => {
            sys.add(0, 0, 6.0 * a + spring(0));
            sys.add(0, 1, -8.0 * a);
            sys.add(0, 2, 2.0 * a);
            sys.rhs[0] = 2.0 * shear / h;

            sys.add(1, 0, -4.0 * a);
            sys.add(1, 1, 7.0 * a + spring(1));
            sys.add(1, 2, -4.0 * a);
            sys.add(1, 3, a);
        }
    }

    // Toe rows.
    let m = n - 1;
    let m_ = m as isize;
    match toe {
        ToeBc::Free => {
            sys.add(m - 1, m_ - 3, a);
            sys.add(m - 1, m_ - 2, -4.0 * a);
            sys.add(m - 1, m_ - 1, 5.0 * a + spring(m - 1));
            sys.add(m - 1, m_, -2.0 * a);

            sys.add(m, m_ - 2, 2.0 * a);
            sys.add(m, m_ - 1, -4.0 * a);
            sys.add(m, m_, 2.0 * a + spring(m));
        }
        ToeBc::Clamped => {
            sys.add(m - 1, m_ - 3, a);
            sys.add(m - 1, m_ - 2, -4.0 * a);
            sys.add(m - 1, m_ - 1, 7.0 * a + spring(m - 1));
            sys.add(m - 1, m_, -4.0 * a);

            sys.add(m, m_, 1.0);
        }
    }

    // P-Δ geometric stiffness on interior rows.
    if let Some(n_axial) = axial_force {
        let g = 1.0 / h.powi(2);
        for i in 1..n - 1 {
            let i_ = i as isize;
            let ni = n_axial[i];
            sys.add(i, i_ - 1, ni * g);
            sys.add(i, i_, -2.0 * ni * g);
            sys.add(i, i_ + 1, ni * g);
        }
    }

    sys
}

/// Damped Picard iteration over the secant-stiffness system.
///
/// # Arguments
/// * `ei` - Flexural rigidity, lb·in².
/// * `h` - Node spacing, in.
/// * `curves` - One p-y curve per node.
/// * `head`, `toe` - Boundary conditions.
/// * `axial_force` - Optional per-node axial force for P-Δ, lb compression.
/// * `seed` - Optional starting displacement vector.
/// * `max_iterations` - Iteration budget.
/// * `cancel` - Optional cancellation flag, polled between iterations.
pub(crate) fn solve_winkler(
    ei: f64,
    h: f64,
    curves: &[PYCurve],
    head: HeadBc,
    toe: ToeBc,
    axial_force: Option<&[f64]>,
    seed: Option<&[f64]>,
    max_iterations: usize,
    cancel: Option<&CancelFlag>,
) -> PileResult<WinklerSolution> {
    let n = curves.len();
    if n < 5 {
        return Err(PileError::degenerate(format!(
            "{} nodes are too few for the five-point stencil",
            n
        )));
    }
    if ei <= 0.0 {
        return Err(PileError::singular("EI must be positive"));
    }

    let mut y: Vec<f64> = match seed {
        Some(s) => s.to_vec(),
        None => vec![0.0; n],
    };
    let mut converged = false;
    let mut cancelled = false;
    let mut floor_hit = false;
    let mut iterations = 0;
    let mut prev_residual = f64::INFINITY;

    for it in 1..=max_iterations {
        iterations = it;
        let springs = secant_springs(curves, &y);
        let sys = assemble(ei, h, &springs, head, toe, axial_force);
        let y_new = sys.solve()?;

        let y_max = y_new.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let diff = y_new
            .iter()
            .zip(&y)
            .fold(0.0_f64, |acc, (a, b)| acc.max((a - b).abs()));
        let residual = diff / y_max.max(Y_REF_IN);

        if it > 1 && y.iter().any(|v| v.abs() < Y_FLOOR_IN) {
            floor_hit = true;
        }

        // Under-relax when the residual grows.
        let omega = if residual > prev_residual { 0.5 } else { 1.0 };
        for (yi, &yn) in y.iter_mut().zip(&y_new) {
            *yi = omega * yn + (1.0 - omega) * *yi;
        }
        prev_residual = residual;
        trace!(iteration = it, residual, omega, "winkler iteration");

        if residual < CONVERGENCE_TOL {
            converged = true;
            break;
        }
        if let Some(flag) = cancel {
            if flag.is_cancelled() {
                cancelled = true;
                break;
            }
        }
    }

    debug!(iterations, converged, cancelled, "winkler solve finished");
    Ok(WinklerSolution {
        y,
        iterations,
        converged,
        cancelled,
        floor_hit,
    })
}
