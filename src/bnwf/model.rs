use serde::{Deserialize, Serialize};

use crate::enums::{BendingAxis, BnwfMode, HeadCondition, PileType};
use crate::lateral::LateralResult;

/// BNWF analysis request.
///
/// Forces in lb (axial positive in compression), ground moment in ft·lb.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BnwfRequest {
    /// Embedded length, feet.
    pub embedment: f64,
    pub axis: BendingAxis,
    /// Head axial load, lb, positive compression.
    pub v_axial: f64,
    /// Head lateral load, lb.
    pub h_lateral: f64,
    /// Ground-line moment, ft·lb.
    pub m_ground: f64,
    pub head: HeadCondition,
    pub cyclic: bool,
    pub include_p_delta: bool,
    pub mode: BnwfMode,
    pub pushover_steps: usize,
    pub pushover_max_mult: f64,
    pub pile_type: PileType,
    /// Number of lateral eigenvalues to extract; 0 skips the eigen pass.
    pub n_eigen: usize,
}

impl Default for BnwfRequest {
    fn default() -> Self {
        Self {
            embedment: 0.0,
            axis: BendingAxis::Strong,
            v_axial: 0.0,
            h_lateral: 0.0,
            m_ground: 0.0,
            head: HeadCondition::Free,
            cyclic: false,
            include_p_delta: false,
            mode: BnwfMode::Static,
            pushover_steps: 20,
            pushover_max_mult: 3.0,
            pile_type: PileType::DrivenSteel,
            n_eigen: 0,
        }
    }
}

/// One pushover step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PushoverPoint {
    /// Head displacement, in (lateral deflection or axial settlement
    /// depending on the mode).
    pub displacement: f64,
    /// Applied load at the step, lb.
    pub load: f64,
}

/// Combined axial/lateral BNWF solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BNWFResult {
    /// Lateral block: deflection, moment, shear profiles and notes.
    pub lateral: LateralResult,
    /// Head axial settlement, in, positive down.
    pub axial_displacement: f64,
    /// Axial settlement per node, in.
    pub axial_settlement: Vec<f64>,
    /// Axial force per node, lb, positive compression.
    pub axial_force: Vec<f64>,
    /// Head stiffness about {axial, lateral, rotation}: lb/in, lb/rad,
    /// lb·in/in, lb·in/rad.
    pub k_head: [[f64; 3]; 3],
    pub pushover: Option<Vec<PushoverPoint>>,
    /// Generalized eigenvalues ω² of the lateral secant system, (rad/s)².
    pub eigenvalues: Option<Vec<f64>>,
    /// Axial load at loss of lateral stability, lb (P-Δ only).
    pub p_critical: Option<f64>,
}
