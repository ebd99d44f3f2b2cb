use serde::{Deserialize, Serialize};

/// A representative p-y curve sampled for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampledPYCurve {
    /// Sample depth, feet.
    pub depth: f64,
    /// (y in, p lb/in) pairs.
    pub points: Vec<(f64, f64)>,
}

/// Lateral finite-difference solution.
///
/// Arrays run head to toe over the N+1 node grid. Displacements in
/// inches, moments in lb·in, shears in lb, soil reaction in lb/in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LateralResult {
    /// Node depths, feet.
    pub depth: Vec<f64>,
    pub deflection: Vec<f64>,
    /// Slope, radians.
    pub slope: Vec<f64>,
    pub moment: Vec<f64>,
    pub shear: Vec<f64>,
    pub soil_reaction: Vec<f64>,
    /// Ground-line deflection, in.
    pub y_ground: f64,
    /// Peak absolute moment, lb·in.
    pub m_max: f64,
    /// Depth of the peak moment, feet.
    pub depth_m_max: f64,
    /// Shallowest zero crossing of the deflected shape, feet.
    pub depth_zero_deflection: Option<f64>,
    pub iterations: usize,
    pub converged: bool,
    /// |M_max| / M_y on the analysis axis.
    pub dcr: f64,
    pub py_curves: Vec<SampledPYCurve>,
    pub notes: Vec<String>,
}
