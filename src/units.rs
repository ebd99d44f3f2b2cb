//! Unit conventions and physical constants.
//!
//! All internal computation uses US customary units: profile depths in feet,
//! pile displacements and widths in inches, forces in pounds, stresses in
//! psf or psi, subgrade moduli in lb/in³. Positive z is downward; positive
//! lateral displacement is toward the applied load.

/// Unit weight of water in pcf.
pub const GAMMA_WATER_PCF: f64 = 62.4;

/// Atmospheric pressure in psf.
pub const ATM_PRESSURE_PSF: f64 = 2116.0;

pub const IN_PER_FT: f64 = 12.0;

/// psf -> psi
pub const PSF_TO_PSI: f64 = 1.0 / 144.0;

/// pcf -> lb/in³
pub const PCF_TO_PCI: f64 = 1.0 / 1728.0;

/// kN/m -> lb/in (used by the Rollins liquefied-sand curve)
pub const KN_PER_M_TO_LB_PER_IN: f64 = 5.710_147;

pub const M_PER_FT: f64 = 0.3048;
pub const MM_PER_IN: f64 = 25.4;

/// Default steel yield strength in psi.
pub const DEFAULT_FY_PSI: f64 = 50_000.0;

/// Steel elastic modulus in psi.
pub const E_STEEL_PSI: f64 = 29_000_000.0;

/// Default factor of safety on axial compression.
pub const DEFAULT_FS_COMPRESSION: f64 = 2.5;

/// Default factor of safety on axial tension.
pub const DEFAULT_FS_TENSION: f64 = 3.0;

/// Reduction on shaft capacity in tension.
pub const TENSION_REDUCTION: f64 = 0.75;

/// Default number of embedded finite-difference segments.
pub const DEFAULT_NODE_COUNT: usize = 100;

/// Iteration budget for the nonlinear solvers.
pub const MAX_ITERATIONS: usize = 200;

/// Relative displacement convergence tolerance.
pub const CONVERGENCE_TOL: f64 = 1e-4;

/// Reference displacement for the convergence denominator, inches.
pub const Y_REF_IN: f64 = 1e-3;

/// Displacement floor guarding secant stiffness division, inches.
pub const Y_FLOOR_IN: f64 = 1e-6;

/// Effective stress floor guarding the β method at the surface, psf.
pub const SIGMA_V_FLOOR_PSF: f64 = 1.0;

/// Converts a depth in feet to inches.
pub fn ft_to_in(z_ft: f64) -> f64 {
    z_ft * IN_PER_FT
}

/// Converts a stress in psf to psi.
pub fn psf_to_psi(sigma_psf: f64) -> f64 {
    sigma_psf * PSF_TO_PSI
}

/// Converts a unit weight in pcf to lb/in³.
pub fn pcf_to_pci(gamma_pcf: f64) -> f64 {
    gamma_pcf * PCF_TO_PCI
}
