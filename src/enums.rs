use serde::{Deserialize, Serialize};

/// Broad soil classification controlling parameter derivation and model
/// selection.
///
/// # Variants
/// * `Sand` - Cohesionless, friction angle governs
/// * `Clay` - Cohesive, undrained strength governs
/// * `Silt` - Intermediate; carries both φ and cu
/// * `Gravel` - Treated as coarse cohesionless
/// * `Organic` - Treated as soft cohesive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilType {
    Sand,
    Clay,
    Silt,
    Gravel,
    Organic,
}

impl SoilType {
    /// Whether the type uses undrained strength (α method, block failure).
    pub fn is_cohesive(self) -> bool {
        matches!(self, SoilType::Clay | SoilType::Silt | SoilType::Organic)
    }

    pub fn is_cohesionless(self) -> bool {
        matches!(self, SoilType::Sand | SoilType::Gravel)
    }
}

/// Pile head restraint for the lateral and BNWF solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadCondition {
    /// Applied shear and moment at the ground surface node.
    Free,
    /// Head rotation restrained; applied shear only.
    Fixed,
}

/// Bending axis selecting I, S and Z from the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BendingAxis {
    Strong,
    Weak,
}

/// Installation method, selecting K_s ratios and LRFD resistance factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PileType {
    DrivenSteel,
    Helical,
    Drilled,
}

/// Skin friction method for the axial kernel.
///
/// `Auto` resolves per layer: α for cohesive types, β for cohesionless.
/// `MeyerhofSpt` is only used when explicitly requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxialMethod {
    #[default]
    Auto,
    Alpha,
    Beta,
    MeyerhofSpt,
}

/// Load combination family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombinationMethod {
    Lrfd,
    Asd,
    Both,
}

/// BNWF analysis mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BnwfMode {
    #[default]
    Static,
    PushoverLateral,
    PushoverAxial,
}
