//! Pile-group reduction: Converse-Labarre axial efficiency, row-wise
//! lateral p-multipliers, and cohesive block failure.

use serde::{Deserialize, Serialize};

use crate::error::{PileError, PileResult};
use crate::helper::{Notes, interp1d};
use crate::models::section::SteelSection;
use crate::models::soil_profile::SoilProfile;
use crate::units::IN_PER_FT;
use crate::validation::validate_field;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResult {
    /// Converse-Labarre efficiency η.
    pub efficiency: f64,
    /// n·Q_single, lb.
    pub q_group_unreduced: f64,
    /// η·n·Q_single, lb.
    pub q_group_efficiency: f64,
    /// Cohesive block capacity when applicable, lb.
    pub q_block: Option<f64>,
    /// Governing group capacity, lb.
    pub q_group_governing: f64,
    /// Lateral p-multiplier per row, loading-direction order.
    pub p_multipliers: Vec<f64>,
    /// Mean p-multiplier over all piles.
    pub avg_lateral_efficiency: f64,
    pub notes: Vec<String>,
}

/// Brown et al. row p-multipliers, interpolated in s/d.
fn row_p_multiplier(row: usize, s_over_d: f64) -> PileResult<f64> {
    const SD: [f64; 3] = [3.0, 5.0, 8.0];
    const LEAD: [f64; 3] = [0.80, 0.90, 1.00];
    const SECOND: [f64; 3] = [0.40, 0.60, 1.00];
    const THIRD: [f64; 3] = [0.30, 0.50, 1.00];
    let table: &[f64; 3] = match row {
        0 => &LEAD,
        1 => &SECOND,
        _ => &THIRD,
    };
    interp1d(&SD, table, s_over_d)
}

/// Group capacity reduction for a rectangular pile layout.
///
/// # Arguments
/// * `profile` - Soil profile (block failure needs the cohesive layers).
/// * `section` - Pile section; its depth is the pile width d.
/// * `embedment` - Embedded length, feet.
/// * `n_rows` - Rows in the loading direction.
/// * `n_cols` - Columns across the loading direction.
/// * `spacing` - Center-to-center spacing, inches.
/// * `q_single` - Single-pile ultimate compression capacity, lb.
///
/// # Returns
/// * `GroupResult` with the governing capacity and lateral multipliers.
pub fn calc_group_analysis(
    profile: &SoilProfile,
    section: &SteelSection,
    embedment: f64,
    n_rows: usize,
    n_cols: usize,
    spacing: f64,
    q_single: f64,
) -> PileResult<GroupResult> {
    profile.validate()?;
    validate_field("embedment", Some(embedment), Some(0.1), None, "group")?;
    validate_field("q_single", Some(q_single), Some(0.0), None, "group")?;
    if n_rows * n_cols < 1 {
        return Err(PileError::invalid_input(
            "group.layout.empty",
            "Group layout needs at least one pile.",
        ));
    }
    if n_rows * n_cols > 1 && spacing < 6.0 {
        return Err(PileError::invalid_input(
            "group.spacing.too_small",
            "Pile spacing must be at least 6 in for a multi-pile group.",
        ));
    }

    let mut notes = Notes::new();
    let d = section.d;
    let n1 = n_rows as f64;
    let n2 = n_cols as f64;
    let n_piles = n1 * n2;

    // Converse-Labarre.
    let theta_deg = (d / spacing).atan().to_degrees();
    let efficiency =
        (1.0 - theta_deg * ((n1 - 1.0) * n2 + (n2 - 1.0) * n1) / (90.0 * n1 * n2)).clamp(0.0, 1.0);

    let s_over_d = spacing / d;
    let p_multipliers = (0..n_rows)
        .map(|r| row_p_multiplier(r, s_over_d))
        .collect::<PileResult<Vec<f64>>>()?;
    let avg_lateral_efficiency = p_multipliers.iter().sum::<f64>() / n_rows as f64;

    // Cohesive block failure, evaluated when any cohesive layer sits
    // within the embedment.
    let has_cohesive = {
        let mut z_top = 0.0;
        profile.layers.iter().any(|layer| {
            let within = z_top < embedment;
            z_top += layer.thickness;
            within && layer.soil_type.is_cohesive()
        })
    };

    let q_block = if has_cohesive && n_rows * n_cols > 1 {
        let b_g = (n1 - 1.0) * spacing + d;
        let l_g = (n2 - 1.0) * spacing + d;
        let depth_in = embedment * IN_PER_FT;

        // Thickness-weighted average cohesion over the embedment, psi.
        let mut cu_sum = 0.0;
        let mut layer_top = 0.0;
        for (i, layer) in profile.layers.iter().enumerate() {
            if layer_top >= embedment {
                break;
            }
            let dz = (layer_top + layer.thickness).min(embedment) - layer_top;
            if layer.soil_type.is_cohesive() {
                cu_sum += profile.cohesion(i) * dz;
            }
            layer_top += layer.thickness;
        }
        let cu_avg = cu_sum / embedment / 144.0;
        let cu_base = {
            let idx = profile.get_layer_index(embedment);
            if profile.layers[idx].soil_type.is_cohesive() {
                profile.cohesion(idx) / 144.0
            } else {
                notes.push("Block base bears on a cohesionless layer; base term omitted.");
                0.0
            }
        };

        let nc = (5.0 * (1.0 + 0.2 * b_g / l_g) * (1.0 + 0.2 * depth_in / b_g)).min(9.0);
        Some(2.0 * (b_g + l_g) * depth_in * cu_avg + b_g * l_g * nc * cu_base)
    } else {
        None
    };

    let q_group_efficiency = efficiency * n_piles * q_single;
    let q_group_governing = match q_block {
        Some(qb) if qb < q_group_efficiency => {
            notes.push("Cohesive block failure governs the group capacity.");
            qb
        }
        _ => q_group_efficiency,
    };

    Ok(GroupResult {
        efficiency,
        q_group_unreduced: n_piles * q_single,
        q_group_efficiency,
        q_block,
        q_group_governing,
        p_multipliers,
        avg_lateral_efficiency,
        notes: notes.into_vec(),
    })
}
