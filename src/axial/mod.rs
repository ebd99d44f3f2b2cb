//! Axial capacity kernel: skin friction layer summation plus end bearing,
//! with ASD and LRFD wrapping.

pub mod end_bearing;
pub mod model;
pub mod skin_friction;

pub use model::{AxialResult, LayerContribution};

use crate::enums::{AxialMethod, PileType};
use crate::error::{PileError, PileResult};
use crate::helper::Notes;
use crate::models::section::SteelSection;
use crate::models::soil_profile::SoilProfile;
use crate::units::{IN_PER_FT, TENSION_REDUCTION};
use crate::validation::validate_field;

/// LRFD resistance factor for shaft friction in a layer.
fn phi_shaft(pile_type: PileType, cohesive: bool) -> f64 {
    match pile_type {
        PileType::Helical => 0.50,
        PileType::DrivenSteel | PileType::Drilled => {
            if cohesive {
                0.35
            } else {
                0.45
            }
        }
    }
}

/// LRFD resistance factor for end bearing.
fn phi_tip(pile_type: PileType) -> f64 {
    match pile_type {
        PileType::Helical => 0.50,
        _ => 0.45,
    }
}

/// Ultimate and design axial capacity of a single pile.
///
/// Skin friction is summed per layer at mid-slice depth; end bearing is
/// evaluated at the tip. Tension capacity is the reduced shaft only.
///
/// # Arguments
/// * `profile` - Soil profile.
/// * `section` - Pile section (box perimeter, plugged tip).
/// * `embedment` - Embedded length, feet.
/// * `pile_type` - Installation method.
/// * `method` - Skin friction method; `Auto` resolves per layer.
/// * `fs_compression` - ASD factor of safety on compression.
/// * `fs_tension` - ASD factor of safety on tension.
///
/// # Returns
/// * `AxialResult` with totals, per-layer contributions and notes.
pub fn calc_axial_capacity(
    profile: &SoilProfile,
    section: &SteelSection,
    embedment: f64,
    pile_type: PileType,
    method: AxialMethod,
    fs_compression: f64,
    fs_tension: f64,
) -> PileResult<AxialResult> {
    profile.validate()?;
    validate_field("embedment", Some(embedment), Some(0.1), None, "axial")?;
    validate_field(
        "fs_compression",
        Some(fs_compression),
        Some(1.0),
        None,
        "axial",
    )?;
    validate_field("fs_tension", Some(fs_tension), Some(1.0), None, "axial")?;
    if embedment > profile.total_depth() {
        return Err(PileError::invalid_input(
            "axial.embedment.exceeds_profile",
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

    let perimeter_ft = section.perimeter() / IN_PER_FT;
    let mut layers = Vec::new();
    let mut q_skin = 0.0;
    let mut q_skin_factored = 0.0;

    let mut z_top = 0.0;
    for (i, layer) in profile.layers.iter().enumerate() {
        if z_top >= embedment {
            break;
        }
        let z_bot = (z_top + layer.thickness).min(embedment);
        let z_mid = 0.5 * (z_top + z_bot);
        let dz = z_bot - z_top;

        let (f_s, used) =
            skin_friction::unit_skin_friction(profile, i, z_mid, pile_type, method, &mut notes);
        let delta_q = f_s * perimeter_ft * dz;
        q_skin += delta_q;
        q_skin_factored += phi_shaft(pile_type, layer.soil_type.is_cohesive()) * delta_q;

        layers.push(LayerContribution {
            z_top,
            z_bot,
            z_mid,
            method: used,
            f_s,
            delta_q,
        });
        z_top = z_bot;
    }

    let q_b_unit = end_bearing::unit_end_bearing(
        profile,
        embedment,
        section.width(crate::enums::BendingAxis::Strong),
        &mut notes,
    )?;
    // psf × tip area in ft².
    let q_bearing = q_b_unit * section.tip_area() / 144.0;

    let q_ult_compression = q_skin + q_bearing;
    let q_ult_tension = TENSION_REDUCTION * q_skin;

    Ok(AxialResult {
        q_skin,
        q_bearing,
        q_ult_compression,
        q_ult_tension,
        q_allow_compression: q_ult_compression / fs_compression,
        q_allow_tension: q_ult_tension / fs_tension,
        q_factored_compression: q_skin_factored + phi_tip(pile_type) * q_bearing,
        q_factored_tension: TENSION_REDUCTION * q_skin_factored,
        q_b_unit,
        layers,
        notes: notes.into_vec(),
    })
}
