use serde::{Deserialize, Serialize};

use crate::enums::SoilType;
use crate::error::{PileError, PileResult};
use crate::py::model::{PYModel, PYParams};
use crate::units::{ATM_PRESSURE_PSF, GAMMA_WATER_PCF};
use crate::validation::validate_field;

/// SPT correction factor set carried by the profile instance.
///
/// Defaults follow common US practice for safety-hammer rigs: C_E = 0.60,
/// all geometry factors 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SptCorrections {
    pub ce: f64,
    pub cb: f64,
    pub cr: f64,
    pub cs: f64,
}

impl Default for SptCorrections {
    fn default() -> Self {
        Self {
            ce: 0.60,
            cb: 1.0,
            cr: 1.0,
            cs: 1.0,
        }
    }
}

/// A single soil layer.
///
/// Raw parameters are stored as `Option`; `None` means "derive from the
/// SPT blow count and soil type when queried". Explicit values always win
/// and are never overwritten by the auto-fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilLayer {
    pub soil_type: SoilType,
    /// Layer thickness in feet.
    pub thickness: f64,
    /// Bottom depth in feet, computed by the profile.
    pub depth: Option<f64>,
    /// Mid-layer depth in feet, computed by the profile.
    pub center: Option<f64>,
    /// Field SPT blow count, blows/ft.
    pub n_spt: Option<f64>,
    /// Moist unit weight in pcf.
    pub unit_weight: Option<f64>,
    /// Saturated unit weight in pcf. Falls back to `unit_weight` when absent.
    pub saturated_unit_weight: Option<f64>,
    /// Internal friction angle in degrees.
    pub friction_angle: Option<f64>,
    /// Undrained shear strength in psf.
    pub cohesion: Option<f64>,
    /// Lateral response model; `Auto` resolves by soil type.
    pub py_model: PYModel,
    /// Model-specific p-y parameters.
    pub py_params: PYParams,
}

impl SoilLayer {
    pub fn new(soil_type: SoilType, thickness: f64) -> Self {
        Self {
            soil_type,
            thickness,
            depth: None,
            center: None,
            n_spt: None,
            unit_weight: None,
            saturated_unit_weight: None,
            friction_angle: None,
            cohesion: None,
            py_model: PYModel::Auto,
            py_params: PYParams::default(),
        }
    }
}

impl Default for SoilLayer {
    fn default() -> Self {
        SoilLayer::new(SoilType::Sand, 0.0)
    }
}

/// Auto unit weight lookup, pcf, keyed by soil type and N60.
///
/// Stepwise tables after common correlation charts; the saturated column
/// is used for submerged layers.
fn auto_unit_weight(soil_type: SoilType, n60: f64, submerged: bool) -> f64 {
    let pick = |bounds: &[f64], moist: &[f64], sat: &[f64]| -> f64 {
        let column = if submerged { sat } else { moist };
        for (i, b) in bounds.iter().enumerate() {
            if n60 < *b {
                return column[i];
            }
        }
        column[column.len() - 1]
    };

    match soil_type {
        SoilType::Sand | SoilType::Gravel => pick(
            &[4.0, 10.0, 30.0, 50.0],
            &[100.0, 115.0, 120.0, 125.0, 130.0],
            &[110.0, 125.0, 130.0, 135.0, 140.0],
        ),
        SoilType::Silt => pick(
            &[4.0, 10.0, 30.0],
            &[90.0, 105.0, 115.0, 120.0],
            &[100.0, 115.0, 122.0, 127.0],
        ),
        SoilType::Clay => pick(
            &[2.0, 4.0, 8.0, 16.0, 32.0],
            &[95.0, 100.0, 110.0, 120.0, 125.0, 130.0],
            &[100.0, 105.0, 115.0, 122.0, 127.0, 132.0],
        ),
        SoilType::Organic => {
            if submerged {
                95.0
            } else {
                85.0
            }
        }
    }
}

/// A layered soil profile with optional water table.
///
/// Layers are contiguous from the ground surface down; the profile owns
/// the SPT correction set so no process-wide configuration exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilProfile {
    pub layers: Vec<SoilLayer>,
    /// Depth of the groundwater table in feet. `None` means dry.
    pub water_table: Option<f64>,
    pub spt_corrections: SptCorrections,
}

impl SoilProfile {
    /// Creates a new soil profile and initializes layer depths.
    ///
    /// A water table above the ground surface is clamped to z = 0 (all
    /// layers submerged).
    ///
    /// # Arguments
    /// * `layers` - A vector of `SoilLayer` objects, surface first.
    /// * `water_table` - Depth of the groundwater table in feet, `None` for dry.
    pub fn new(layers: Vec<SoilLayer>, water_table: Option<f64>) -> PileResult<Self> {
        if layers.is_empty() {
            return Err(PileError::invalid_input(
                "soil_profile.empty",
                "Soil profile must contain at least one layer.",
            ));
        }

        let mut profile = Self {
            layers,
            water_table: water_table.map(|wt| wt.max(0.0)),
            spt_corrections: SptCorrections::default(),
        };
        profile.calc_layer_depths();
        Ok(profile)
    }

    /// Calculates center and bottom depth for each soil layer.
    pub fn calc_layer_depths(&mut self) {
        let mut bottom = 0.0;

        for layer in &mut self.layers {
            layer.center = Some(bottom + layer.thickness / 2.0);
            bottom += layer.thickness;
            layer.depth = Some(bottom);
        }
    }

    /// Total profile depth in feet.
    pub fn total_depth(&self) -> f64 {
        self.layers.last().and_then(|l| l.depth).unwrap_or(0.0)
    }

    /// Returns the index of the layer containing `depth`, tie-breaking
    /// toward the deeper layer at interior boundaries.
    pub fn get_layer_index(&self, depth: f64) -> usize {
        for (i, layer) in self.layers.iter().enumerate() {
            if let Some(layer_depth) = layer.depth {
                if layer_depth > depth {
                    return i;
                }
            }
        }
        self.layers.len() - 1
    }

    /// Returns the index of the layer containing `depth`, tie-breaking
    /// toward the upper layer. Used for solver nodes landing exactly on a
    /// layer boundary.
    pub fn get_layer_index_upper(&self, depth: f64) -> usize {
        for (i, layer) in self.layers.iter().enumerate() {
            if let Some(layer_depth) = layer.depth {
                if layer_depth >= depth {
                    return i;
                }
            }
        }
        self.layers.len() - 1
    }

    /// Returns a reference to the soil layer at a specified depth.
    pub fn get_layer_at_depth(&self, depth: f64) -> &SoilLayer {
        &self.layers[self.get_layer_index(depth)]
    }

    /// Whether the given depth is at or below the water table.
    pub fn is_submerged(&self, depth: f64) -> bool {
        match self.water_table {
            Some(wt) => depth >= wt,
            None => false,
        }
    }

    /// Energy-corrected blow count N60 = N_spt · C_E·C_B·C_R·C_S.
    pub fn n60(&self, layer_index: usize) -> f64 {
        let c = &self.spt_corrections;
        let n = self.layers[layer_index].n_spt.unwrap_or(0.0);
        n * c.ce * c.cb * c.cr * c.cs
    }

    /// Overburden-corrected blow count (N1)60 using the Liao-Whitman
    /// C_N = min(√(p_a/σ'_v), 2.0) at mid-layer.
    pub fn n1_60(&self, layer_index: usize) -> f64 {
        let mid = self.layers[layer_index].center.unwrap_or(0.0);
        let sigma_eff = self.calc_effective_stress(mid).max(1.0);
        let cn = (ATM_PRESSURE_PSF / sigma_eff).sqrt().min(2.0);
        self.n60(layer_index) * cn
    }

    /// Moist or saturated unit weight for a layer, pcf.
    ///
    /// Explicit values win; otherwise the bundled lookup keyed by soil
    /// type and N60 is used.
    pub fn unit_weight(&self, layer_index: usize, submerged: bool) -> f64 {
        let layer = &self.layers[layer_index];
        if submerged {
            if let Some(gs) = layer.saturated_unit_weight {
                return gs;
            }
            if let Some(g) = layer.unit_weight {
                return g;
            }
        } else if let Some(g) = layer.unit_weight {
            return g;
        }
        auto_unit_weight(layer.soil_type, self.n60(layer_index), submerged)
    }

    /// Internal friction angle for a layer, degrees.
    ///
    /// Sand/Gravel: min(√(20·N60)+20, 45). Silt: min(24+0.25·N60, 34).
    /// Clay/Organic: 0.
    pub fn friction_angle(&self, layer_index: usize) -> f64 {
        let layer = &self.layers[layer_index];
        if let Some(phi) = layer.friction_angle {
            if phi > 0.0 {
                return phi;
            }
        }
        let n60 = self.n60(layer_index);
        match layer.soil_type {
            SoilType::Sand | SoilType::Gravel => ((20.0 * n60).sqrt() + 20.0).min(45.0),
            SoilType::Silt => (24.0 + 0.25 * n60).min(34.0),
            SoilType::Clay | SoilType::Organic => 0.0,
        }
    }

    /// Undrained shear strength for a layer, psf.
    ///
    /// Clay/Silt/Organic: 125·N60. Sand/Gravel: 0.
    pub fn cohesion(&self, layer_index: usize) -> f64 {
        let layer = &self.layers[layer_index];
        if let Some(cu) = layer.cohesion {
            if cu > 0.0 {
                return cu;
            }
        }
        match layer.soil_type {
            SoilType::Clay | SoilType::Silt | SoilType::Organic => 125.0 * self.n60(layer_index),
            SoilType::Sand | SoilType::Gravel => 0.0,
        }
    }

    /// Effective (buoyant below the water table) unit weight at a depth, pcf.
    pub fn effective_unit_weight_at(&self, depth: f64) -> f64 {
        let idx = self.get_layer_index(depth);
        if self.is_submerged(depth) {
            (self.unit_weight(idx, true) - GAMMA_WATER_PCF).max(0.0)
        } else {
            self.unit_weight(idx, false)
        }
    }

    /// Calculates the total vertical stress at a given depth, psf.
    pub fn calc_normal_stress(&self, depth: f64) -> f64 {
        let layer_index = self.get_layer_index(depth);
        let wt = self.water_table.unwrap_or(f64::INFINITY);

        let mut total_stress = 0.0;
        let mut previous_depth = 0.0;

        for (i, layer) in self.layers.iter().take(layer_index + 1).enumerate() {
            let layer_thickness = if i == layer_index {
                depth - previous_depth // partial thickness for the last layer
            } else {
                layer.thickness
            };
            if layer_thickness <= 0.0 {
                break;
            }
            let bottom = previous_depth + layer_thickness;

            if wt >= bottom {
                total_stress += self.unit_weight(i, false) * layer_thickness;
            } else if wt <= previous_depth {
                total_stress += self.unit_weight(i, true) * layer_thickness;
            } else {
                let dry_thickness = wt - previous_depth;
                total_stress += self.unit_weight(i, false) * dry_thickness
                    + self.unit_weight(i, true) * (layer_thickness - dry_thickness);
            }

            previous_depth = bottom;
        }

        total_stress
    }

    /// Calculates the effective vertical stress at a given depth, psf.
    pub fn calc_effective_stress(&self, depth: f64) -> f64 {
        let normal_stress = self.calc_normal_stress(depth);

        match self.water_table {
            Some(wt) if depth > wt => {
                let pore_pressure = (depth - wt) * GAMMA_WATER_PCF;
                (normal_stress - pore_pressure).max(0.0)
            }
            _ => normal_stress,
        }
    }

    /// Lists the parameters that would be auto-derived when queried, one
    /// entry per layer with gaps. Feeds the analysis `notes` channel.
    pub fn derive_report(&self) -> Vec<String> {
        let mut report = Vec::new();
        for (i, layer) in self.layers.iter().enumerate() {
            let mut filled = Vec::new();
            if layer.unit_weight.is_none() {
                filled.push(format!("unit_weight={:.0} pcf", self.unit_weight(i, false)));
            }
            match layer.soil_type {
                SoilType::Sand | SoilType::Gravel => {
                    if layer.friction_angle.is_none() {
                        filled.push(format!("phi={:.1} deg", self.friction_angle(i)));
                    }
                }
                SoilType::Silt => {
                    if layer.friction_angle.is_none() {
                        filled.push(format!("phi={:.1} deg", self.friction_angle(i)));
                    }
                    if layer.cohesion.is_none() {
                        filled.push(format!("cu={:.0} psf", self.cohesion(i)));
                    }
                }
                SoilType::Clay | SoilType::Organic => {
                    if layer.cohesion.is_none() {
                        filled.push(format!("cu={:.0} psf", self.cohesion(i)));
                    }
                }
            }
            if !filled.is_empty() {
                report.push(format!(
                    "layer {} ({:?}): auto-derived {}",
                    i + 1,
                    layer.soil_type,
                    filled.join(", ")
                ));
            }
        }
        report
    }

    /// Validates the profile for analysis.
    ///
    /// Each layer needs a positive thickness and either an SPT blow count
    /// or the explicit parameters its soil type requires.
    pub fn validate(&self) -> PileResult<()> {
        if self.layers.is_empty() {
            return Err(PileError::invalid_input(
                "soil_profile.empty",
                "Soil profile must contain at least one layer.",
            ));
        }

        for (i, layer) in self.layers.iter().enumerate() {
            let prefix = format!("soil_profile.layer_{}", i + 1);
            validate_field("thickness", Some(layer.thickness), Some(1e-4), None, &prefix)?;
            if let Some(n) = layer.n_spt {
                validate_field("n_spt", Some(n), Some(0.0), Some(200.0), &prefix)?;
            }
            if let Some(g) = layer.unit_weight {
                validate_field("unit_weight", Some(g), Some(20.0), Some(200.0), &prefix)?;
            }
            if let Some(phi) = layer.friction_angle {
                validate_field("friction_angle", Some(phi), Some(0.0), Some(50.0), &prefix)?;
            }
            if let Some(cu) = layer.cohesion {
                validate_field("cohesion", Some(cu), Some(0.0), None, &prefix)?;
            }

            let has_spt = layer.n_spt.is_some();
            let has_strength = match layer.soil_type {
                SoilType::Sand | SoilType::Gravel => {
                    layer.friction_angle.map(|p| p > 0.0).unwrap_or(false)
                }
                SoilType::Clay | SoilType::Organic => {
                    layer.cohesion.map(|c| c > 0.0).unwrap_or(false)
                }
                SoilType::Silt => {
                    layer.friction_angle.map(|p| p > 0.0).unwrap_or(false)
                        || layer.cohesion.map(|c| c > 0.0).unwrap_or(false)
                }
            };
            if !has_spt && !has_strength {
                return Err(PileError::invalid_input(
                    format!("{}.underivable", prefix),
                    "Layer needs an SPT blow count or explicit strength parameters.",
                ));
            }
        }

        if let Some(wt) = self.water_table {
            validate_field("water_table", Some(wt), Some(0.0), None, "soil_profile")?;
        }

        Ok(())
    }
}
