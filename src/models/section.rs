use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::BendingAxis;
use crate::error::{PileError, PileResult};
use crate::units::{DEFAULT_FY_PSI, E_STEEL_PSI};

/// Steel pile cross-section.
///
/// Geometry in inches, areas in in², moduli in in³/in⁴, yield strength in
/// psi. Shaft transfer uses the box perimeter `2(d + b_f)` and the plugged
/// tip area `d·b_f`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteelSection {
    pub name: String,
    /// Nominal depth, in.
    pub d: f64,
    /// Flange width, in.
    pub bf: f64,
    /// Flange thickness, in.
    pub tf: f64,
    /// Web thickness, in.
    pub tw: f64,
    /// Cross-sectional area, in².
    pub area: f64,
    /// Weight per length, lb/ft.
    pub weight_plf: f64,
    pub ix: f64,
    pub iy: f64,
    pub sx: f64,
    pub sy: f64,
    pub zx: f64,
    pub zy: f64,
    /// Yield strength, psi.
    pub fy: f64,
}

impl SteelSection {
    /// Moment of inertia on the chosen bending axis, in⁴.
    pub fn moment_of_inertia(&self, axis: BendingAxis) -> f64 {
        match axis {
            BendingAxis::Strong => self.ix,
            BendingAxis::Weak => self.iy,
        }
    }

    /// Elastic section modulus on the chosen bending axis, in³.
    pub fn section_modulus(&self, axis: BendingAxis) -> f64 {
        match axis {
            BendingAxis::Strong => self.sx,
            BendingAxis::Weak => self.sy,
        }
    }

    /// Plastic section modulus on the chosen bending axis, in³.
    pub fn plastic_modulus(&self, axis: BendingAxis) -> f64 {
        match axis {
            BendingAxis::Strong => self.zx,
            BendingAxis::Weak => self.zy,
        }
    }

    /// Flexural rigidity EI on the chosen axis, lb·in².
    pub fn ei(&self, axis: BendingAxis) -> f64 {
        E_STEEL_PSI * self.moment_of_inertia(axis)
    }

    /// Axial rigidity EA, lb.
    pub fn ea(&self) -> f64 {
        E_STEEL_PSI * self.area
    }

    /// First-yield moment F_y·S, lb·in.
    pub fn yield_moment(&self, axis: BendingAxis) -> f64 {
        self.fy * self.section_modulus(axis)
    }

    /// Plastic moment F_y·Z, lb·in.
    pub fn plastic_moment(&self, axis: BendingAxis) -> f64 {
        self.fy * self.plastic_modulus(axis)
    }

    /// Box perimeter for shaft friction, in.
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.d + self.bf)
    }

    /// Plugged tip area, in².
    pub fn tip_area(&self) -> f64 {
        self.d * self.bf
    }

    /// Pile width facing the lateral load, in.
    pub fn width(&self, axis: BendingAxis) -> f64 {
        match axis {
            BendingAxis::Strong => self.bf,
            BendingAxis::Weak => self.d,
        }
    }

    /// Derives a corrosion-reduced section by thinning the flanges and web
    /// by `2 · rate · design_life` (both faces exposed).
    ///
    /// Properties are rebuilt from an idealized two-flange-plus-web model
    /// and scaled so the uncorroded idealization reproduces the catalogue
    /// values.
    ///
    /// # Arguments
    /// * `rate` - Section loss rate per exposed face, in/yr.
    /// * `design_life` - Design life in years.
    pub fn with_corrosion(&self, rate: f64, design_life: f64) -> PileResult<SteelSection> {
        let loss = 2.0 * rate * design_life;
        let tf_red = self.tf - loss;
        let tw_red = self.tw - loss;
        if tf_red <= 0.0 || tw_red <= 0.0 {
            return Err(PileError::invalid_input(
                "section.corrosion.consumed",
                format!(
                    "Corrosion allowance {:.3} in consumes the {} plate thickness.",
                    loss, self.name
                ),
            ));
        }

        let base = ideal_properties(self.d, self.bf, self.tf, self.tw);
        let red = ideal_properties(self.d, self.bf, tf_red, tw_red);

        let scale = |catalog: f64, ideal0: f64, ideal1: f64| catalog * ideal1 / ideal0;

        Ok(SteelSection {
            name: format!("{} (corroded {:.0} yr)", self.name, design_life),
            d: self.d,
            bf: self.bf,
            tf: tf_red,
            tw: tw_red,
            area: scale(self.area, base.area, red.area),
            weight_plf: self.weight_plf * red.area / base.area,
            ix: scale(self.ix, base.ix, red.ix),
            iy: scale(self.iy, base.iy, red.iy),
            sx: scale(self.sx, base.sx, red.sx),
            sy: scale(self.sy, base.sy, red.sy),
            zx: scale(self.zx, base.zx, red.zx),
            zy: scale(self.zy, base.zy, red.zy),
            fy: self.fy,
        })
    }
}

struct IdealProps {
    area: f64,
    ix: f64,
    iy: f64,
    sx: f64,
    sy: f64,
    zx: f64,
    zy: f64,
}

/// Two flange plates plus a web plate.
fn ideal_properties(d: f64, bf: f64, tf: f64, tw: f64) -> IdealProps {
    let hw = d - 2.0 * tf;
    let area = 2.0 * bf * tf + hw * tw;
    let ix = 2.0 * (bf * tf.powi(3) / 12.0 + bf * tf * ((d - tf) / 2.0).powi(2))
        + tw * hw.powi(3) / 12.0;
    let iy = 2.0 * tf * bf.powi(3) / 12.0 + hw * tw.powi(3) / 12.0;
    let sx = ix / (d / 2.0);
    let sy = iy / (bf / 2.0);
    let zx = bf * tf * (d - tf) + tw * hw.powi(2) / 4.0;
    let zy = tf * bf.powi(2) / 2.0 + hw * tw.powi(2) / 4.0;
    IdealProps {
        area,
        ix,
        iy,
        sx,
        sy,
        zx,
        zy,
    }
}

// (name, wt plf, d, bf, tf, tw, A, Ix, Sx, Zx, Iy, Sy, Zy)
#[rustfmt::skip]
const CATALOG: &[(&str, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64)] = &[
    ("W6X7",    7.0,  5.87, 3.87,  0.171, 0.140, 2.06, 12.2, 4.16, 4.69, 1.65,  0.853, 1.31),
    ("W6X8.5",  8.5,  5.83, 3.94,  0.195, 0.170, 2.52, 14.9, 5.10, 5.73, 1.99,  1.01,  1.56),
    ("W6X9",    9.0,  5.90, 3.94,  0.215, 0.170, 2.68, 16.4, 5.56, 6.23, 2.20,  1.11,  1.72),
    ("W6X12",  12.0,  6.03, 4.00,  0.280, 0.230, 3.55, 22.1, 7.31, 8.30, 2.99,  1.50,  2.32),
    ("W6X15",  15.0,  5.99, 5.99,  0.260, 0.230, 4.43, 29.1, 9.72, 10.8, 9.32,  3.11,  4.75),
    ("W6X16",  16.0,  6.28, 4.03,  0.405, 0.260, 4.74, 32.1, 10.2, 11.7, 4.43,  2.20,  3.39),
    ("W6X20",  20.0,  6.20, 6.02,  0.365, 0.260, 5.87, 41.4, 13.4, 14.9, 13.3,  4.41,  6.72),
    ("W6X25",  25.0,  6.38, 6.08,  0.455, 0.320, 7.34, 53.4, 16.7, 18.9, 17.1,  5.61,  8.56),
    ("W8X10",  10.0,  7.89, 3.94,  0.205, 0.170, 2.96, 30.8, 7.81, 8.87, 2.09,  1.06,  1.66),
    ("W8X13",  13.0,  7.99, 4.00,  0.255, 0.230, 3.84, 39.6, 9.91, 11.4, 2.73,  1.37,  2.15),
    ("W8X15",  15.0,  8.11, 4.02,  0.315, 0.245, 4.44, 48.0, 11.8, 13.6, 3.41,  1.70,  2.67),
    ("W8X18",  18.0,  8.14, 5.25,  0.330, 0.230, 5.26, 61.9, 15.2, 17.0, 7.97,  3.04,  4.66),
    ("C4X5.4",  5.4,  4.00, 1.58,  0.296, 0.184, 1.58,  3.85, 1.93, 2.26, 0.312, 0.277, 0.563),
    ("C4X7.25", 7.25, 4.00, 1.72,  0.296, 0.321, 2.13,  4.58, 2.29, 2.84, 0.425, 0.337, 0.695),
];

static SECTION_TABLE: Lazy<BTreeMap<&'static str, SteelSection>> = Lazy::new(|| {
    CATALOG
        .iter()
        .map(|&(name, wt, d, bf, tf, tw, a, ix, sx, zx, iy, sy, zy)| {
            (
                name,
                SteelSection {
                    name: name.to_string(),
                    d,
                    bf,
                    tf,
                    tw,
                    area: a,
                    weight_plf: wt,
                    ix,
                    iy,
                    sx,
                    sy,
                    zx,
                    zy,
                    fy: DEFAULT_FY_PSI,
                },
            )
        })
        .collect()
});

/// Looks up a catalogue section by name (case-insensitive, `x` or `X`).
///
/// # Arguments
/// * `name` - Section designation, e.g. "W6x9".
///
/// # Returns
/// * The section with the default F_y, or `InvalidInput` for an unknown name.
pub fn get_section(name: &str) -> PileResult<SteelSection> {
    let key = name.trim().to_uppercase().replace(' ', "");
    SECTION_TABLE
        .get(key.as_str())
        .cloned()
        .ok_or_else(|| {
            PileError::invalid_input(
                "section.unknown",
                format!("Section '{}' is not in the catalogue.", name),
            )
        })
}

/// Names of all bundled sections, catalogue order not guaranteed.
pub fn section_names() -> Vec<&'static str> {
    SECTION_TABLE.keys().copied().collect()
}
