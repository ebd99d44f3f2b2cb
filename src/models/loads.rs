use serde::{Deserialize, Serialize};

use crate::error::PileResult;
use crate::validation::{validate_field, validate_finite};

/// Unfactored per-pile load components.
///
/// Vertical components are magnitudes: `wind_up` and `seismic_vertical`
/// act upward, everything else downward. Forces in lb, moments in ft·lb,
/// lever arm in ft above ground.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LoadInput {
    pub dead: f64,
    pub live: f64,
    pub snow: f64,
    pub wind_down: f64,
    pub wind_up: f64,
    pub wind_lateral: f64,
    pub wind_moment: f64,
    pub seismic_vertical: f64,
    pub seismic_lateral: f64,
    pub seismic_moment: f64,
    /// Height of lateral load application above ground, ft.
    pub lever_arm: f64,
}

impl LoadInput {
    /// Validates that every component is finite and non-negative (signs
    /// are carried by the combination factors, not the inputs).
    pub fn validate(&self) -> PileResult<()> {
        let fields = [
            ("dead", self.dead),
            ("live", self.live),
            ("snow", self.snow),
            ("wind_down", self.wind_down),
            ("wind_up", self.wind_up),
            ("wind_lateral", self.wind_lateral),
            ("wind_moment", self.wind_moment),
            ("seismic_vertical", self.seismic_vertical),
            ("seismic_lateral", self.seismic_lateral),
            ("seismic_moment", self.seismic_moment),
            ("lever_arm", self.lever_arm),
        ];
        for (name, value) in fields {
            validate_finite(name, value, "loads")?;
            validate_field(name, Some(value), Some(0.0), None, "loads")?;
        }
        Ok(())
    }
}
