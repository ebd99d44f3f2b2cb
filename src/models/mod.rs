pub mod loads;
pub mod section;
pub mod soil_profile;

pub use loads::LoadInput;
pub use section::SteelSection;
pub use soil_profile::{SoilLayer, SoilProfile, SptCorrections};
