pub mod analysis;
pub mod axial;
pub mod bnwf;
pub mod broms;
pub mod enums;
pub mod error;
pub mod group;
pub mod helper;
pub mod lateral;
pub mod load_combinations;
pub mod models;
pub mod py;
pub mod units;
pub mod validation;
