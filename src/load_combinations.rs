//! ASCE 7-22 load combination generator: LRFD (§2.3) and ASD (§2.4)
//! families from unfactored per-pile components.

use serde::{Deserialize, Serialize};

use crate::enums::CombinationMethod;
use crate::error::PileResult;
use crate::models::loads::LoadInput;

/// One factored load case.
///
/// `v_comp` is positive compression, `v_tens` positive net uplift; only
/// one of the two is nonzero. Moment in ft·lb at the ground line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCase {
    pub name: String,
    pub v_comp: f64,
    pub v_tens: f64,
    pub h_lat: f64,
    pub m_ground: f64,
}

/// Generated combination families.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationSet {
    pub lrfd: Option<Vec<LoadCase>>,
    pub asd: Option<Vec<LoadCase>>,
}

/// Lateral-load direction of a vertical wind or seismic component.
#[derive(Clone, Copy, PartialEq)]
enum Vertical {
    Down,
    Up,
}

struct CaseSpec {
    name: &'static str,
    d: f64,
    l: f64,
    s: f64,
    /// Wind factor and which vertical wind component it scales.
    wind: Option<(f64, Vertical)>,
    /// Seismic factor and the E_v direction.
    seismic: Option<(f64, Vertical)>,
}

fn build_case(spec: &CaseSpec, loads: &LoadInput) -> LoadCase {
    let mut down = spec.d * loads.dead + spec.l * loads.live + spec.s * loads.snow;
    let mut up = 0.0;
    let mut h = 0.0;
    let mut m = 0.0;

    if let Some((f, dir)) = spec.wind {
        match dir {
            Vertical::Down => down += f * loads.wind_down,
            Vertical::Up => up += f * loads.wind_up,
        }
        h += f * loads.wind_lateral;
        m += f * loads.wind_moment;
    }
    if let Some((f, dir)) = spec.seismic {
        match dir {
            Vertical::Down => down += f * loads.seismic_vertical,
            Vertical::Up => up += f * loads.seismic_vertical,
        }
        h += f * loads.seismic_lateral;
        m += f * loads.seismic_moment;
    }

    let net = down - up;
    LoadCase {
        name: spec.name.to_string(),
        v_comp: net.max(0.0),
        v_tens: (-net).max(0.0),
        h_lat: h,
        m_ground: h * loads.lever_arm + m,
    }
}

const LRFD_CASES: &[CaseSpec] = &[
    CaseSpec { name: "1.4D", d: 1.4, l: 0.0, s: 0.0, wind: None, seismic: None },
    CaseSpec { name: "1.2D + 1.6L + 0.5S", d: 1.2, l: 1.6, s: 0.5, wind: None, seismic: None },
    CaseSpec { name: "1.2D + 1.6S + 0.5W", d: 1.2, l: 0.0, s: 1.6, wind: Some((0.5, Vertical::Down)), seismic: None },
    CaseSpec { name: "1.2D + 1.0W + L + 0.5S (wind down)", d: 1.2, l: 1.0, s: 0.5, wind: Some((1.0, Vertical::Down)), seismic: None },
    CaseSpec { name: "1.2D + 1.0W + L + 0.5S (wind up)", d: 1.2, l: 1.0, s: 0.5, wind: Some((1.0, Vertical::Up)), seismic: None },
    CaseSpec { name: "1.2D + 1.0E + L + 0.2S (Ev down)", d: 1.2, l: 1.0, s: 0.2, wind: None, seismic: Some((1.0, Vertical::Down)) },
    CaseSpec { name: "1.2D + 1.0E + L + 0.2S (Ev up)", d: 1.2, l: 1.0, s: 0.2, wind: None, seismic: Some((1.0, Vertical::Up)) },
    CaseSpec { name: "0.9D + 1.0W (wind down)", d: 0.9, l: 0.0, s: 0.0, wind: Some((1.0, Vertical::Down)), seismic: None },
    CaseSpec { name: "0.9D + 1.0W", d: 0.9, l: 0.0, s: 0.0, wind: Some((1.0, Vertical::Up)), seismic: None },
    CaseSpec { name: "0.9D + 1.0E", d: 0.9, l: 0.0, s: 0.0, wind: None, seismic: Some((1.0, Vertical::Up)) },
];

const ASD_CASES: &[CaseSpec] = &[
    CaseSpec { name: "D", d: 1.0, l: 0.0, s: 0.0, wind: None, seismic: None },
    CaseSpec { name: "D + L", d: 1.0, l: 1.0, s: 0.0, wind: None, seismic: None },
    CaseSpec { name: "D + S", d: 1.0, l: 0.0, s: 1.0, wind: None, seismic: None },
    CaseSpec { name: "D + 0.75(L + S)", d: 1.0, l: 0.75, s: 0.75, wind: None, seismic: None },
    CaseSpec { name: "D + 0.6W", d: 1.0, l: 0.0, s: 0.0, wind: Some((0.6, Vertical::Down)), seismic: None },
    CaseSpec { name: "D + 0.75(0.6W) + 0.75L + 0.75S", d: 1.0, l: 0.75, s: 0.75, wind: Some((0.45, Vertical::Down)), seismic: None },
    CaseSpec { name: "0.6D + 0.6W", d: 0.6, l: 0.0, s: 0.0, wind: Some((0.6, Vertical::Up)), seismic: None },
    CaseSpec { name: "D + 0.7E", d: 1.0, l: 0.0, s: 0.0, wind: None, seismic: Some((0.7, Vertical::Down)) },
    CaseSpec { name: "D + 0.75(0.7E) + 0.75L + 0.75S", d: 1.0, l: 0.75, s: 0.75, wind: None, seismic: Some((0.525, Vertical::Down)) },
    CaseSpec { name: "0.6D + 0.7E", d: 0.6, l: 0.0, s: 0.0, wind: None, seismic: Some((0.7, Vertical::Up)) },
];

/// Tags the governing compression and uplift cases and the solar-uplift
/// wind case.
fn tag_cases(cases: &mut [LoadCase]) {
    if let Some(i) = cases
        .iter()
        .enumerate()
        .filter(|(_, c)| c.v_comp > 0.0)
        .max_by(|(_, a), (_, b)| a.v_comp.total_cmp(&b.v_comp))
        .map(|(i, _)| i)
    {
        cases[i].name.push_str(" (governs compression)");
    }
    if let Some(i) = cases
        .iter()
        .enumerate()
        .filter(|(_, c)| c.v_tens > 0.0)
        .max_by(|(_, a), (_, b)| a.v_tens.total_cmp(&b.v_tens))
        .map(|(i, _)| i)
    {
        cases[i].name.push_str(" (governs uplift)");
    }
}

/// Generates the ordered LRFD and/or ASD case lists.
///
/// # Arguments
/// * `loads` - Unfactored per-pile components.
/// * `method` - Which family (or both) to generate.
pub fn generate_combinations(
    loads: &LoadInput,
    method: CombinationMethod,
) -> PileResult<CombinationSet> {
    loads.validate()?;

    let build = |specs: &[CaseSpec]| -> Vec<LoadCase> {
        let mut cases: Vec<LoadCase> = specs.iter().map(|s| build_case(s, loads)).collect();
        // The 0.9D + 1.0W uplift companion typically governs solar piles.
        for case in &mut cases {
            if case.name == "0.9D + 1.0W" && case.v_tens > 0.0 {
                case.name = "0.9D + 1.0W (UPLIFT)".to_string();
            }
        }
        tag_cases(&mut cases);
        cases
    };

    Ok(CombinationSet {
        lrfd: match method {
            CombinationMethod::Lrfd | CombinationMethod::Both => Some(build(LRFD_CASES)),
            CombinationMethod::Asd => None,
        },
        asd: match method {
            CombinationMethod::Asd | CombinationMethod::Both => Some(build(ASD_CASES)),
            CombinationMethod::Lrfd => None,
        },
    })
}
