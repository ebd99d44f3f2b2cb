use approx::assert_abs_diff_eq;
use pilerust::analysis::broms_lateral;
use pilerust::broms::BromsMode;
use pilerust::enums::{BendingAxis, SoilType};
use pilerust::models::section::get_section;
use pilerust::models::soil_profile::{SoilLayer, SoilProfile};

fn sand_profile(depth: f64) -> SoilProfile {
    let mut sand = SoilLayer::new(SoilType::Sand, depth);
    sand.n_spt = Some(15.0);
    SoilProfile::new(vec![sand], None).unwrap()
}

fn clay_profile(cu: f64, depth: f64) -> SoilProfile {
    let mut clay = SoilLayer::new(SoilType::Clay, depth);
    clay.cohesion = Some(cu);
    clay.unit_weight = Some(115.0);
    clay.n_spt = Some(8.0);
    SoilProfile::new(vec![clay], None).unwrap()
}

#[test]
fn test_cohesionless_long_pile_yield_governs() {
    // 10 ft W6x9 in medium sand with a 4 ft lever arm: the section
    // yields before the short-pile mechanism forms.
    let profile = sand_profile(15.0);
    let section = get_section("W6x9").unwrap();
    let result =
        broms_lateral(&profile, &section, 10.0, BendingAxis::Strong, 4.0).unwrap();

    assert!(!result.cohesive);
    assert_eq!(result.mode, BromsMode::LongPileYield);
    assert!(result.h_long < result.h_short);
    assert!(
        result.h_ult > 3200.0 && result.h_ult < 3600.0,
        "h_ult = {}",
        result.h_ult
    );
    assert_abs_diff_eq!(result.h_allow, result.h_ult / 2.5, epsilon = 1e-9);

    // Short-pile mechanism: 0.5·γ·b·L³·Kp/(e + L).
    let gamma = 115.0 / 1728.0;
    let kp = (45.0_f64 + 33.4164 / 2.0).to_radians().tan().powi(2);
    let short = 0.5 * gamma * 3.94 * 120.0_f64.powi(3) * kp / (48.0 + 120.0);
    assert_abs_diff_eq!(result.h_short, short, epsilon = 0.01 * short);
}

#[test]
fn test_cohesionless_short_pile_for_stubby_embedment() {
    // A very short pile rotates before the section yields.
    let profile = sand_profile(15.0);
    let section = get_section("W6x25").unwrap();
    let result =
        broms_lateral(&profile, &section, 3.0, BendingAxis::Strong, 1.0).unwrap();
    assert_eq!(result.mode, BromsMode::ShortPile);
    assert!(result.h_short <= result.h_long);
}

#[test]
fn test_cohesive_capacity_is_consistent() {
    let profile = clay_profile(1000.0, 12.0);
    let section = get_section("W6x9").unwrap();
    let result =
        broms_lateral(&profile, &section, 8.0, BendingAxis::Strong, 0.0).unwrap();
    assert!(result.cohesive);
    assert!(result.h_ult > 0.0);
    // Shaft resistance ceiling: 9·c_u·b over the active length.
    let cu = 1000.0 / 144.0;
    let ceiling = 9.0 * cu * 3.94 * (96.0 - 1.5 * 3.94);
    assert!(result.h_short <= ceiling);

    // The short mechanism satisfies its own moment balance.
    let h = result.h_short;
    let f = h / (9.0 * cu * 3.94);
    let g = 96.0 - 1.5 * 3.94 - f;
    assert_abs_diff_eq!(
        h * (1.5 * 3.94 + 0.5 * f),
        2.25 * cu * 3.94 * g * g,
        epsilon = 1.0
    );
}

#[test]
fn test_cohesive_long_pile_quadratic() {
    // Slender pile in stiff clay: the yield mechanism governs and the
    // closed-form quadratic holds.
    let profile = clay_profile(3000.0, 30.0);
    let section = get_section("C4x5.4").unwrap();
    let result =
        broms_lateral(&profile, &section, 25.0, BendingAxis::Strong, 2.0).unwrap();
    assert_eq!(result.mode, BromsMode::LongPileYield);

    let cu = 3000.0 / 144.0;
    let b = 1.58;
    let e = 24.0;
    let h = result.h_long;
    let m_y = section.yield_moment(BendingAxis::Strong);
    assert_abs_diff_eq!(
        h * (e + 1.5 * b) + h * h / (18.0 * cu * b),
        m_y,
        epsilon = 1.0
    );
}

#[test]
fn test_deeper_embedment_does_not_reduce_capacity() {
    let profile = sand_profile(30.0);
    let section = get_section("W6x9").unwrap();
    let shallow = broms_lateral(&profile, &section, 6.0, BendingAxis::Strong, 2.0).unwrap();
    let deep = broms_lateral(&profile, &section, 12.0, BendingAxis::Strong, 2.0).unwrap();
    assert!(deep.h_ult >= shallow.h_ult - 1e-9);
}
