use approx::assert_abs_diff_eq;
use pilerust::bnwf::springs::{QZCurve, TZCurve, build_qz, build_tz};
use pilerust::enums::{PileType, SoilType};
use pilerust::helper::Notes;
use pilerust::models::section::get_section;
use pilerust::models::soil_profile::{SoilLayer, SoilProfile};

#[test]
fn test_tz_trilinear_shape() {
    let tz = TZCurve {
        t_max: 40.0,
        z_c: 0.06,
    };
    assert_eq!(tz.t(0.0), 0.0);
    assert_abs_diff_eq!(tz.t(0.03), 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(tz.t(0.06), 40.0, epsilon = 1e-9);
    assert_abs_diff_eq!(tz.t(0.50), 40.0, epsilon = 1e-9);
    // Odd about zero.
    assert_abs_diff_eq!(tz.t(-0.03), -30.0, epsilon = 1e-9);
    // Secant stiffness decreases with mobilization.
    assert!(tz.secant(0.01) >= tz.secant(0.05));
}

#[test]
fn test_qz_hyperbolic_then_linear() {
    let qz = QZCurve {
        q_max: 5000.0,
        b: 3.94,
    };
    assert_eq!(qz.q(0.0), 0.0);
    assert_abs_diff_eq!(qz.q(0.1 * 3.94), 0.9 * 5000.0, epsilon = 1e-6);
    assert_abs_diff_eq!(qz.q(0.2 * 3.94), 5000.0, epsilon = 1e-6);
    assert_abs_diff_eq!(qz.q(3.94), 5000.0, epsilon = 1e-6);
    // No tension resistance.
    assert_eq!(qz.q(-0.1), 0.0);
    assert_eq!(qz.secant(-0.1), 0.0);
    // Monotone nondecreasing.
    let mut prev = 0.0;
    for i in 0..=100 {
        let u = 0.3 * 3.94 * i as f64 / 100.0;
        let q = qz.q(u);
        assert!(q >= prev - 1e-9);
        prev = q;
    }
}

#[test]
fn test_build_tz_clay_alpha() {
    // c_u = 1000 psf at 6 ft: ψ > 1, α = 0.5·ψ^-0.25.
    let mut clay = SoilLayer::new(SoilType::Clay, 15.0);
    clay.cohesion = Some(1000.0);
    clay.unit_weight = Some(115.0);
    clay.n_spt = Some(8.0);
    let profile = SoilProfile::new(vec![clay], None).unwrap();
    let section = get_section("W6x9").unwrap();

    let mut notes = Notes::new();
    let tz = build_tz(&profile, 6.0, &section, PileType::DrivenSteel, &mut notes);
    let psi: f64 = 1000.0 / (115.0 * 6.0);
    let f_s = 0.5 * psi.powf(-0.25) * 1000.0;
    assert_abs_diff_eq!(tz.t_max, f_s / 144.0 * section.perimeter(), epsilon = 0.1);
    assert_abs_diff_eq!(tz.z_c, 0.01 * 5.90, epsilon = 1e-9);
}

#[test]
fn test_build_qz_sand_tip() {
    let mut sand = SoilLayer::new(SoilType::Sand, 15.0);
    sand.n_spt = Some(15.0);
    let profile = SoilProfile::new(vec![sand], None).unwrap();
    let section = get_section("W6x9").unwrap();

    let mut notes = Notes::new();
    let qz = build_qz(&profile, 10.0, &section, &mut notes).unwrap();
    assert!(qz.q_max > 0.0);
    assert_abs_diff_eq!(qz.b, 3.94, epsilon = 1e-9);
    // Same unit end bearing as the axial kernel (Meyerhof limit governs
    // for this profile).
    assert_abs_diff_eq!(qz.q_max, 27_770.0 * 23.246 / 144.0, epsilon = 40.0);
}
