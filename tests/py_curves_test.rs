use approx::assert_abs_diff_eq;
use pilerust::enums::SoilType;
use pilerust::helper::Notes;
use pilerust::models::soil_profile::{SoilLayer, SoilProfile};
use pilerust::py::{self, PYModel, PYParams};

const B: f64 = 3.94; // W6x9 flange width, in

fn single_layer_profile(soil_type: SoilType, configure: impl FnOnce(&mut SoilLayer)) -> SoilProfile {
    let mut layer = SoilLayer::new(soil_type, 20.0);
    layer.n_spt = Some(15.0);
    configure(&mut layer);
    SoilProfile::new(vec![layer], None).unwrap()
}

fn build(profile: &SoilProfile, z_ft: f64, cyclic: bool) -> pilerust::py::PYCurve {
    let mut notes = Notes::new();
    py::build_curve(profile, z_ft, B, cyclic, &mut notes).unwrap()
}

/// Models whose curves are nondecreasing in |y| by construction.
fn monotone_model_profiles() -> Vec<(&'static str, SoilProfile)> {
    vec![
        (
            "matlock",
            single_layer_profile(SoilType::Clay, |l| l.cohesion = Some(400.0)),
        ),
        (
            "api_soft_clay",
            single_layer_profile(SoilType::Clay, |l| {
                l.cohesion = Some(400.0);
                l.py_model = PYModel::ApiSoftClay;
                l.py_params.j_factor = Some(0.25);
            }),
        ),
        (
            "welch",
            single_layer_profile(SoilType::Clay, |l| {
                l.cohesion = Some(2500.0);
                l.py_model = PYModel::WelchReeseStiffClay;
            }),
        ),
        (
            "brown",
            single_layer_profile(SoilType::Clay, |l| {
                l.cohesion = Some(2500.0);
                l.py_model = PYModel::BrownModifiedStiffClay;
            }),
        ),
        (
            "piedmont",
            single_layer_profile(SoilType::Clay, |l| {
                l.cohesion = Some(1500.0);
                l.py_model = PYModel::PiedmontResidual;
            }),
        ),
        (
            "reese_sand",
            single_layer_profile(SoilType::Sand, |l| l.py_model = PYModel::ReeseSand),
        ),
        (
            "api_sand",
            single_layer_profile(SoilType::Sand, |l| l.py_model = PYModel::ApiSand),
        ),
        (
            "small_strain_sand",
            single_layer_profile(SoilType::Sand, |l| l.py_model = PYModel::SmallStrainSand),
        ),
        (
            "cemented_silt",
            single_layer_profile(SoilType::Silt, |l| {
                l.cohesion = Some(600.0);
                l.friction_angle = Some(30.0);
                l.py_model = PYModel::CementedSilt;
            }),
        ),
        (
            "weak_rock",
            single_layer_profile(SoilType::Gravel, |l| {
                l.py_model = PYModel::WeakRock;
                l.py_params.q_ur = Some(500.0);
                l.py_params.rqd = Some(60.0);
                l.py_params.e_ir = Some(50_000.0);
            }),
        ),
        (
            "strong_rock",
            single_layer_profile(SoilType::Gravel, |l| {
                l.py_model = PYModel::StrongRock;
                l.py_params.q_ur = Some(2000.0);
            }),
        ),
        (
            "massive_rock",
            single_layer_profile(SoilType::Gravel, |l| {
                l.py_model = PYModel::MassiveRock;
                l.py_params.sigma_ci = Some(3000.0);
                l.py_params.m_i = Some(12.0);
                l.py_params.gsi = Some(60.0);
            }),
        ),
        (
            "loess",
            single_layer_profile(SoilType::Silt, |l| {
                l.py_model = PYModel::Loess;
                l.py_params.q_c = Some(800.0);
            }),
        ),
        (
            "liquefied",
            single_layer_profile(SoilType::Sand, |l| l.py_model = PYModel::LiquefiedSandRollins),
        ),
        (
            "hybrid",
            single_layer_profile(SoilType::Sand, |l| l.py_model = PYModel::LiquefiedSandHybrid),
        ),
        (
            "user",
            single_layer_profile(SoilType::Sand, |l| {
                l.py_model = PYModel::UserDefined;
                l.py_params.user_curve = Some(vec![(0.05, 20.0), (0.2, 55.0), (0.5, 80.0)]);
            }),
        ),
    ]
}

#[test]
fn test_monotone_models_are_odd_nondecreasing_and_capped() {
    for (name, profile) in monotone_model_profiles() {
        for z_ft in [1.0, 5.0, 12.0] {
            let curve = build(&profile, z_ft, false);
            let ultimate = curve.ultimate();
            let mut prev = 0.0;
            for i in 0..=200 {
                let y = 0.4 * B * i as f64 / 200.0;
                let p = curve.p(y);
                assert!(
                    p >= prev - 1e-9,
                    "{name} decreased at z={z_ft}, y={y}: {p} < {prev}"
                );
                assert!(
                    p <= ultimate * (1.0 + 1e-9) + 1e-9,
                    "{name} exceeded its cap at z={z_ft}, y={y}"
                );
                assert_abs_diff_eq!(curve.p(-y), -p, epsilon = 1e-12);
                assert!(p.is_finite());
                prev = p;
            }
        }
    }
}

#[test]
fn test_stiff_clay_water_is_continuous_and_capped() {
    let profile = single_layer_profile(SoilType::Clay, |l| {
        l.cohesion = Some(2500.0);
        l.py_model = PYModel::ReeseStiffClayWater;
    });
    for z_ft in [1.0, 5.0, 12.0] {
        let curve = build(&profile, z_ft, false);
        let ultimate = curve.ultimate();
        let mut prev = curve.p(0.0);
        for i in 1..=400 {
            let y = 0.5 * B * i as f64 / 400.0;
            let p = curve.p(y);
            assert!(p <= ultimate * (1.0 + 1e-9));
            assert!(
                (p - prev).abs() < 0.05 * ultimate + 1e-9,
                "jump in stiff clay curve at z={z_ft}, y={y}"
            );
            prev = p;
        }
    }
}

#[test]
fn test_auto_resolution_matches_explicit_models() {
    // Sand AUTO == API sand.
    let auto_sand = single_layer_profile(SoilType::Sand, |_| {});
    let api_sand = single_layer_profile(SoilType::Sand, |l| l.py_model = PYModel::ApiSand);
    // Clay AUTO == Matlock.
    let auto_clay = single_layer_profile(SoilType::Clay, |l| l.cohesion = Some(600.0));
    let matlock = single_layer_profile(SoilType::Clay, |l| {
        l.cohesion = Some(600.0);
        l.py_model = PYModel::MatlockSoftClay;
    });

    for (a, b) in [(auto_sand, api_sand), (auto_clay, matlock)] {
        for z_ft in [2.0, 8.0] {
            let ca = build(&a, z_ft, false);
            let cb = build(&b, z_ft, false);
            for i in 0..=50 {
                let y = 0.3 * B * i as f64 / 50.0;
                assert_abs_diff_eq!(ca.p(y), cb.p(y), epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn test_matlock_hand_values() {
    // cu = 400 psf, γ = 115 pcf, z = 5 ft: N_p caps at 9.
    let profile = single_layer_profile(SoilType::Clay, |l| {
        l.cohesion = Some(400.0);
        l.unit_weight = Some(115.0);
    });
    let curve = build(&profile, 5.0, false);
    let cu_psi = 400.0 / 144.0;
    let p_ult = 9.0 * cu_psi * B;
    assert_abs_diff_eq!(curve.ultimate(), p_ult, epsilon = 1e-6);

    // Soft clay: ε₅₀ = 0.02, y50 = 2.5·ε₅₀·b; half strength at y50.
    let y50 = 2.5 * 0.02 * B;
    assert_abs_diff_eq!(curve.p(y50), 0.5 * p_ult, epsilon = 1e-6);
    // Flat past 8·y50.
    assert_abs_diff_eq!(curve.p(9.0 * y50), p_ult, epsilon = 1e-6);
}

#[test]
fn test_matlock_cyclic_caps_at_072() {
    let profile = single_layer_profile(SoilType::Clay, |l| l.cohesion = Some(400.0));
    // Deep enough to sit below the transition depth.
    let curve = build(&profile, 15.0, true);
    let p_ult = build(&profile, 15.0, false).ultimate();
    let y50 = 2.5 * 0.02 * B;
    assert_abs_diff_eq!(curve.p(5.0 * y50), 0.72 * p_ult, epsilon = 1e-6);
    assert_abs_diff_eq!(curve.p(20.0 * y50), 0.72 * p_ult, epsilon = 1e-6);
}

#[test]
fn test_matlock_cyclic_shallow_softens() {
    let profile = single_layer_profile(SoilType::Clay, |l| l.cohesion = Some(400.0));
    let curve = build(&profile, 1.0, true);
    let p_static = build(&profile, 1.0, false);
    let y50 = 2.5 * 0.02 * B;
    // Residual at large displacement is below the static ultimate.
    assert!(curve.p(20.0 * y50) < 0.72 * p_static.ultimate());
}

#[test]
fn test_api_sand_cyclic_equals_static_at_depth() {
    // Below z/b = 2.625 the static A factor hits 0.9, matching cyclic.
    let profile = single_layer_profile(SoilType::Sand, |l| l.py_model = PYModel::ApiSand);
    let z_deep = 5.0 * B / 12.0;
    let s = build(&profile, z_deep, false);
    let c = build(&profile, z_deep, true);
    for i in 0..=40 {
        let y = 0.2 * B * i as f64 / 40.0;
        assert_abs_diff_eq!(s.p(y), c.p(y), epsilon = 1e-9);
    }
}

#[test]
fn test_elastic_subgrade_is_unbounded() {
    let profile = single_layer_profile(SoilType::Sand, |l| {
        l.py_model = PYModel::ElasticSubgrade;
        l.py_params.k_initial = Some(60.0);
    });
    let curve = build(&profile, 5.0, false);
    assert!(curve.ultimate().is_infinite());
    // p = k·z·y exactly.
    assert_abs_diff_eq!(curve.p(0.5), 60.0 * 60.0 * 0.5, epsilon = 1e-9);
}

#[test]
fn test_user_table_interpolates_and_extrapolates_flat() {
    let profile = single_layer_profile(SoilType::Sand, |l| {
        l.py_model = PYModel::UserDefined;
        l.py_params.user_curve = Some(vec![(0.1, 40.0), (0.3, 100.0)]);
    });
    let curve = build(&profile, 5.0, false);
    assert_abs_diff_eq!(curve.p(0.05), 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(curve.p(0.2), 70.0, epsilon = 1e-9);
    assert_abs_diff_eq!(curve.p(1.0), 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(curve.ultimate(), 100.0, epsilon = 1e-9);
}

#[test]
fn test_missing_model_parameters_are_invalid_input() {
    let mut notes = Notes::new();

    let rock = single_layer_profile(SoilType::Gravel, |l| l.py_model = PYModel::WeakRock);
    assert!(py::build_curve(&rock, 5.0, B, false, &mut notes).is_err());

    let elastic = single_layer_profile(SoilType::Sand, |l| l.py_model = PYModel::ElasticSubgrade);
    assert!(py::build_curve(&elastic, 5.0, B, false, &mut notes).is_err());

    let loess = single_layer_profile(SoilType::Silt, |l| l.py_model = PYModel::Loess);
    assert!(py::build_curve(&loess, 5.0, B, false, &mut notes).is_err());

    let bad_table = single_layer_profile(SoilType::Sand, |l| {
        l.py_model = PYModel::UserDefined;
        l.py_params.user_curve = Some(vec![(0.3, 100.0), (0.1, 40.0)]);
    });
    assert!(py::build_curve(&bad_table, 5.0, B, false, &mut notes).is_err());
}

#[test]
fn test_tangent_slope_matches_secant_in_linear_range() {
    let profile = single_layer_profile(SoilType::Sand, |l| {
        l.py_model = PYModel::ElasticSubgrade;
        l.py_params.k_initial = Some(100.0);
    });
    let curve = build(&profile, 5.0, false);
    assert_abs_diff_eq!(curve.dp_dy(0.1), 100.0 * 60.0, epsilon = 1e-3);
}
