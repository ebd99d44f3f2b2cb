use approx::assert_abs_diff_eq;
use pilerust::enums::SoilType;
use pilerust::models::soil_profile::{SoilLayer, SoilProfile};

/// Clay over sand with the water table inside the sand layer.
fn setup_profile() -> SoilProfile {
    let mut clay = SoilLayer::new(SoilType::Clay, 2.0);
    clay.unit_weight = Some(110.0);
    clay.saturated_unit_weight = Some(115.0);
    clay.n_spt = Some(8.0);

    let mut sand = SoilLayer::new(SoilType::Sand, 3.0);
    sand.unit_weight = Some(120.0);
    sand.saturated_unit_weight = Some(125.0);
    sand.n_spt = Some(15.0);

    SoilProfile::new(vec![clay, sand], Some(2.5)).unwrap()
}

#[test]
fn test_layer_depths() {
    let profile = setup_profile();
    assert_eq!(profile.layers[0].depth.unwrap(), 2.0);
    assert_eq!(profile.layers[1].depth.unwrap(), 5.0);
    assert_eq!(profile.layers[0].center.unwrap(), 1.0);
    assert_eq!(profile.layers[1].center.unwrap(), 3.5);
    assert_eq!(profile.total_depth(), 5.0);
}

#[test]
fn test_layer_index_tie_breaks() {
    let profile = setup_profile();
    // Interior boundary at 2.0 ft: deeper layer by default, upper for
    // solver nodes.
    assert_eq!(profile.get_layer_index(2.0), 1);
    assert_eq!(profile.get_layer_index_upper(2.0), 0);
    assert_eq!(profile.get_layer_index(1.0), 0);
    assert_eq!(profile.get_layer_index(4.0), 1);
}

#[test]
fn test_normal_stress() {
    let profile = setup_profile();
    assert_abs_diff_eq!(profile.calc_normal_stress(1.0), 110.0, epsilon = 1e-6);
    assert_abs_diff_eq!(profile.calc_normal_stress(2.0), 220.0, epsilon = 1e-6);
    // 0.5 ft moist sand plus 0.5 ft saturated sand below the table.
    assert_abs_diff_eq!(
        profile.calc_normal_stress(3.0),
        220.0 + 0.5 * 120.0 + 0.5 * 125.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_effective_stress() {
    let profile = setup_profile();
    assert_abs_diff_eq!(profile.calc_effective_stress(2.0), 220.0, epsilon = 1e-6);
    assert_abs_diff_eq!(
        profile.calc_effective_stress(3.0),
        342.5 - 62.4 * 0.5,
        epsilon = 1e-6
    );
}

#[test]
fn test_effective_stress_monotone_and_bounded() {
    let profile = setup_profile();
    let mut prev = 0.0;
    for i in 0..=100 {
        let z = 5.0 * i as f64 / 100.0;
        let sigma = profile.calc_normal_stress(z);
        let sigma_eff = profile.calc_effective_stress(z);
        assert!(sigma_eff <= sigma + 1e-9);
        assert!(sigma_eff >= prev - 1e-9, "effective stress decreased at {z}");
        prev = sigma_eff;
    }
}

#[test]
fn test_spt_corrections() {
    let profile = setup_profile();
    // N60 = 15 · 0.60 with the default correction set.
    assert_abs_diff_eq!(profile.n60(1), 9.0, epsilon = 1e-9);
    // Shallow overburden drives C_N to its 2.0 cap.
    assert_abs_diff_eq!(profile.n1_60(0), 2.0 * profile.n60(0), epsilon = 1e-9);
}

#[test]
fn test_auto_friction_angle_and_cohesion() {
    let profile = setup_profile();
    assert_abs_diff_eq!(
        profile.friction_angle(1),
        (20.0 * 9.0_f64).sqrt() + 20.0,
        epsilon = 1e-9
    );
    assert_eq!(profile.friction_angle(0), 0.0);
    // Clay: 125 · N60 with N60 = 8 · 0.6.
    assert_abs_diff_eq!(profile.cohesion(0), 125.0 * 4.8, epsilon = 1e-9);
    assert_eq!(profile.cohesion(1), 0.0);
}

#[test]
fn test_explicit_values_win_and_survive() {
    let mut profile = setup_profile();
    profile.layers[0].cohesion = Some(750.0);
    assert_eq!(profile.cohesion(0), 750.0);
    // Querying derived parameters never overwrites the stored inputs.
    let _ = profile.derive_report();
    let _ = profile.friction_angle(0);
    assert_eq!(profile.layers[0].cohesion, Some(750.0));
    assert_eq!(profile.layers[0].n_spt, Some(8.0));
    assert!(profile.layers[0].friction_angle.is_none());
}

#[test]
fn test_water_table_above_surface_clamped() {
    let mut clay = SoilLayer::new(SoilType::Clay, 5.0);
    clay.n_spt = Some(4.0);
    let profile = SoilProfile::new(vec![clay], Some(-3.0)).unwrap();
    assert_eq!(profile.water_table, Some(0.0));
    assert!(profile.is_submerged(0.0));
}

#[test]
fn test_water_table_below_toe_has_no_effect() {
    let mut sand = SoilLayer::new(SoilType::Sand, 10.0);
    sand.n_spt = Some(15.0);
    let dry = SoilProfile::new(vec![sand.clone()], None).unwrap();
    let deep_wt = SoilProfile::new(vec![sand], Some(50.0)).unwrap();
    for i in 0..=20 {
        let z = 10.0 * i as f64 / 20.0;
        assert_abs_diff_eq!(
            dry.calc_effective_stress(z),
            deep_wt.calc_effective_stress(z),
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_split_layer_matches_single_layer() {
    let mut single = SoilLayer::new(SoilType::Sand, 10.0);
    single.n_spt = Some(15.0);
    let a = SoilProfile::new(vec![single], None).unwrap();

    let mut top = SoilLayer::new(SoilType::Sand, 4.0);
    top.n_spt = Some(15.0);
    let mut bottom = SoilLayer::new(SoilType::Sand, 6.0);
    bottom.n_spt = Some(15.0);
    let b = SoilProfile::new(vec![top, bottom], None).unwrap();

    for i in 0..=20 {
        let z = 10.0 * i as f64 / 20.0;
        assert_abs_diff_eq!(
            a.calc_effective_stress(z),
            b.calc_effective_stress(z),
            epsilon = 1e-9
        );
        let ia = a.get_layer_index(z);
        let ib = b.get_layer_index(z);
        assert_abs_diff_eq!(a.friction_angle(ia), b.friction_angle(ib), epsilon = 1e-9);
    }
}

#[test]
fn test_validation_rejects_underivable_layer() {
    let layer = SoilLayer::new(SoilType::Sand, 5.0);
    let profile = SoilProfile::new(vec![layer], None).unwrap();
    assert!(profile.validate().is_err());
}

#[test]
fn test_empty_profile_rejected() {
    assert!(SoilProfile::new(vec![], None).is_err());
}
