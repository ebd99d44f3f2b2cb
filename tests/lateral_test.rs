use approx::assert_abs_diff_eq;
use pilerust::analysis::lateral_analysis;
use pilerust::enums::{BendingAxis, HeadCondition, SoilType};
use pilerust::helper::CancelFlag;
use pilerust::models::section::get_section;
use pilerust::models::soil_profile::{SoilLayer, SoilProfile};
use pilerust::py::PYModel;

/// Uniform medium sand, N_spt = 15 (N60 = 9, φ ≈ 33.4°, γ = 115 pcf).
fn medium_sand(depth: f64) -> SoilProfile {
    let mut sand = SoilLayer::new(SoilType::Sand, depth);
    sand.n_spt = Some(15.0);
    SoilProfile::new(vec![sand], None).unwrap()
}

/// Soft clay, c_u = 400 psf, water table at 5 ft.
fn soft_clay(depth: f64) -> SoilProfile {
    let mut clay = SoilLayer::new(SoilType::Clay, depth);
    clay.cohesion = Some(400.0);
    clay.n_spt = Some(4.0);
    SoilProfile::new(vec![clay], Some(5.0)).unwrap()
}

#[test]
fn test_medium_sand_free_head_scenario() {
    let profile = medium_sand(15.0);
    let section = get_section("W6x9").unwrap();
    let result = lateral_analysis(
        &profile,
        &section,
        10.0,
        BendingAxis::Strong,
        1500.0,
        6000.0,
        HeadCondition::Free,
        false,
        None,
    )
    .unwrap();

    assert!(result.converged);
    assert!(
        result.y_ground > 0.03 && result.y_ground < 0.30,
        "y_ground = {}",
        result.y_ground
    );
    // Peak moment exceeds the applied ground moment and sits below grade.
    assert!(result.m_max > 6000.0 * 12.0);
    assert!(
        result.depth_m_max > 1.0 && result.depth_m_max < 6.0,
        "depth_m_max = {}",
        result.depth_m_max
    );
    assert!(result.depth_zero_deflection.is_some());
    assert!(result.dcr > 0.0 && result.dcr < 1.0);
    // Head shear is recovered exactly from the boundary condition.
    assert_abs_diff_eq!(result.shear[0], 1500.0, epsilon = 1.0);
    assert_abs_diff_eq!(result.moment[0], 6000.0 * 12.0, epsilon = 50.0);
    assert_eq!(result.py_curves.len(), 5);
    for v in result.deflection.iter().chain(&result.moment) {
        assert!(v.is_finite());
    }
}

#[test]
fn test_small_load_linearity() {
    let profile = medium_sand(15.0);
    let section = get_section("W6x9").unwrap();
    let run = |h: f64, m: f64| {
        lateral_analysis(
            &profile,
            &section,
            10.0,
            BendingAxis::Strong,
            h,
            m,
            HeadCondition::Free,
            false,
            None,
        )
        .unwrap()
    };
    let r1 = run(1.0, 2.0);
    let r2 = run(2.0, 4.0);
    assert!((r2.y_ground / r1.y_ground - 2.0).abs() < 0.01);
    assert!((r2.m_max / r1.m_max - 2.0).abs() < 0.01);
    for i in (0..r1.deflection.len()).step_by(10) {
        if r1.deflection[i].abs() > 1e-9 {
            assert!((r2.deflection[i] / r1.deflection[i] - 2.0).abs() < 0.015);
        }
    }
}

#[test]
fn test_repeat_run_is_deterministic_and_converged() {
    let profile = medium_sand(15.0);
    let section = get_section("W6x9").unwrap();
    let run = || {
        lateral_analysis(
            &profile,
            &section,
            10.0,
            BendingAxis::Strong,
            1500.0,
            6000.0,
            HeadCondition::Free,
            false,
            None,
        )
        .unwrap()
    };
    let a = run();
    let b = run();
    assert!(a.converged && b.converged);
    assert_eq!(a.iterations, b.iterations);
    assert_abs_diff_eq!(a.y_ground, b.y_ground, epsilon = 1e-12);
    assert_abs_diff_eq!(a.m_max, b.m_max, epsilon = 1e-9);
}

#[test]
fn test_soft_clay_deflects_more_than_sand() {
    let section = get_section("W6x9").unwrap();
    let sand = lateral_analysis(
        &medium_sand(15.0),
        &section,
        10.0,
        BendingAxis::Strong,
        1500.0,
        6000.0,
        HeadCondition::Free,
        false,
        None,
    )
    .unwrap();
    let clay = lateral_analysis(
        &soft_clay(15.0),
        &section,
        10.0,
        BendingAxis::Strong,
        2000.0,
        6000.0,
        HeadCondition::Free,
        false,
        None,
    )
    .unwrap();
    assert!(clay.converged);
    assert!(clay.y_ground > sand.y_ground);
    assert!(clay.dcr > 0.0);
}

#[test]
fn test_fixed_head_restrains_rotation_and_deflection() {
    let profile = medium_sand(15.0);
    let section = get_section("W6x9").unwrap();
    let free = lateral_analysis(
        &profile,
        &section,
        10.0,
        BendingAxis::Strong,
        1500.0,
        0.0,
        HeadCondition::Free,
        false,
        None,
    )
    .unwrap();
    let fixed = lateral_analysis(
        &profile,
        &section,
        10.0,
        BendingAxis::Strong,
        1500.0,
        0.0,
        HeadCondition::Fixed,
        false,
        None,
    )
    .unwrap();
    assert!(fixed.y_ground < free.y_ground);
    assert_abs_diff_eq!(fixed.slope[0], 0.0, epsilon = 1e-9);
}

#[test]
fn test_split_layer_profile_matches_single_layer() {
    let section = get_section("W6x9").unwrap();
    let single = medium_sand(15.0);

    let mut top = SoilLayer::new(SoilType::Sand, 6.0);
    top.n_spt = Some(15.0);
    let mut bottom = SoilLayer::new(SoilType::Sand, 9.0);
    bottom.n_spt = Some(15.0);
    let split = SoilProfile::new(vec![top, bottom], None).unwrap();

    let run = |p: &SoilProfile| {
        lateral_analysis(
            p,
            &section,
            10.0,
            BendingAxis::Strong,
            1500.0,
            6000.0,
            HeadCondition::Free,
            false,
            None,
        )
        .unwrap()
    };
    let a = run(&single);
    let b = run(&split);
    assert_abs_diff_eq!(a.y_ground, b.y_ground, epsilon = 1e-8);
    assert_abs_diff_eq!(a.m_max, b.m_max, epsilon = 1e-4);
}

#[test]
fn test_cyclic_flag_is_noop_without_cyclic_sensitive_models() {
    // Reese sand ignores the cyclic flag entirely.
    let section = get_section("W6x9").unwrap();
    let mut sand = SoilLayer::new(SoilType::Sand, 15.0);
    sand.n_spt = Some(15.0);
    sand.py_model = PYModel::ReeseSand;
    let profile = SoilProfile::new(vec![sand], None).unwrap();

    let run = |cyclic: bool| {
        lateral_analysis(
            &profile,
            &section,
            10.0,
            BendingAxis::Strong,
            1500.0,
            6000.0,
            HeadCondition::Free,
            cyclic,
            None,
        )
        .unwrap()
    };
    assert_abs_diff_eq!(run(true).y_ground, run(false).y_ground, epsilon = 1e-12);
}

#[test]
fn test_cancelled_analysis_returns_best_iterate() {
    let profile = medium_sand(15.0);
    let section = get_section("W6x9").unwrap();
    let flag = CancelFlag::new();
    flag.cancel();
    let result = lateral_analysis(
        &profile,
        &section,
        10.0,
        BendingAxis::Strong,
        1500.0,
        6000.0,
        HeadCondition::Free,
        false,
        Some(&flag),
    )
    .unwrap();
    // Cancelled after the first iteration unless it already converged.
    assert!(result.notes.iter().any(|n| n.contains("cancelled")) || result.converged);
    assert!(result.y_ground.is_finite());
}

#[test]
fn test_embedment_beyond_profile_is_rejected() {
    let profile = medium_sand(8.0);
    let section = get_section("W6x9").unwrap();
    assert!(
        lateral_analysis(
            &profile,
            &section,
            10.0,
            BendingAxis::Strong,
            1500.0,
            0.0,
            HeadCondition::Free,
            false,
            None,
        )
        .is_err()
    );
}
