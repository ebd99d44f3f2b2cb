use approx::assert_abs_diff_eq;
use pilerust::analysis::load_combinations;
use pilerust::enums::CombinationMethod;
use pilerust::load_combinations::LoadCase;
use pilerust::models::loads::LoadInput;

fn find<'a>(cases: &'a [LoadCase], prefix: &str) -> &'a LoadCase {
    cases
        .iter()
        .find(|c| c.name.starts_with(prefix))
        .unwrap_or_else(|| panic!("case '{}' not found", prefix))
}

#[test]
fn test_all_zero_inputs_give_all_zero_cases() {
    let set = load_combinations(&LoadInput::default(), CombinationMethod::Both).unwrap();
    for case in set.lrfd.unwrap().iter().chain(set.asd.unwrap().iter()) {
        assert_eq!(case.v_comp, 0.0);
        assert_eq!(case.v_tens, 0.0);
        assert_eq!(case.h_lat, 0.0);
        assert_eq!(case.m_ground, 0.0);
    }
}

#[test]
fn test_dead_only_14d_governs_compression() {
    let loads = LoadInput {
        dead: 1000.0,
        ..Default::default()
    };
    let set = load_combinations(&loads, CombinationMethod::Lrfd).unwrap();
    let lrfd = set.lrfd.unwrap();
    assert!(set.asd.is_none());

    let max_case = lrfd
        .iter()
        .max_by(|a, b| a.v_comp.total_cmp(&b.v_comp))
        .unwrap();
    assert!(max_case.name.starts_with("1.4D"));
    assert_abs_diff_eq!(max_case.v_comp, 1400.0, epsilon = 1e-9);
    assert!(max_case.name.ends_with("(governs compression)"));
    // Strict maximum: every other case factors D at 1.2 or below.
    for case in lrfd.iter().filter(|c| !c.name.starts_with("1.4D")) {
        assert!(case.v_comp < 1400.0);
    }
}

#[test]
fn test_solar_uplift_scenario() {
    // D = 400, W_up = 1500, W_lateral = 1500, lever arm 4 ft.
    let loads = LoadInput {
        dead: 400.0,
        wind_up: 1500.0,
        wind_lateral: 1500.0,
        lever_arm: 4.0,
        ..Default::default()
    };
    let set = load_combinations(&loads, CombinationMethod::Both).unwrap();
    let lrfd = set.lrfd.unwrap();
    let asd = set.asd.unwrap();

    let uplift = find(&lrfd, "0.9D + 1.0W (UPLIFT)");
    assert_abs_diff_eq!(uplift.v_tens, 1500.0 - 0.9 * 400.0, epsilon = 1e-9);
    assert_abs_diff_eq!(uplift.v_comp, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(uplift.h_lat, 1500.0, epsilon = 1e-9);
    assert_abs_diff_eq!(uplift.m_ground, 6000.0, epsilon = 1e-9);
    assert!(uplift.name.contains("(governs uplift)"));

    let asd_uplift = find(&asd, "0.6D + 0.6W");
    assert_abs_diff_eq!(
        asd_uplift.v_tens,
        0.6 * 1500.0 - 0.6 * 400.0,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(asd_uplift.h_lat, 900.0, epsilon = 1e-9);
    assert_abs_diff_eq!(asd_uplift.m_ground, 3600.0, epsilon = 1e-9);
}

#[test]
fn test_case_counts_and_order() {
    let loads = LoadInput {
        dead: 500.0,
        live: 200.0,
        snow: 300.0,
        wind_down: 400.0,
        wind_up: 900.0,
        wind_lateral: 600.0,
        seismic_vertical: 150.0,
        seismic_lateral: 350.0,
        lever_arm: 3.0,
        ..Default::default()
    };
    let set = load_combinations(&loads, CombinationMethod::Both).unwrap();
    let lrfd = set.lrfd.unwrap();
    let asd = set.asd.unwrap();
    assert_eq!(lrfd.len(), 10);
    assert_eq!(asd.len(), 10);
    assert!(lrfd[0].name.starts_with("1.4D"));
    assert!(asd[0].name.starts_with('D'));
    // Exactly one of compression/tension is nonzero per case.
    for case in lrfd.iter().chain(asd.iter()) {
        assert!(case.v_comp == 0.0 || case.v_tens == 0.0);
    }
}

#[test]
fn test_wind_moment_adds_to_lever_arm_moment() {
    let loads = LoadInput {
        dead: 100.0,
        wind_up: 100.0,
        wind_lateral: 200.0,
        wind_moment: 500.0,
        lever_arm: 2.0,
        ..Default::default()
    };
    let set = load_combinations(&loads, CombinationMethod::Lrfd).unwrap();
    let lrfd = set.lrfd.unwrap();
    let case = find(&lrfd, "0.9D + 1.0W (UPLIFT)");
    // M = H·arm + factored wind moment.
    assert_abs_diff_eq!(case.m_ground, 200.0 * 2.0 + 500.0, epsilon = 1e-9);
}

#[test]
fn test_seismic_cases_carry_lateral_and_moment() {
    let loads = LoadInput {
        dead: 300.0,
        seismic_vertical: 100.0,
        seismic_lateral: 400.0,
        seismic_moment: 250.0,
        lever_arm: 3.0,
        ..Default::default()
    };
    let set = load_combinations(&loads, CombinationMethod::Asd).unwrap();
    let asd = set.asd.unwrap();
    let e_case = find(&asd, "D + 0.7E");
    assert_abs_diff_eq!(e_case.h_lat, 0.7 * 400.0, epsilon = 1e-9);
    assert_abs_diff_eq!(
        e_case.m_ground,
        0.7 * 400.0 * 3.0 + 0.7 * 250.0,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(e_case.v_comp, 300.0 + 0.7 * 100.0, epsilon = 1e-9);

    let uplift = find(&asd, "0.6D + 0.7E");
    assert_abs_diff_eq!(uplift.v_tens, 0.0_f64.max(0.7 * 100.0 - 180.0), epsilon = 1e-9);
}

#[test]
fn test_negative_inputs_rejected() {
    let loads = LoadInput {
        dead: -10.0,
        ..Default::default()
    };
    assert!(load_combinations(&loads, CombinationMethod::Both).is_err());
}
