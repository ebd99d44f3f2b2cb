use approx::assert_abs_diff_eq;
use pilerust::error::PileError;
use pilerust::helper::interp1d;

const KNOTS: [f64; 4] = [1.0, 2.0, 4.0, 8.0];
const VALUES: [f64; 4] = [10.0, 20.0, 40.0, 80.0];

#[test]
fn test_interpolates_between_knots() {
    assert_abs_diff_eq!(interp1d(&KNOTS, &VALUES, 3.0).unwrap(), 30.0, epsilon = 1e-12);
    assert_abs_diff_eq!(interp1d(&KNOTS, &VALUES, 6.0).unwrap(), 60.0, epsilon = 1e-12);
    // Exact knots return the tabulated value.
    assert_abs_diff_eq!(interp1d(&KNOTS, &VALUES, 2.0).unwrap(), 20.0, epsilon = 1e-12);
}

#[test]
fn test_clamps_beyond_the_table() {
    assert_eq!(interp1d(&KNOTS, &VALUES, 0.0).unwrap(), 10.0);
    assert_eq!(interp1d(&KNOTS, &VALUES, 100.0).unwrap(), 80.0);
}

#[test]
fn test_rejects_non_finite_query() {
    assert!(matches!(
        interp1d(&KNOTS, &VALUES, f64::NAN),
        Err(PileError::InvalidInput { .. })
    ));
    assert!(interp1d(&KNOTS, &VALUES, f64::INFINITY).is_err());
}

#[test]
fn test_rejects_malformed_table() {
    assert!(interp1d(&[], &[], 1.0).is_err());
    assert!(interp1d(&KNOTS, &VALUES[..3], 1.0).is_err());
}
