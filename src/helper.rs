use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{PileError, PileResult};

/// Linear interpolation over a sorted knot table, clamping beyond the
/// covered range.
///
/// # Arguments
/// * `knots` - Sorted abscissas.
/// * `values` - Ordinates, one per knot.
/// * `x` - Query abscissa.
///
/// # Returns
/// * The interpolated (or clamped) value, or `InvalidInput` for a
///   non-finite query or a malformed table.
pub fn interp1d(knots: &[f64], values: &[f64], x: f64) -> PileResult<f64> {
    if knots.is_empty() || knots.len() != values.len() {
        return Err(PileError::invalid_input(
            "interp.table_shape",
            "Interpolation table needs one value per knot.",
        ));
    }
    if !x.is_finite() {
        return Err(PileError::invalid_input(
            "interp.query_not_finite",
            "Interpolation query must be a finite number.",
        ));
    }

    let hi = knots.partition_point(|&k| k < x);
    if hi == 0 {
        return Ok(values[0]);
    }
    if hi == knots.len() {
        return Ok(values[knots.len() - 1]);
    }

    let span = knots[hi] - knots[hi - 1];
    if span <= f64::EPSILON {
        return Ok(values[hi]);
    }
    let t = (x - knots[hi - 1]) / span;
    Ok(values[hi - 1] + t * (values[hi] - values[hi - 1]))
}

/// Scoped note buffer carried through a single analysis call.
///
/// Notes flag method overrides, cap saturations and numeric floors; they
/// are informational and never abort an analysis.
#[derive(Debug, Default, Clone)]
pub struct Notes {
    entries: Vec<String>,
}

impl Notes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, note: impl Into<String>) {
        self.entries.push(note.into());
    }

    /// Records a note only the first time the exact text occurs, so a
    /// floor hit inside a solver loop is reported once per analysis.
    pub fn push_once(&mut self, note: impl Into<String>) {
        let note = note.into();
        if !self.entries.iter().any(|n| *n == note) {
            self.entries.push(note);
        }
    }

    pub fn extend(&mut self, other: Notes) {
        self.entries.extend(other.entries);
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}

/// Caller-supplied cancellation flag polled between solver iterations.
///
/// Cancellation is non-fatal: the solver returns its best iterate with
/// `converged = false`, analogous to hitting the iteration budget.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
