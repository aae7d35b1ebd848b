//! Goal completion progress.

/// Percent of `target` reached, capped at 100 and rounded to one decimal.
///
/// A non-positive target has no meaningful progress and reports 0.
pub fn goal_progress(current: f64, target: f64) -> f64 {
    if target <= 0.0 || !target.is_finite() {
        return 0.0;
    }
    let percent = (current / target * 100.0).clamp(0.0, 100.0);
    (percent * 10.0).round() / 10.0
}
