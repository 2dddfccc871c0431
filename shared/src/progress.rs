//! Goal progress calculations
//!
//! Ratios feeding the step ring and the hydration bar.

/// Fraction of `goal` reached, clamped to `[0.0, 1.0]`
///
/// A NaN `current` counts as no progress.
///
/// # Panics
///
/// Panics if `goal` is not strictly positive. Goals are validated when they
/// are saved, so a non-positive goal here is a programming error.
pub fn progress(current: f64, goal: f64) -> f64 {
    assert!(goal > 0.0, "progress goal must be positive, got {goal}");
    if current.is_nan() {
        return 0.0;
    }
    (current / goal).clamp(0.0, 1.0)
}

/// Amount still missing to reach the goal
pub fn remaining(current: f64, goal: f64) -> f64 {
    (goal - current).max(0.0)
}

/// Check if goal is met (>=100%)
pub fn is_goal_met(current: f64, goal: f64) -> bool {
    goal > 0.0 && current >= goal
}
