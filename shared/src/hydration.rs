//! Manual water intake tracking
//!
//! Water is the only snapshot field changed outside a sensor refresh. Each
//! change reports whether it crossed the daily goal so the caller can show
//! the congratulation exactly once.

use serde::Serialize;

/// Amount added or removed per tap, in ml
pub const WATER_STEP_ML: u32 = 250;

/// Result of changing today's water intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaterChange {
    pub previous_ml: u32,
    pub current_ml: u32,
    /// True only when this change moved intake from below the goal to at or above it
    pub goal_crossed: bool,
}

/// Apply a signed change to the current intake
///
/// Decrements stop at zero. Only an increment can cross the goal.
pub fn apply_water_delta(current_ml: u32, delta_ml: i32, goal_ml: u32) -> WaterChange {
    let next_ml = if delta_ml >= 0 {
        current_ml.saturating_add(delta_ml.unsigned_abs())
    } else {
        current_ml.saturating_sub(delta_ml.unsigned_abs())
    };

    WaterChange {
        previous_ml: current_ml,
        current_ml: next_ml,
        goal_crossed: delta_ml > 0 && current_ml < goal_ml && next_ml >= goal_ml,
    }
}

/// Add one step of water
pub fn increment(current_ml: u32, step_ml: u32, goal_ml: u32) -> WaterChange {
    apply_water_delta(current_ml, step_to_delta(step_ml), goal_ml)
}

/// Remove one step of water
pub fn decrement(current_ml: u32, step_ml: u32, goal_ml: u32) -> WaterChange {
    apply_water_delta(current_ml, -step_to_delta(step_ml), goal_ml)
}

fn step_to_delta(step_ml: u32) -> i32 {
    i32::try_from(step_ml).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crossing_fires_once() {
        let first = apply_water_delta(1800, 250, 2000);
        assert_eq!(first.current_ml, 2050);
        assert!(first.goal_crossed);

        let second = apply_water_delta(first.current_ml, 250, 2000);
        assert_eq!(second.current_ml, 2300);
        assert!(!second.goal_crossed);
    }

    #[test]
    fn test_decrement_never_fires() {
        let change = apply_water_delta(2050, -250, 2000);
        assert_eq!(change.current_ml, 1800);
        assert!(!change.goal_crossed);
    }

    #[test]
    fn test_landing_exactly_on_goal_crosses() {
        assert!(increment(1750, WATER_STEP_ML, 2000).goal_crossed);
    }

    #[test]
    fn test_decrement_clamps_at_zero() {
        let change = decrement(100, WATER_STEP_ML, 2000);
        assert_eq!(change.previous_ml, 100);
        assert_eq!(change.current_ml, 0);
    }

    #[test]
    fn test_recrossing_after_dropping_below() {
        let down = decrement(2050, WATER_STEP_ML, 2000);
        assert!(!down.goal_crossed);
        let up = increment(down.current_ml, WATER_STEP_ML, 2000);
        assert!(up.goal_crossed);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: a run of increments crosses the goal at most once
        #[test]
        fn prop_single_crossing_per_climb(
            start in 0u32..1000,
            goal in 1u32..5000,
            taps in 1usize..40
        ) {
            let mut water = start;
            let mut crossings = 0;
            for _ in 0..taps {
                let change = increment(water, WATER_STEP_ML, goal);
                if change.goal_crossed {
                    crossings += 1;
                }
                water = change.current_ml;
            }
            prop_assert!(crossings <= 1);
            prop_assert_eq!(crossings == 1, start < goal && water >= goal);
        }

        /// Property: decrements never report a crossing
        #[test]
        fn prop_decrement_never_crosses(current in 0u32..10_000, goal in 1u32..5000) {
            prop_assert!(!decrement(current, WATER_STEP_ML, goal).goal_crossed);
        }
    }
}
