//! Input validation functions
//!
//! Goals are range-restricted by the settings sliders before they reach the
//! core; these checks only guard the invariants the core relies on.

use std::ops::RangeInclusive;

/// Step goal range offered by the settings slider
pub const STEP_GOAL_SLIDER: RangeInclusive<u32> = 2_000..=20_000;

/// Step goal slider increment
pub const STEP_GOAL_SLIDER_STEP: u32 = 1_000;

/// Water goal range offered by the settings slider, in ml
pub const WATER_GOAL_SLIDER: RangeInclusive<u32> = 1_000..=5_000;

/// Water goal slider increment, in ml
pub const WATER_GOAL_SLIDER_STEP: u32 = 250;

/// Largest single water change accepted, in ml
pub const MAX_WATER_STEP_ML: u32 = 5_000;

/// Validate a daily step goal
pub fn validate_step_goal(goal: i64) -> Result<(), String> {
    if goal <= 0 {
        return Err("Step goal must be greater than 0".to_string());
    }
    if goal > i64::from(u32::MAX) {
        return Err("Step goal too large".to_string());
    }
    Ok(())
}

/// Validate a daily water goal (in ml)
pub fn validate_water_goal(goal_ml: i64) -> Result<(), String> {
    if goal_ml <= 0 {
        return Err("Water goal must be greater than 0".to_string());
    }
    if goal_ml > i64::from(u32::MAX) {
        return Err("Water goal too large".to_string());
    }
    Ok(())
}

/// Validate the fixed amount added or removed per water tap (in ml)
pub fn validate_water_step(step_ml: u32) -> Result<(), String> {
    if step_ml == 0 {
        return Err("Water step must be greater than 0".to_string());
    }
    if step_ml > MAX_WATER_STEP_ML {
        return Err(format!("Water step cannot exceed {}ml", MAX_WATER_STEP_ML));
    }
    Ok(())
}

/// Validate a distance reported by a sensor bucket (in meters)
pub fn validate_distance_meters(distance: f64) -> Result<(), String> {
    if distance.is_nan() || distance.is_infinite() {
        return Err("Distance must be a valid number".to_string());
    }
    if distance < 0.0 {
        return Err("Distance cannot be negative".to_string());
    }
    Ok(())
}

/// Validate a calorie value reported by a sensor bucket
pub fn validate_calories(calories: f64) -> Result<(), String> {
    if calories.is_nan() || calories.is_infinite() {
        return Err("Calories must be a valid number".to_string());
    }
    if calories < 0.0 {
        return Err("Calories cannot be negative".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, true)]
    #[case(10_000, true)]
    #[case(0, false)]
    #[case(-500, false)]
    #[case(i64::from(u32::MAX) + 1, false)]
    fn test_step_goal(#[case] goal: i64, #[case] valid: bool) {
        assert_eq!(validate_step_goal(goal).is_ok(), valid);
    }

    #[rstest]
    #[case(2_000, true)]
    #[case(0, false)]
    #[case(-1, false)]
    fn test_water_goal(#[case] goal: i64, #[case] valid: bool) {
        assert_eq!(validate_water_goal(goal).is_ok(), valid);
    }

    #[test]
    fn test_water_step() {
        assert!(validate_water_step(250).is_ok());
        assert!(validate_water_step(0).is_err());
        assert!(validate_water_step(MAX_WATER_STEP_ML + 1).is_err());
    }

    #[test]
    fn test_sensor_values() {
        assert!(validate_distance_meters(3800.0).is_ok());
        assert!(validate_distance_meters(-1.0).is_err());
        assert!(validate_distance_meters(f64::NAN).is_err());
        assert!(validate_calories(230.0).is_ok());
        assert!(validate_calories(f64::INFINITY).is_err());
    }

    #[test]
    fn test_slider_defaults_within_range() {
        assert!(STEP_GOAL_SLIDER.contains(&crate::models::DEFAULT_STEP_GOAL));
        assert!(WATER_GOAL_SLIDER.contains(&crate::models::DEFAULT_WATER_GOAL_ML));
        let step_positions =
            (STEP_GOAL_SLIDER.end() - STEP_GOAL_SLIDER.start()) / STEP_GOAL_SLIDER_STEP;
        let water_positions =
            (WATER_GOAL_SLIDER.end() - WATER_GOAL_SLIDER.start()) / WATER_GOAL_SLIDER_STEP;
        assert_eq!(step_positions, 18);
        assert_eq!(water_positions, 16);
    }
}
