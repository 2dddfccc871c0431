//! Fitness Tracker WASM Module
//!
//! WebAssembly bindings so a browser dashboard can run the same aggregation
//! and progress rules as the engine. Structured values cross the boundary as
//! JSON strings.

use chrono::{Duration, NaiveDate};
use fitness_tracker_shared::aggregation::{compute_daily, heart_points, DAYS_PER_WEEK};
use fitness_tracker_shared::validation::{
    STEP_GOAL_SLIDER, STEP_GOAL_SLIDER_STEP, WATER_GOAL_SLIDER, WATER_GOAL_SLIDER_STEP,
};
use fitness_tracker_shared::{
    apply_water_delta, DistanceUnit, EnergyUnit, HistoryView, RawBucketSample, WeeklySummary,
    WATER_STEP_ML,
};
use serde_json::json;
use wasm_bindgen::prelude::*;

/// Progress ratio in [0, 1] for a ring or bar
///
/// Values from JavaScript are unchecked, so a non-positive goal yields 0
/// instead of aborting the module.
#[wasm_bindgen]
pub fn step_progress(current: f64, goal: f64) -> f64 {
    if goal.is_nan() || goal <= 0.0 {
        return 0.0;
    }
    fitness_tracker_shared::progress(current, goal)
}

/// Aggregate day buckets into the week containing `week_start`
///
/// `samples_json` is an array of bucket samples with RFC 3339 start times;
/// `week_start` is an ISO date. Returns the week as JSON.
#[wasm_bindgen]
pub fn compute_week(samples_json: &str, week_start: &str, goal: u32) -> Result<String, String> {
    let samples: Vec<RawBucketSample> =
        serde_json::from_str(samples_json).map_err(|e| format!("Invalid samples: {}", e))?;
    let date = NaiveDate::parse_from_str(week_start, "%Y-%m-%d")
        .map_err(|e| format!("Invalid week start: {}", e))?;
    // The whole Monday..Sunday week around `date` must be representable
    let margin = Duration::days(DAYS_PER_WEEK - 1);
    if date.checked_sub_signed(margin).is_none() || date.checked_add_signed(margin).is_none() {
        return Err("Invalid week start: out of range".to_string());
    }

    let summary = WeeklySummary::from_days(compute_daily(&samples, date, goal));
    let view = HistoryView::from_week(fitness_tracker_shared::week_start(date), summary);

    serde_json::to_string(&view).map_err(|e| e.to_string())
}

/// Apply a water change and report whether it crossed the goal, as JSON
#[wasm_bindgen]
pub fn apply_water(current_ml: u32, delta_ml: i32, goal_ml: u32) -> String {
    let change = apply_water_delta(current_ml, delta_ml, goal_ml);
    serde_json::to_string(&change).unwrap_or_default()
}

/// Amount added or removed per water tap, in ml
#[wasm_bindgen]
pub fn water_step_ml() -> u32 {
    WATER_STEP_ML
}

/// Heart points for a step total
#[wasm_bindgen]
pub fn step_heart_points(steps: u32) -> u32 {
    u32::try_from(heart_points(u64::from(steps))).unwrap_or(u32::MAX)
}

/// Format a distance in meters for display, e.g. `"3.80 km"`
///
/// Unknown units fall back to kilometers.
#[wasm_bindgen]
pub fn format_distance(meters: f64, unit: &str) -> String {
    unit.parse::<DistanceUnit>()
        .unwrap_or_default()
        .format(meters)
}

/// Format an energy value in kcal for display, e.g. `"230 kcal"`
///
/// Unknown units fall back to kilocalories.
#[wasm_bindgen]
pub fn format_energy(kcal: f64, unit: &str) -> String {
    unit.parse::<EnergyUnit>().unwrap_or_default().format(kcal)
}

/// Clock label for an hour of the day, e.g. `"2 pm"`
#[wasm_bindgen]
pub fn hour_label(hour_of_day: u32) -> String {
    fitness_tracker_shared::hour_label(hour_of_day)
}

/// Ranges and increments for the goal settings sliders, as JSON
#[wasm_bindgen]
pub fn goal_sliders() -> String {
    json!({
        "steps": {
            "min": STEP_GOAL_SLIDER.start(),
            "max": STEP_GOAL_SLIDER.end(),
            "step": STEP_GOAL_SLIDER_STEP,
        },
        "water_ml": {
            "min": WATER_GOAL_SLIDER.start(),
            "max": WATER_GOAL_SLIDER.end(),
            "step": WATER_GOAL_SLIDER_STEP,
        },
    })
    .to_string()
}
