//! Fitness Tracker Shared Library
//!
//! Pure domain logic shared by the engine and the WASM bindings: the data
//! model, step aggregation, goal progress and water intake tracking.

pub mod aggregation;
pub mod errors;
pub mod hydration;
pub mod models;
pub mod progress;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use aggregation::{
    compute_daily, compute_hourly, compute_today_snapshot, hour_label, week_start, WeeklySummary,
};
pub use errors::SourceError;
pub use hydration::{apply_water_delta, WaterChange, WATER_STEP_ML};
pub use models::*;
pub use progress::progress;
pub use types::{DashboardSummary, DayHistoryView, HistoryView, HourView};
pub use units::{DistanceUnit, EnergyUnit};
