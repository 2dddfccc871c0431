//! Engine services
//!
//! Services coordinate the sample source and the metric store around the
//! pure aggregation core in `fitness_tracker_shared`.

pub mod dashboard;
pub mod goals;
pub mod history;
pub mod tracker;

pub use dashboard::DashboardService;
pub use goals::GoalsService;
pub use history::HistoryService;
pub use tracker::{RefreshOutcome, TrackerService};
