//! Fitness Tracker Engine
//!
//! Runs the aggregation core from `fitness_tracker_shared` against real
//! collaborators: a sensor [`sources::SampleSource`] and a local
//! [`store::MetricStore`].
//!
//! ## Architecture
//!
//! - Sources: time-bucketed sensor samples
//! - Store: key-value persistence of today's totals, goals and theme
//! - Services: refresh sequencing, water tracking, history, goals, dashboard
//! - State: dependency wiring

pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod state;
pub mod store;

pub use error::{EngineError, EngineResult, Recovery};
pub use state::AppState;
