//! Typed access to the metric store
//!
//! Maps [`FitnessSnapshot`], [`GoalConfig`] and [`ThemeMode`] onto the raw
//! store keys. Values that are missing or have the wrong shape fall back to
//! their defaults instead of failing the caller.

use anyhow::Result;
use fitness_tracker_shared::{FitnessSnapshot, GoalConfig, ThemeMode};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{MetricKey, MetricStore, PrefValue};

/// Repository for today's totals, goals and the theme
#[derive(Clone)]
pub struct PreferencesRepository {
    store: Arc<dyn MetricStore>,
}

impl PreferencesRepository {
    pub fn new(store: Arc<dyn MetricStore>) -> Self {
        Self { store }
    }

    /// Load the persisted snapshot; a fresh install yields all zeros
    pub async fn load_snapshot(&self) -> Result<FitnessSnapshot> {
        Ok(FitnessSnapshot {
            step_count: self.read_count(MetricKey::Steps, 0).await?,
            calories_expended: self.read_measure(MetricKey::Calories).await?,
            distance_meters: self.read_measure(MetricKey::Distance).await?,
            water_intake_ml: self.read_count(MetricKey::Water, 0).await?,
        })
    }

    /// Persist the whole snapshot in one write
    pub async fn save_snapshot(&self, snapshot: &FitnessSnapshot) -> Result<()> {
        self.store
            .set_all(vec![
                (MetricKey::Steps, PrefValue::Int(i64::from(snapshot.step_count))),
                (MetricKey::Calories, PrefValue::Float(snapshot.calories_expended)),
                (MetricKey::Distance, PrefValue::Float(snapshot.distance_meters)),
                (MetricKey::Water, PrefValue::Int(i64::from(snapshot.water_intake_ml))),
            ])
            .await?;

        debug!(
            steps = snapshot.step_count,
            water_ml = snapshot.water_intake_ml,
            "Snapshot saved"
        );
        Ok(())
    }

    /// Saved goals, or the defaults for any goal never saved
    pub async fn goals(&self) -> Result<GoalConfig> {
        let defaults = GoalConfig::default();
        Ok(GoalConfig {
            daily_step_goal: self
                .read_goal(MetricKey::StepGoal, defaults.daily_step_goal)
                .await?,
            daily_water_goal_ml: self
                .read_goal(MetricKey::WaterGoal, defaults.daily_water_goal_ml)
                .await?,
        })
    }

    /// Save both goals together
    pub async fn save_goals(&self, goals: &GoalConfig) -> Result<()> {
        self.store
            .set_all(vec![
                (MetricKey::StepGoal, PrefValue::Int(i64::from(goals.daily_step_goal))),
                (
                    MetricKey::WaterGoal,
                    PrefValue::Int(i64::from(goals.daily_water_goal_ml)),
                ),
            ])
            .await
    }

    pub async fn theme_mode(&self) -> Result<ThemeMode> {
        let Some(value) = self.store.get(MetricKey::ThemeMode).await? else {
            return Ok(ThemeMode::default());
        };

        match value.as_text().map(str::parse::<ThemeMode>) {
            Some(Ok(mode)) => Ok(mode),
            _ => {
                warn!(value = ?value, "Unreadable theme mode, using default");
                Ok(ThemeMode::default())
            }
        }
    }

    pub async fn set_theme_mode(&self, mode: ThemeMode) -> Result<()> {
        self.store
            .set(MetricKey::ThemeMode, PrefValue::Text(mode.as_str().to_string()))
            .await
    }

    async fn read_count(&self, key: MetricKey, default: u32) -> Result<u32> {
        let Some(value) = self.store.get(key).await? else {
            return Ok(default);
        };

        match value.as_int().and_then(|v| u32::try_from(v).ok()) {
            Some(count) => Ok(count),
            None => {
                warn!(%key, value = ?value, "Unreadable stored count, using default");
                Ok(default)
            }
        }
    }

    async fn read_measure(&self, key: MetricKey) -> Result<f64> {
        let Some(value) = self.store.get(key).await? else {
            return Ok(0.0);
        };

        match value.as_float() {
            Some(measure) if measure.is_finite() && measure >= 0.0 => Ok(measure),
            _ => {
                warn!(%key, value = ?value, "Unreadable stored measure, using 0");
                Ok(0.0)
            }
        }
    }

    async fn read_goal(&self, key: MetricKey, default: u32) -> Result<u32> {
        let goal = self.read_count(key, default).await?;
        if goal == 0 {
            warn!(%key, "Stored goal is zero, using default");
            return Ok(default);
        }
        Ok(goal)
    }
}
