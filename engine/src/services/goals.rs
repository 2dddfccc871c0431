//! Goals and settings service
//!
//! Goals are saved together from the settings screen and never one at a
//! time. Range limits for the sliders are the caller's job; here a goal only
//! has to be positive.

use fitness_tracker_shared::validation::{validate_step_goal, validate_water_goal};
use fitness_tracker_shared::{GoalConfig, ThemeMode};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::store::PreferencesRepository;

/// Service for user goals and the theme preference
#[derive(Clone)]
pub struct GoalsService {
    preferences: PreferencesRepository,
}

impl GoalsService {
    pub fn new(preferences: PreferencesRepository) -> Self {
        Self { preferences }
    }

    /// Last saved goals, or the defaults
    pub async fn goals(&self) -> EngineResult<GoalConfig> {
        Ok(self.preferences.goals().await?)
    }

    /// Validate and save both goals at once
    pub async fn save_goals(&self, step_goal: i64, water_goal_ml: i64) -> EngineResult<GoalConfig> {
        validate_step_goal(step_goal).map_err(EngineError::Validation)?;
        validate_water_goal(water_goal_ml).map_err(EngineError::Validation)?;

        let goals = GoalConfig {
            daily_step_goal: u32::try_from(step_goal)
                .map_err(|_| EngineError::Validation("Step goal too large".to_string()))?,
            daily_water_goal_ml: u32::try_from(water_goal_ml)
                .map_err(|_| EngineError::Validation("Water goal too large".to_string()))?,
        };
        self.preferences.save_goals(&goals).await?;

        info!(
            step_goal = goals.daily_step_goal,
            water_goal_ml = goals.daily_water_goal_ml,
            "Goals saved"
        );
        Ok(goals)
    }

    pub async fn theme_mode(&self) -> EngineResult<ThemeMode> {
        Ok(self.preferences.theme_mode().await?)
    }

    pub async fn set_theme_mode(&self, mode: ThemeMode) -> EngineResult<()> {
        self.preferences.set_theme_mode(mode).await?;
        info!(theme = %mode, "Theme mode saved");
        Ok(())
    }
}
