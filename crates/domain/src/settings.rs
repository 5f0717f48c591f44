use std::collections::BTreeMap;

use crate::{MuscleGroup, ReadError, UpdateError};

pub const DEFAULT_WEEKLY_SET_GOAL: u32 = 15;
pub const DEFAULT_REST_TIME: u32 = 90;

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Option<UserSettings>, ReadError>;
    /// Single row per user, upsert. Both fields are resent together on every
    /// change.
    async fn save_settings(&self, settings: UserSettings) -> Result<(), UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<UserSettings, ReadError>;
    async fn save_settings(&self, settings: UserSettings) -> Result<(), UpdateError>;
}

/// Created lazily with defaults the first time it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSettings {
    pub volume_goals: BTreeMap<MuscleGroup, u32>,
    /// Rest duration in seconds, consumed by the collaborator-owned timer.
    pub default_rest_time: u32,
}

impl UserSettings {
    #[must_use]
    pub fn volume_goal(&self, muscle_group: MuscleGroup) -> u32 {
        self.volume_goals
            .get(&muscle_group)
            .copied()
            .unwrap_or(DEFAULT_WEEKLY_SET_GOAL)
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            volume_goals: BTreeMap::new(),
            default_rest_time: DEFAULT_REST_TIME,
        }
    }
}
