//! REST gateway against the row-store backend. Rows use snake_case columns;
//! entities are mapped through serde DTOs on the way in and out.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use liftlog_domain as domain;

pub struct Rest;

impl domain::ExerciseRepository for Rest {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let rows: Vec<ExerciseRow> =
            fetch(Request::get("api/exercises").build().unwrap()).await?;
        rows.into_iter().map(domain::Exercise::try_from).collect()
    }

    async fn save_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        fetch_no_content(
            Request::put(&format!("api/exercises/{}", *exercise.id))
                .json(&ExerciseRow::from(&exercise))
                .expect("serialization failed"),
            (),
        )
        .await?;
        Ok(exercise)
    }
}

impl domain::SetLogRepository for Rest {
    async fn read_sets(&self) -> Result<Vec<domain::SetLog>, domain::ReadError> {
        let rows: Vec<SetLogRow> = fetch(Request::get("api/sets").build().unwrap()).await?;
        Ok(rows.into_iter().map(domain::SetLog::from).collect())
    }

    async fn append_sets(&self, sets: Vec<domain::SetLog>) -> Result<(), domain::CreateError> {
        Ok(fetch_no_content(
            Request::post("api/sets")
                .json(&sets.iter().map(SetLogRow::from).collect::<Vec<_>>())
                .expect("serialization failed"),
            (),
        )
        .await?)
    }
}

impl domain::RoutineRepository for Rest {
    async fn read_routines(&self) -> Result<Vec<domain::Routine>, domain::ReadError> {
        let rows: Vec<RoutineRow> = fetch(Request::get("api/routines").build().unwrap()).await?;
        rows.into_iter().map(domain::Routine::try_from).collect()
    }

    async fn save_routines(&self, routines: Vec<domain::Routine>) -> Result<(), domain::UpdateError> {
        Ok(fetch_no_content(
            Request::put("api/routines")
                .json(&routines.iter().map(RoutineRow::from).collect::<Vec<_>>())
                .expect("serialization failed"),
            (),
        )
        .await?)
    }

    async fn delete_routine(
        &self,
        id: domain::RoutineID,
    ) -> Result<domain::RoutineID, domain::DeleteError> {
        Ok(fetch_no_content(
            Request::delete(&format!("api/routines/{}", *id))
                .build()
                .unwrap(),
            id,
        )
        .await?)
    }
}

impl domain::SettingsRepository for Rest {
    async fn read_settings(&self) -> Result<Option<domain::UserSettings>, domain::ReadError> {
        let row: Option<SettingsRow> = fetch(Request::get("api/settings").build().unwrap()).await?;
        Ok(row.map(domain::UserSettings::from))
    }

    async fn save_settings(&self, settings: domain::UserSettings) -> Result<(), domain::UpdateError> {
        Ok(fetch_no_content(
            Request::put("api/settings")
                .json(&SettingsRow::from(&settings))
                .expect("serialization failed"),
            (),
        )
        .await?)
    }
}

impl domain::AuthRepository for Rest {
    async fn current_user(&self) -> Result<Option<domain::User>, domain::ReadError> {
        let row: Option<UserRow> = fetch(Request::get("api/session").build().unwrap()).await?;
        Ok(row.map(domain::User::from))
    }

    async fn sign_out(&self) -> Result<(), domain::DeleteError> {
        Ok(fetch_no_content(Request::delete("api/session").build().unwrap(), ()).await?)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct ExerciseRow {
    id: Uuid,
    name: String,
    muscle_group: String,
    reference_weight: f32,
}

impl TryFrom<ExerciseRow> for domain::Exercise {
    type Error = domain::ReadError;

    fn try_from(row: ExerciseRow) -> Result<Self, Self::Error> {
        Ok(domain::Exercise {
            id: row.id.into(),
            name: domain::Name::new(&row.name)
                .map_err(|err| domain::ReadError::Other(err.into()))?,
            muscle_group: domain::MuscleGroup::try_from(row.muscle_group.as_str())
                .map_err(|err| domain::ReadError::Other(err.into()))?,
            reference_weight: row.reference_weight,
        })
    }
}

impl From<&domain::Exercise> for ExerciseRow {
    fn from(exercise: &domain::Exercise) -> Self {
        Self {
            id: *exercise.id,
            name: exercise.name.to_string(),
            muscle_group: exercise.muscle_group.name().to_string(),
            reference_weight: exercise.reference_weight,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct SetLogRow {
    id: Uuid,
    exercise_id: Uuid,
    date: DateTime<Utc>,
    weight: f32,
    reps: u32,
    target_reps: u32,
    completed: bool,
}

impl From<SetLogRow> for domain::SetLog {
    fn from(row: SetLogRow) -> Self {
        domain::SetLog {
            id: row.id.into(),
            exercise_id: row.exercise_id.into(),
            date: row.date,
            weight: row.weight,
            reps: row.reps,
            target_reps: row.target_reps,
            completed: row.completed,
        }
    }
}

impl From<&domain::SetLog> for SetLogRow {
    fn from(set: &domain::SetLog) -> Self {
        Self {
            id: *set.id,
            exercise_id: *set.exercise_id,
            date: set.date,
            weight: set.weight,
            reps: set.reps,
            target_reps: set.target_reps,
            completed: set.completed,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct RoutineRow {
    id: Uuid,
    name: String,
    #[serde(default)]
    exercise_ids: Vec<Uuid>,
    #[serde(default)]
    targets: BTreeMap<Uuid, SetTargetRow>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
struct SetTargetRow {
    sets: u32,
    reps: u32,
}

impl TryFrom<RoutineRow> for domain::Routine {
    type Error = domain::ReadError;

    fn try_from(row: RoutineRow) -> Result<Self, Self::Error> {
        Ok(domain::Routine {
            id: row.id.into(),
            name: domain::Name::new(&row.name)
                .map_err(|err| domain::ReadError::Other(err.into()))?,
            exercise_ids: row.exercise_ids.into_iter().map(Into::into).collect(),
            targets: row
                .targets
                .into_iter()
                .map(|(id, target)| {
                    (
                        id.into(),
                        domain::SetTarget {
                            sets: target.sets,
                            reps: target.reps,
                        },
                    )
                })
                .collect(),
        })
    }
}

impl From<&domain::Routine> for RoutineRow {
    fn from(routine: &domain::Routine) -> Self {
        Self {
            id: *routine.id,
            name: routine.name.to_string(),
            exercise_ids: routine.exercise_ids.iter().map(|id| **id).collect(),
            targets: routine
                .targets
                .iter()
                .map(|(id, target)| {
                    (
                        **id,
                        SetTargetRow {
                            sets: target.sets,
                            reps: target.reps,
                        },
                    )
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct SettingsRow {
    #[serde(default)]
    volume_goals: BTreeMap<String, u32>,
    default_rest_time: u32,
}

impl From<SettingsRow> for domain::UserSettings {
    fn from(row: SettingsRow) -> Self {
        domain::UserSettings {
            // Goals for muscle groups that are no longer part of the
            // enumeration are dropped.
            volume_goals: row
                .volume_goals
                .iter()
                .filter_map(|(muscle_group, goal)| {
                    domain::MuscleGroup::try_from(muscle_group.as_str())
                        .ok()
                        .map(|m| (m, *goal))
                })
                .collect(),
            default_rest_time: row.default_rest_time,
        }
    }
}

impl From<&domain::UserSettings> for SettingsRow {
    fn from(settings: &domain::UserSettings) -> Self {
        Self {
            volume_goals: settings
                .volume_goals
                .iter()
                .map(|(muscle_group, goal)| (muscle_group.name().to_string(), *goal))
                .collect(),
            default_rest_time: settings.default_rest_time,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct UserRow {
    id: Uuid,
    email: String,
}

impl From<UserRow> for domain::User {
    fn from(row: UserRow) -> Self {
        domain::User {
            id: row.id.into(),
            email: row.email,
        }
    }
}

pub(crate) async fn fetch<T>(request: Request) -> Result<T, domain::StorageError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    match request.send().await {
        Ok(response) => {
            if response.ok() {
                match response.json::<T>().await {
                    Ok(data) => Ok(data),
                    Err(error) => Err(domain::StorageError::Other(
                        format!("deserialization failed: {error:?}").into(),
                    )),
                }
            } else if response.status() == 401 {
                Err(domain::StorageError::NoSession)
            } else {
                Err(domain::StorageError::Other(
                    format!("{} {}", response.status(), response.status_text()).into(),
                ))
            }
        }
        Err(_) => Err(domain::StorageError::NoConnection),
    }
}

pub(crate) async fn fetch_no_content<T>(
    request: Request,
    result: T,
) -> Result<T, domain::StorageError> {
    match request.send().await {
        Ok(response) => {
            if response.ok() {
                Ok(result)
            } else if response.status() == 401 {
                Err(domain::StorageError::NoSession)
            } else {
                Err(domain::StorageError::Other(
                    format!("{} {}", response.status(), response.status_text()).into(),
                ))
            }
        }
        Err(_) => Err(domain::StorageError::NoConnection),
    }
}
