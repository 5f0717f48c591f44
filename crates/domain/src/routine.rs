use std::collections::BTreeMap;

use derive_more::Deref;
use uuid::Uuid;

use crate::{DeleteError, ExerciseID, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait RoutineRepository {
    async fn read_routines(&self) -> Result<Vec<Routine>, ReadError>;
    /// Upsert by id, full replace of the given routines.
    async fn save_routines(&self, routines: Vec<Routine>) -> Result<(), UpdateError>;
    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait RoutineService {
    async fn get_routines(&self) -> Result<Vec<Routine>, ReadError>;
    async fn save_routines(&self, routines: Vec<Routine>) -> Result<(), UpdateError>;
    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub id: RoutineID,
    pub name: Name,
    pub exercise_ids: Vec<ExerciseID>,
    /// A target entry for an exercise no longer in the routine is harmless
    /// and ignored.
    pub targets: BTreeMap<ExerciseID, SetTarget>,
}

impl Routine {
    /// Target configuration for an exercise, falling back to the shared
    /// default for absent entries.
    #[must_use]
    pub fn target(&self, exercise_id: ExerciseID) -> SetTarget {
        self.targets.get(&exercise_id).copied().unwrap_or_default()
    }

    pub fn add_exercise(&mut self, exercise_id: ExerciseID) {
        if !self.exercise_ids.contains(&exercise_id) {
            self.exercise_ids.push(exercise_id);
        }
    }

    pub fn remove_exercise(&mut self, exercise_id: ExerciseID) {
        self.exercise_ids.retain(|id| *id != exercise_id);
    }

    pub fn set_target(&mut self, exercise_id: ExerciseID, target: SetTarget) {
        self.targets.insert(exercise_id, target);
    }

    pub fn rename(&mut self, name: Name) {
        self.name = name;
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoutineID(Uuid);

impl RoutineID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for RoutineID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for RoutineID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Planned sets and reps for one exercise. The default is the single shared
/// policy for both the routine-driven and the ad-hoc session paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetTarget {
    pub sets: u32,
    pub reps: u32,
}

impl Default for SetTarget {
    fn default() -> Self {
        Self { sets: 3, reps: 10 }
    }
}
