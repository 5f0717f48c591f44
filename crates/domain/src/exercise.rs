use derive_more::Deref;
use uuid::Uuid;

use crate::{MuscleGroup, Name, ReadError, UpdateError, ValidationError};

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn save_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn save_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;

    async fn validate_exercise_name(
        &self,
        name: &str,
        id: ExerciseID,
    ) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_exercises().await {
                Ok(exercises) => {
                    if exercises
                        .iter()
                        .all(|e| e.id == id || !e.name.matches(name.as_ref()))
                    {
                        Ok(name)
                    } else {
                        Err(ValidationError::Conflict("name".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub muscle_group: MuscleGroup,
    /// Current working weight used to seed new sets. Updated exclusively on
    /// session completion.
    pub reference_weight: f32,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
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

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Case-insensitive lookup, used to deduplicate names coming from user input
/// or the advisory gateway.
#[must_use]
pub fn find_exercise<'a>(exercises: &'a [Exercise], name: &str) -> Option<&'a Exercise> {
    exercises.iter().find(|e| e.name.matches(name))
}
