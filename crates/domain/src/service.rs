use std::collections::BTreeMap;

use chrono::Utc;
use log::{debug, error, warn};

use crate::{
    AdvisoryRepository, AdvisoryService, Alternative, AuthRepository, AuthService, CreateError,
    DeleteError, Exercise, ExerciseClassification, ExerciseID, ExerciseRepository, ExerciseService,
    FALLBACK_COACH_INSIGHT, GENERIC_FORM_TIPS, Name, ReadError, Routine, RoutineDraft, RoutineID,
    RoutineRepository, RoutineService, Session, SetLog, SetLogRepository, SetLogService,
    SettingsRepository, SettingsService, UpdateError, User, UserSettings, WeeklyVolume, catalog,
    find_exercise, resolve_session,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

/// One in-memory snapshot per load cycle. Concurrent edits act on
/// independent copies reconciled only by the next full reload.
#[derive(Debug, Clone, PartialEq)]
pub struct UserData {
    pub exercises: Vec<Exercise>,
    pub sets: Vec<SetLog>,
    pub routines: Vec<Routine>,
    pub settings: UserSettings,
}

impl UserData {
    #[must_use]
    pub fn exercise_map(&self) -> BTreeMap<ExerciseID, Exercise> {
        self.exercises.iter().map(|e| (e.id, e.clone())).collect()
    }
}

/// What happened while persisting a finished session. Reference-weight
/// updates are best effort per exercise; failures are reported, not retried.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReport {
    pub updated_exercises: Vec<Exercise>,
    pub failed_updates: Vec<ExerciseID>,
    pub persisted_sets: usize,
}

impl<R> Service<R>
where
    R: ExerciseRepository + SetLogRepository + RoutineRepository + SettingsRepository,
{
    pub async fn load_user_data(&self) -> Result<UserData, ReadError> {
        let (exercises, sets, routines, settings) = futures_util::try_join!(
            self.repository.read_exercises(),
            self.repository.read_sets(),
            self.repository.read_routines(),
            self.repository.read_settings(),
        )?;
        Ok(UserData {
            exercises,
            sets,
            routines,
            settings: settings.unwrap_or_default(),
        })
    }
}

impl<R> Service<R>
where
    R: ExerciseRepository + RoutineRepository,
{
    /// Populates the starter catalog for a user whose exercise and routine
    /// lists are both empty. Calling it again once data exists returns the
    /// existing data unchanged and performs no writes.
    pub async fn seed_defaults(&self) -> Result<(Vec<Exercise>, Vec<Routine>), CreateError> {
        let exercises = self.repository.read_exercises().await?;
        let routines = self.repository.read_routines().await?;
        if !exercises.is_empty() || !routines.is_empty() {
            return Ok((exercises, routines));
        }

        let mut seeded_exercises = Vec::new();
        for entry in &catalog::EXERCISES {
            let exercise = Exercise {
                id: ExerciseID::random(),
                name: Name::new(entry.name).map_err(|err| CreateError::Other(err.into()))?,
                muscle_group: entry.muscle_group,
                reference_weight: entry.reference_weight,
            };
            seeded_exercises.push(self.repository.save_exercise(exercise).await?);
        }

        let mut seeded_routines = Vec::new();
        for entry in &catalog::ROUTINES {
            seeded_routines.push(Routine {
                id: RoutineID::random(),
                name: Name::new(entry.name).map_err(|err| CreateError::Other(err.into()))?,
                exercise_ids: entry
                    .exercise_names
                    .iter()
                    .filter_map(|name| find_exercise(&seeded_exercises, name).map(|e| e.id))
                    .collect(),
                targets: BTreeMap::new(),
            });
        }
        self.repository
            .save_routines(seeded_routines.clone())
            .await?;

        Ok((seeded_exercises, seeded_routines))
    }

    pub async fn start_session(&self, routine_id: RoutineID) -> Result<Session, ReadError> {
        let routines = self.repository.read_routines().await?;
        let routine = routines
            .iter()
            .find(|r| r.id == routine_id)
            .ok_or(ReadError::NotFound)?;
        let exercises = self
            .repository
            .read_exercises()
            .await?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();
        Ok(Session::from_routine(routine, &exercises, Utc::now()))
    }
}

impl<R> Service<R>
where
    R: ExerciseRepository + SetLogRepository,
{
    /// Reconciles a finished session: attempts every reference-weight
    /// update (a failure on one exercise never prevents the others, nor the
    /// set persistence), then appends the completed sets to history. The
    /// caller is expected to reload authoritative state after a successful
    /// return, before clearing the session.
    pub async fn finish_session(
        &self,
        session: &Session,
        exercises: &BTreeMap<ExerciseID, Exercise>,
    ) -> Result<CompletionReport, CreateError> {
        let outcome = resolve_session(session.sets(), exercises);

        let mut updated_exercises = Vec::new();
        let mut failed_updates = Vec::new();
        for exercise in outcome.exercise_updates {
            match self.repository.save_exercise(exercise.clone()).await {
                Ok(exercise) => updated_exercises.push(exercise),
                Err(err) => {
                    error!(
                        "failed to update reference weight of {}: {err}",
                        exercise.name
                    );
                    failed_updates.push(exercise.id);
                }
            }
        }

        let persisted_sets = outcome.sets_to_persist.len();
        self.repository.append_sets(outcome.sets_to_persist).await?;

        Ok(CompletionReport {
            updated_exercises,
            failed_updates,
            persisted_sets,
        })
    }
}

impl<R> Service<R>
where
    R: ExerciseRepository + AdvisoryRepository,
{
    /// Classifies free-text input and returns the matching exercise,
    /// creating it when the name is new. Matching is case-insensitive.
    pub async fn add_custom_exercise(&self, input: &str) -> Result<Exercise, CreateError> {
        let classification = self.classify_exercise(input).await;
        let exercises = self.repository.read_exercises().await?;
        if let Some(existing) = find_exercise(&exercises, &classification.name) {
            return Ok(existing.clone());
        }
        let name =
            Name::new(&classification.name).map_err(|err| CreateError::Other(err.into()))?;
        Ok(self
            .repository
            .save_exercise(Exercise {
                id: ExerciseID::random(),
                name,
                muscle_group: classification.muscle_group,
                reference_weight: classification.suggested_weight,
            })
            .await?)
    }

    /// Substitutes the exercise described by `input` for `old` on every set
    /// of the live session, completed ones included.
    pub async fn replace_session_exercise(
        &self,
        session: &mut Session,
        old: ExerciseID,
        input: &str,
    ) -> Result<Exercise, CreateError> {
        let replacement = self.add_custom_exercise(input).await?;
        session.replace_exercise(old, replacement.id, replacement.reference_weight);
        Ok(replacement)
    }
}

impl<R> Service<R>
where
    R: ExerciseRepository + RoutineRepository + AdvisoryRepository,
{
    /// Turns a synthesized routine draft into a persisted routine,
    /// resolving each drafted exercise against the catalog and creating the
    /// ones that are new.
    pub async fn create_generated_routine(&self, prompt: &str) -> Result<Routine, CreateError> {
        let draft = self.generate_routine_draft(prompt).await;
        let mut exercises = self.repository.read_exercises().await?;

        let mut exercise_ids = Vec::new();
        let mut targets = BTreeMap::new();
        for entry in &draft.exercises {
            let exercise = match find_exercise(&exercises, &entry.name) {
                Some(existing) => existing.clone(),
                None => {
                    let name = match Name::new(&entry.name) {
                        Ok(name) => name,
                        Err(err) => {
                            warn!("skipping drafted exercise: {err}");
                            continue;
                        }
                    };
                    let created = self
                        .repository
                        .save_exercise(Exercise {
                            id: ExerciseID::random(),
                            name,
                            muscle_group: entry.muscle_group,
                            reference_weight: entry.suggested_weight,
                        })
                        .await?;
                    exercises.push(created.clone());
                    created
                }
            };
            if !exercise_ids.contains(&exercise.id) {
                exercise_ids.push(exercise.id);
                targets.insert(exercise.id, entry.target);
            }
        }

        let routine = Routine {
            id: RoutineID::random(),
            name: Name::new(&draft.name).map_err(|err| CreateError::Other(err.into()))?,
            exercise_ids,
            targets,
        };
        self.repository.save_routines(vec![routine.clone()]).await?;
        Ok(routine)
    }
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn save_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.repository.save_exercise(exercise),
            UpdateError,
            "save",
            "exercise"
        )
    }
}

impl<R: SetLogRepository> SetLogService for Service<R> {
    async fn get_sets(&self) -> Result<Vec<SetLog>, ReadError> {
        log_on_error!(self.repository.read_sets(), ReadError, "get", "sets")
    }

    async fn append_sets(&self, sets: Vec<SetLog>) -> Result<(), CreateError> {
        log_on_error!(
            self.repository.append_sets(sets),
            CreateError,
            "append",
            "sets"
        )
    }
}

impl<R: RoutineRepository> RoutineService for Service<R> {
    async fn get_routines(&self) -> Result<Vec<Routine>, ReadError> {
        log_on_error!(
            self.repository.read_routines(),
            ReadError,
            "get",
            "routines"
        )
    }

    async fn save_routines(&self, routines: Vec<Routine>) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.save_routines(routines),
            UpdateError,
            "save",
            "routines"
        )
    }

    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError> {
        log_on_error!(
            self.repository.delete_routine(id),
            DeleteError,
            "delete",
            "routine"
        )
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    async fn get_settings(&self) -> Result<UserSettings, ReadError> {
        Ok(
            log_on_error!(self.repository.read_settings(), ReadError, "get", "settings")?
                .unwrap_or_default(),
        )
    }

    async fn save_settings(&self, settings: UserSettings) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.save_settings(settings),
            UpdateError,
            "save",
            "settings"
        )
    }
}

impl<R: AuthRepository> AuthService for Service<R> {
    async fn get_current_user(&self) -> Result<Option<User>, ReadError> {
        log_on_error!(
            self.repository.current_user(),
            ReadError,
            "get",
            "current user"
        )
    }

    async fn sign_out(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.sign_out(),
            DeleteError,
            "delete",
            "auth session"
        )
    }
}

impl<R: AdvisoryRepository> AdvisoryService for Service<R> {
    async fn classify_exercise(&self, input: &str) -> ExerciseClassification {
        match self.repository.classify_exercise(input).await {
            Ok(classification) => classification,
            Err(err) => {
                warn!("exercise classification failed: {err}");
                ExerciseClassification::fallback(input)
            }
        }
    }

    async fn suggest_alternatives(&self, exercise: &Exercise) -> Vec<Alternative> {
        match self
            .repository
            .suggest_alternatives(exercise.name.as_ref(), exercise.muscle_group)
            .await
        {
            Ok(alternatives) => alternatives,
            Err(err) => {
                warn!("alternative suggestion failed: {err}");
                Vec::new()
            }
        }
    }

    async fn form_tips(&self, exercise: &Exercise) -> Vec<String> {
        let tips = match self.repository.form_tips(exercise.name.as_ref()).await {
            Ok(tips) => tips,
            Err(err) => {
                warn!("form tips failed: {err}");
                Vec::new()
            }
        };
        if tips.is_empty() {
            GENERIC_FORM_TIPS.iter().map(ToString::to_string).collect()
        } else {
            tips
        }
    }

    async fn generate_routine_draft(&self, prompt: &str) -> RoutineDraft {
        match self.repository.generate_routine(prompt).await {
            Ok(draft) => draft,
            Err(err) => {
                warn!("routine generation failed: {err}");
                RoutineDraft::fallback()
            }
        }
    }

    async fn coach_insight(&self, volumes: &[WeeklyVolume]) -> String {
        match self.repository.coach_insight(volumes).await {
            Ok(insight) => insight,
            Err(err) => {
                warn!("coach insight failed: {err}");
                FALLBACK_COACH_INSIGHT.to_string()
            }
        }
    }
}
