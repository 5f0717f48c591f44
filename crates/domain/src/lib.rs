#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;

mod advisory;
mod auth;
mod error;
mod exercise;
mod muscle;
mod name;
mod progression;
mod routine;
mod service;
mod session;
mod set_log;
mod settings;
mod volume;

pub use advisory::{
    AdvisoryRepository, AdvisoryService, Alternative, DEFAULT_SUGGESTED_WEIGHT, DraftExercise,
    ExerciseClassification, FALLBACK_COACH_INSIGHT, GENERIC_FORM_TIPS, RoutineDraft,
    decode_form_tips,
};
pub use auth::{AuthRepository, AuthService, User, UserID};
pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError};
pub use exercise::{Exercise, ExerciseID, ExerciseRepository, ExerciseService, find_exercise};
pub use muscle::{MuscleGroup, MuscleGroupError};
pub use name::{Name, NameError};
pub use progression::{DELOAD_FACTOR, SessionOutcome, WEIGHT_INCREMENT, resolve_session};
pub use routine::{Routine, RoutineID, RoutineRepository, RoutineService, SetTarget};
pub use service::{CompletionReport, Service, UserData};
pub use session::{Session, SetChange, SetTransition};
pub use set_log::{
    SetLog, SetLogID, SetLogRepository, SetLogService, exercise_order, last_session_best,
};
pub use settings::{
    DEFAULT_REST_TIME, DEFAULT_WEEKLY_SET_GOAL, SettingsRepository, SettingsService, UserSettings,
};
pub use volume::{WeeklyVolume, week_start, weekly_volume};
