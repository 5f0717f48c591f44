use std::collections::BTreeMap;

use crate::{Exercise, ExerciseID, SetLog, set_log};

/// Weight added on top of the heaviest lifted weight after a fully
/// successful exercise.
pub const WEIGHT_INCREMENT: f32 = 2.5;
/// Fraction of the reference weight kept after an exercise with no
/// completed set.
pub const DELOAD_FACTOR: f32 = 0.9;

/// Result of reconciling a finished session: reference-weight updates worth
/// persisting and the completed sets that become history.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub exercise_updates: Vec<Exercise>,
    pub sets_to_persist: Vec<SetLog>,
}

/// Applies the progressive-overload rule table to a finished session, per
/// exercise:
///
/// - every planned set completed at or above target reps: bump to the
///   heaviest lifted weight plus [`WEIGHT_INCREMENT`]
/// - nothing completed: deload to [`DELOAD_FACTOR`] of the reference
///   weight, floored at zero
/// - anything in between: reference weight unchanged
///
/// The new weight is rounded to one decimal place and an update is emitted
/// only when it differs from the stored reference weight. Planned sets are
/// discarded, never persisted, never retried.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn resolve_session(
    sets: &[SetLog],
    exercises: &BTreeMap<ExerciseID, Exercise>,
) -> SessionOutcome {
    let mut exercise_updates = Vec::new();

    for exercise_id in set_log::exercise_order(sets) {
        let Some(exercise) = exercises.get(&exercise_id) else {
            continue;
        };
        let exercise_sets = sets
            .iter()
            .filter(|s| s.exercise_id == exercise_id)
            .collect::<Vec<_>>();
        let completed_sets = exercise_sets
            .iter()
            .copied()
            .filter(|s| s.completed)
            .collect::<Vec<_>>();

        let all_successful = completed_sets.len() == exercise_sets.len()
            && completed_sets.iter().all(|s| s.satisfies_target());

        let new_weight = if all_successful {
            completed_sets
                .iter()
                .map(|s| s.weight)
                .fold(f32::MIN, f32::max)
                + WEIGHT_INCREMENT
        } else if completed_sets.is_empty() {
            (exercise.reference_weight * DELOAD_FACTOR).max(0.0)
        } else {
            exercise.reference_weight
        };
        let new_weight = round_to_tenth(new_weight);

        if new_weight != exercise.reference_weight {
            exercise_updates.push(Exercise {
                reference_weight: new_weight,
                ..exercise.clone()
            });
        }
    }

    SessionOutcome {
        exercise_updates,
        sets_to_persist: sets.iter().filter(|s| s.completed).cloned().collect(),
    }
}

fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
