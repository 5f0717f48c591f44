use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{Exercise, ExerciseID, Routine, SetLog, SetLogID, SetTarget, set_log};

/// The in-memory, ordered sequence of planned and completed sets of a live
/// logging session. Ephemeral: abandoning the session drops the value, no
/// partial-credit accounting.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Session {
    sets: Vec<SetLog>,
}

/// In-session edit to a single planned set. Any finite value is accepted,
/// including zero and negative weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetChange {
    Weight(f32),
    Reps(u32),
}

/// Completion toggles are observable so a collaborator can start the rest
/// timer on the false-to-true transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetTransition {
    Completed,
    Reopened,
}

impl Session {
    /// Expands a routine into planned sets, mirroring the routine's exercise
    /// order. Exercise ids missing from the catalog are skipped silently, a
    /// tolerated inconsistency.
    #[must_use]
    pub fn from_routine(
        routine: &Routine,
        exercises: &BTreeMap<ExerciseID, Exercise>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut session = Session::default();
        for exercise_id in &routine.exercise_ids {
            if let Some(exercise) = exercises.get(exercise_id) {
                session.plan_sets(exercise, routine.target(*exercise_id), now);
            }
        }
        session
    }

    /// Ad-hoc addition mid-session. Always plans the default target,
    /// independently of any routine configuration.
    pub fn add_exercise(&mut self, exercise: &Exercise, now: DateTime<Utc>) {
        self.plan_sets(exercise, SetTarget::default(), now);
    }

    fn plan_sets(&mut self, exercise: &Exercise, target: SetTarget, now: DateTime<Utc>) {
        for _ in 0..target.sets {
            self.sets.push(SetLog {
                id: SetLogID::random(),
                exercise_id: exercise.id,
                date: now,
                weight: exercise.reference_weight,
                reps: target.reps,
                target_reps: target.reps,
                completed: false,
            });
        }
    }

    /// Returns whether a set with the given id was found.
    pub fn update_set(&mut self, id: SetLogID, change: SetChange) -> bool {
        let Some(set) = self.sets.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        match change {
            SetChange::Weight(weight) => set.weight = weight,
            SetChange::Reps(reps) => set.reps = reps,
        }
        true
    }

    pub fn toggle_completed(&mut self, id: SetLogID) -> Option<SetTransition> {
        let set = self.sets.iter_mut().find(|s| s.id == id)?;
        set.completed = !set.completed;
        Some(if set.completed {
            SetTransition::Completed
        } else {
            SetTransition::Reopened
        })
    }

    /// Substitutes an exercise mid-session: every set pointing at `old` is
    /// rewritten to `new` with the replacement's reference weight. Reps,
    /// targets, completion state and ordering are left untouched.
    pub fn replace_exercise(&mut self, old: ExerciseID, new: ExerciseID, reference_weight: f32) {
        for set in self.sets.iter_mut().filter(|s| s.exercise_id == old) {
            set.exercise_id = new;
            set.weight = reference_weight;
        }
    }

    #[must_use]
    pub fn sets(&self) -> &[SetLog] {
        &self.sets
    }

    #[must_use]
    pub fn exercise_order(&self) -> Vec<ExerciseID> {
        set_log::exercise_order(&self.sets)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use crate::{MuscleGroup, Name};

    use super::*;

    static NOW: std::sync::LazyLock<DateTime<Utc>> =
        std::sync::LazyLock::new(|| Utc.with_ymd_and_hms(2024, 3, 4, 17, 30, 0).unwrap());

    static EXERCISES: std::sync::LazyLock<BTreeMap<ExerciseID, Exercise>> =
        std::sync::LazyLock::new(|| {
            BTreeMap::from([
                (
                    1.into(),
                    Exercise {
                        id: 1.into(),
                        name: Name::new("Bench Press").unwrap(),
                        muscle_group: MuscleGroup::Chest,
                        reference_weight: 60.0,
                    },
                ),
                (
                    2.into(),
                    Exercise {
                        id: 2.into(),
                        name: Name::new("Overhead Press").unwrap(),
                        muscle_group: MuscleGroup::Shoulders,
                        reference_weight: 40.0,
                    },
                ),
            ])
        });

    static ROUTINE: std::sync::LazyLock<Routine> = std::sync::LazyLock::new(|| Routine {
        id: 1.into(),
        name: Name::new("Push Day").unwrap(),
        exercise_ids: vec![2.into(), 1.into(), 9.into()],
        targets: BTreeMap::from([(2.into(), SetTarget { sets: 2, reps: 8 })]),
    });

    #[test]
    fn test_session_from_routine() {
        let session = Session::from_routine(&ROUTINE, &EXERCISES, *NOW);

        // 2 configured sets for exercise 2, 3 default sets for exercise 1,
        // exercise 9 is not in the catalog and is skipped.
        assert_eq!(session.sets().len(), 5);
        assert_eq!(
            session.exercise_order(),
            vec![2.into(), 1.into()]
        );

        for set in &session.sets()[..2] {
            assert_eq!(set.exercise_id, 2.into());
            assert_eq!(set.weight, 40.0);
            assert_eq!(set.reps, 8);
            assert_eq!(set.target_reps, 8);
            assert_eq!(set.date, *NOW);
            assert!(!set.completed);
        }
        for set in &session.sets()[2..] {
            assert_eq!(set.exercise_id, 1.into());
            assert_eq!(set.weight, 60.0);
            assert_eq!(set.reps, 10);
            assert_eq!(set.target_reps, 10);
            assert!(!set.completed);
        }

        let ids = session.sets().iter().map(|s| s.id).collect::<Vec<_>>();
        assert!(ids.iter().all(|id| !id.is_nil()));
        assert_eq!(
            ids.len(),
            ids.iter().collect::<std::collections::BTreeSet<_>>().len()
        );
    }

    #[test]
    fn test_session_add_exercise() {
        let mut session = Session::default();

        session.add_exercise(&EXERCISES[&ExerciseID::from(1)], *NOW);

        assert_eq!(session.sets().len(), 3);
        for set in session.sets() {
            assert_eq!(set.exercise_id, 1.into());
            assert_eq!(set.weight, 60.0);
            assert_eq!(set.reps, 10);
            assert_eq!(set.target_reps, 10);
            assert!(!set.completed);
        }
    }

    #[test]
    fn test_session_update_set() {
        let mut session = Session::from_routine(&ROUTINE, &EXERCISES, *NOW);
        let id = session.sets()[0].id;

        assert!(session.update_set(id, SetChange::Weight(-2.5)));
        assert!(session.update_set(id, SetChange::Reps(0)));

        assert_eq!(session.sets()[0].weight, -2.5);
        assert_eq!(session.sets()[0].reps, 0);
        assert_eq!(session.sets()[0].target_reps, 8);
        assert_eq!(session.sets()[1].weight, 40.0);

        assert!(!session.update_set(SetLogID::random(), SetChange::Weight(50.0)));
    }

    #[test]
    fn test_session_toggle_completed() {
        let mut session = Session::from_routine(&ROUTINE, &EXERCISES, *NOW);
        let id = session.sets()[0].id;

        assert_eq!(session.toggle_completed(id), Some(SetTransition::Completed));
        assert!(session.sets()[0].completed);

        assert_eq!(session.toggle_completed(id), Some(SetTransition::Reopened));
        assert!(!session.sets()[0].completed);

        assert_eq!(session.toggle_completed(SetLogID::random()), None);
    }

    #[test]
    fn test_session_replace_exercise() {
        let mut session = Session::from_routine(&ROUTINE, &EXERCISES, *NOW);
        let completed_id = session.sets()[2].id;
        session.update_set(completed_id, SetChange::Reps(12));
        session.toggle_completed(completed_id);
        let before = session.sets().to_vec();

        session.replace_exercise(1.into(), 5.into(), 55.0);

        for (old, new) in before.iter().zip(session.sets()) {
            assert_eq!(old.id, new.id);
            assert_eq!(old.reps, new.reps);
            assert_eq!(old.target_reps, new.target_reps);
            assert_eq!(old.completed, new.completed);
            if old.exercise_id == 1.into() {
                assert_eq!(new.exercise_id, 5.into());
                assert_eq!(new.weight, 55.0);
            } else {
                assert_eq!(new.exercise_id, old.exercise_id);
                assert_eq!(new.weight, old.weight);
            }
        }
        assert!(session.sets()[2].completed);
    }

    #[test]
    fn test_session_is_empty() {
        assert!(Session::default().is_empty());
        assert!(!Session::from_routine(&ROUTINE, &EXERCISES, *NOW).is_empty());
    }
}
